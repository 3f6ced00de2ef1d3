//! Prompt templates and request construction.

use grok_search_types::SearchRequest;

use crate::types::{ChatMessage, ChatRequest};

/// System instruction for web searches.
pub const SEARCH_SYSTEM_PROMPT: &str = "\
You are a web research assistant with live search access. Search the web for \
the user's query and answer from what you find, not from memory. For every \
result give a title, the source URL, and a short summary of the relevant \
content. Prefer primary and recent sources, and say so plainly when nothing \
relevant turns up.";

/// System instruction for page fetches.
pub const FETCH_SYSTEM_PROMPT: &str = "\
You are a web page extraction assistant. Retrieve the page at the given URL \
and return its main content as well-structured Markdown: keep headings, lists, \
tables, code blocks and links, and drop navigation, ads and other boilerplate. \
Do not summarize or add commentary.";

/// Compose the user message for a search: the query, then the optional
/// platform clause, then the optional result-count clause.
pub fn search_user_message(request: &SearchRequest) -> String {
    let mut message = request.query.clone();

    if let Some(platform) = request.platform.as_deref().filter(|p| !p.is_empty()) {
        message.push_str(
            "\n\nYou should search the web for the information you need, \
             and focus on these platform: ",
        );
        message.push_str(platform);
    }

    if let Some(bounds) = request.bounds.filter(|b| b.max() > 0) {
        message.push_str(&format!(
            "\n\nYou should return the results in a JSON format, and the results \
             should at least be {} and at most be {} results.",
            bounds.min(),
            bounds.max()
        ));
    }

    message
}

/// Compose the user message for a page fetch.
pub fn fetch_user_message(url: &str) -> String {
    format!("{url}\nFetch the content of this web page and return it as structured Markdown.")
}

/// Build the streaming chat request for a search.
pub fn search_request(model: &str, request: &SearchRequest) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(SEARCH_SYSTEM_PROMPT),
            ChatMessage::user(search_user_message(request)),
        ],
        stream: true,
    }
}

/// Build the non-streaming chat request for a page fetch.
pub fn fetch_request(model: &str, url: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![
            ChatMessage::system(FETCH_SYSTEM_PROMPT),
            ChatMessage::user(fetch_user_message(url)),
        ],
        stream: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    #[test]
    fn bare_query_has_default_bounds_clause() {
        let message = search_user_message(&SearchRequest::new("rust 2024 edition"));
        assert_eq!(
            message,
            "rust 2024 edition\n\nYou should return the results in a JSON format, \
             and the results should at least be 3 and at most be 10 results."
        );
    }

    #[test]
    fn platform_clause_precedes_bounds_clause() {
        let request = SearchRequest::new("tokio").platform("GitHub").results(2, 4);
        let message = search_user_message(&request);
        let platform_at = message.find("focus on these platform: GitHub").unwrap();
        let bounds_at = message.find("at least be 2 and at most be 4").unwrap();
        assert!(message.starts_with("tokio\n\n"));
        assert!(platform_at < bounds_at);
    }

    #[test]
    fn no_bounds_means_query_only() {
        let request = SearchRequest::new("just this").without_bounds();
        assert_eq!(search_user_message(&request), "just this");
    }

    #[test]
    fn zero_max_drops_bounds_clause() {
        let request = SearchRequest::new("q").results(0, 0);
        assert_eq!(search_user_message(&request), "q");
    }

    #[test]
    fn zero_max_drops_bounds_clause_with_default_min() {
        let request = SearchRequest::new("q").results(3, 0);
        assert_eq!(search_user_message(&request), "q");
    }

    #[test]
    fn search_request_streams_with_two_messages() {
        let request = search_request("grok-4-fast", &SearchRequest::new("q"));
        assert!(request.stream);
        assert_eq!(request.model, "grok-4-fast");
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[0].content, SEARCH_SYSTEM_PROMPT);
        assert_eq!(request.messages[1].role, Role::User);
    }

    #[test]
    fn fetch_request_does_not_stream() {
        let request = fetch_request("grok-4-fast", "https://example.com/a");
        assert!(!request.stream);
        assert_eq!(request.messages[0].content, FETCH_SYSTEM_PROMPT);
        assert!(
            request.messages[1]
                .content
                .starts_with("https://example.com/a\n")
        );
    }
}
