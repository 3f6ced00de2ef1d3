//! Provider contract tests.
//!
//! Drive providers only through the `SearchProvider` trait, the way a caller
//! that does not know the concrete backend would. The HTTP side is a wiremock
//! server speaking the Chat Completions wire format.

use std::sync::{Arc, Mutex};

use grok_search_provider::Grok;
use grok_search_types::{Progress, ProviderError, SearchProvider, SearchRequest};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Helpers
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Progress handle that keeps every message it receives.
#[derive(Default)]
struct CollectingProgress {
    messages: Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl Progress for CollectingProgress {
    async fn info(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Search then fetch through any provider, returning both answers.
async fn search_then_fetch<P: SearchProvider>(
    provider: &P,
    progress: &dyn Progress,
) -> Result<(String, String), ProviderError> {
    let found = provider
        .search(SearchRequest::new("rust release notes"), Some(progress))
        .await?;
    let page = provider
        .fetch("https://blog.rust-lang.org/", Some(progress))
        .await?;
    Ok((found, page))
}

async fn mount_chat_endpoint(server: &MockServer) {
    let stream = "\
data: {\"choices\":[{\"delta\":{\"role\":\"assistant\",\"content\":\"\"}}]}

data: {\"choices\":[{\"delta\":{\"content\":\"[{\\\"title\\\":\"}}]}

data: {\"choices\":[{\"delta\":{\"content\":\"\\\"Rust 1.85\\\"}]\"}}]}

data: [DONE]

";
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_partial_json(serde_json::json!({"stream": true})))
        .respond_with(ResponseTemplate::new(200).set_body_raw(stream, "text/event-stream"))
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "# Rust Blog"}}]
        })))
        .mount(server)
        .await;
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Grok
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test]
async fn grok_search_and_fetch_through_the_trait() {
    let server = MockServer::start().await;
    mount_chat_endpoint(&server).await;

    let grok = Grok::new(format!("{}/v1", server.uri()), "test-key").debug(true);
    let progress = CollectingProgress::default();

    let (found, page) = search_then_fetch(&grok, &progress).await.expect("both calls succeed");

    assert_eq!(grok.name(), "Grok");
    assert_eq!(found, "[{\"title\":\"Rust 1.85\"}]");
    assert_eq!(page, "# Rust Blog");

    let messages = progress.messages.lock().unwrap().clone();
    assert_eq!(messages.len(), 2);
    assert!(messages[0].starts_with("platform_prompt: rust release notes"));
    assert!(messages[1].contains("https://blog.rust-lang.org/"));
}

#[tokio::test]
async fn grok_is_shareable_across_tasks() {
    let server = MockServer::start().await;
    mount_chat_endpoint(&server).await;

    let grok = Arc::new(Grok::new(format!("{}/v1", server.uri()), "test-key"));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let grok = Arc::clone(&grok);
            tokio::spawn(async move {
                grok.search(SearchRequest::new(format!("query {i}")), None)
                    .await
            })
        })
        .collect();

    for handle in handles {
        let text = handle.await.expect("task").expect("search");
        assert_eq!(text, "[{\"title\":\"Rust 1.85\"}]");
    }
}

#[tokio::test]
async fn grok_surfaces_transport_failures_as_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .mount(&server)
        .await;

    let grok = Grok::new(format!("{}/v1", server.uri()), "test-key");
    let progress = CollectingProgress::default();

    let err = search_then_fetch(&grok, &progress).await.unwrap_err();
    assert!(matches!(err, ProviderError::ModelNotFound(_)), "got: {err:?}");
    assert!(!err.is_retryable());
}
