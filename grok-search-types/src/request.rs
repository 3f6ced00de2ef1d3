//! Search request types.

/// Default lower bound on the number of results requested from the model.
pub const DEFAULT_MIN_RESULTS: u32 = 3;

/// Default upper bound on the number of results requested from the model.
pub const DEFAULT_MAX_RESULTS: u32 = 10;

/// Inclusive bounds on how many results the model is asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultBounds {
    min: u32,
    max: u32,
}

impl ResultBounds {
    /// Create bounds. A reversed pair is swapped so that `min <= max` always holds.
    #[must_use]
    pub fn new(min: u32, max: u32) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Lower bound.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for ResultBounds {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_RESULTS, DEFAULT_MAX_RESULTS)
    }
}

/// A web search to run through a [`SearchProvider`](crate::SearchProvider).
///
/// # Example
///
/// ```
/// use grok_search_types::SearchRequest;
///
/// let request = SearchRequest::new("rust async runtimes")
///     .platform("GitHub")
///     .results(5, 8);
/// assert_eq!(request.platform.as_deref(), Some("GitHub"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free-text query (or URL) to search for.
    pub query: String,
    /// Platform the model should focus on (e.g. "Twitter", "GitHub").
    pub platform: Option<String>,
    /// How many results to ask for. `None` omits the result-count instruction.
    pub bounds: Option<ResultBounds>,
}

impl SearchRequest {
    /// Create a request with default result bounds and no platform hint.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            platform: None,
            bounds: Some(ResultBounds::default()),
        }
    }

    /// Focus the search on a platform. An empty string clears the hint.
    #[must_use]
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        let platform = platform.into();
        self.platform = (!platform.is_empty()).then_some(platform);
        self
    }

    /// Ask for between `min` and `max` results.
    ///
    /// `max == 0` leaves the count to the model, whatever `min` is.
    #[must_use]
    pub fn results(mut self, min: u32, max: u32) -> Self {
        self.bounds = (max > 0).then(|| ResultBounds::new(min, max));
        self
    }

    /// Drop the result-count instruction from the prompt.
    #[must_use]
    pub fn without_bounds(mut self) -> Self {
        self.bounds = None;
        self
    }
}
