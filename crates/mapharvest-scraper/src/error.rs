use thiserror::Error;

/// Failures reported by a [`crate::Page`] implementation.
///
/// Every variant is treated as recoverable at the call site except
/// [`PageError::Closed`], which means the session is gone.
#[derive(Debug, Clone, Error)]
pub enum PageError {
    #[error("timed out after {timeout_ms}ms waiting for {what}")]
    Timeout { what: String, timeout_ms: u64 },

    #[error("no element matches {0}")]
    NotFound(String),

    #[error("browser protocol error: {0}")]
    Protocol(String),

    #[error("page session is closed")]
    Closed,
}

/// Keyword-level failures that escape [`crate::KeywordScrapeOrchestrator::run`].
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("failed to open search page {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: PageError,
    },

    #[error("could not submit search for \"{keyword}\": {source}")]
    Search {
        keyword: String,
        #[source]
        source: PageError,
    },

    #[error("failed to launch browser: {0}")]
    Launch(String),
}
