use thiserror::Error;

/// Why a single page could not be retrieved.
///
/// Returned by value from [`PageSource::fetch`](super::PageSource::fetch);
/// the orchestrator decides whether it ends the run or only the traversal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    #[error("HTTP status {0}")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("First page unavailable: {0}")]
    SeedUnavailable(FetchFailure),
}
