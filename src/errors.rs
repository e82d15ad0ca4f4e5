// errors.rs
use crate::scraper::ScraperError;
use thiserror::Error;

/// Errors surfaced by the command-line layer: configuration, persistence,
/// or anything the scraper core could not absorb on its own.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Spreadsheet error: {0}")]
    XlsxError(String),

    #[error(transparent)]
    Scraper(#[from] ScraperError),
}

// Type alias used by the export and CLI layers.
pub type AppResult<T> = Result<T, AppError>;
