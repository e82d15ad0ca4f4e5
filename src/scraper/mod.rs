pub mod extractor;
mod fetcher;
pub mod models;
pub mod pagination;
mod scraper;
mod scraper_error;

pub use fetcher::{HttpFetcher, PageSource};
pub use models::NormalizedListing;
pub use scraper_error::{FetchFailure, ScraperError};
pub use self::scraper::{effective_page_budget, page_url, ListingScraper, StopReason, Traversal};
