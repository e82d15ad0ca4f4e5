// scraper.rs
use crate::scraper::extractor::extract_listings;
use crate::scraper::models::{normalize_page, NormalizedListing};
use crate::scraper::pagination::{resolve_pagination, PaginationState};
use crate::scraper::{FetchFailure, PageSource};
use chrono::Utc;
use std::time::Duration;
use url::Url;

/// Why a traversal ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The first page could not be fetched; nothing was scraped.
    SeedFetchFailed(FetchFailure),
    /// Every page in the budget was scraped.
    BudgetReached,
    /// `page` held no listings.
    OutOfListings { page: u32 },
    /// `page` could not be fetched; earlier pages are kept.
    FetchFailed { page: u32, failure: FetchFailure },
}

#[derive(Debug)]
pub struct Traversal {
    /// Page order, then in-page order. Not de-duplicated.
    pub listings: Vec<NormalizedListing>,
    /// Pages that produced listings.
    pub pages_scraped: u32,
    /// Resolved from the seed page; `None` when the seed never arrived.
    pub pagination: Option<PaginationState>,
    pub stop: StopReason,
}

pub struct ListingScraper<S: PageSource> {
    source: S,
    pacing_delay: Duration,
}

impl<S: PageSource> ListingScraper<S> {
    pub fn new(source: S, pacing_delay: Duration) -> Self {
        Self {
            source,
            pacing_delay,
        }
    }

    /// Scrapes every page reachable from `seed_url`, up to `page_cap` pages.
    pub fn scrape_all_pages(&self, seed_url: &Url, page_cap: Option<u32>) -> Traversal {
        self.scrape_pages(seed_url, page_cap, |_, _| {})
    }

    /// Same as [`scrape_all_pages`](Self::scrape_all_pages), calling
    /// `on_page(page_number, listings)` after each page is normalized.
    ///
    /// The page budget is fixed from the seed page's pagination links.
    /// Later pages are fetched strictly in order, one at a time, with the
    /// pacing delay before each, and the run stops at the first page that
    /// fails to fetch or holds no listings.
    pub fn scrape_pages<F>(&self, seed_url: &Url, page_cap: Option<u32>, mut on_page: F) -> Traversal
    where
        F: FnMut(u32, &[NormalizedListing]),
    {
        tracing::info!("Starting to scrape all pages from: {seed_url}");

        let html = match self.source.fetch(seed_url.as_str()) {
            Ok(html) => html,
            Err(failure) => {
                tracing::error!("Failed to fetch the first page: {failure}");
                return Traversal {
                    listings: Vec::new(),
                    pages_scraped: 0,
                    pagination: None,
                    stop: StopReason::SeedFetchFailed(failure),
                };
            }
        };

        let mut listings = Vec::new();
        let mut pages_scraped = 0;

        let seed_listings = scrape_markup(&html);
        let pagination = resolve_pagination(&html, seed_url);
        let budget = effective_page_budget(pagination.highest_page_index, page_cap);
        tracing::info!("Will attempt to scrape {budget} pages total");

        let Some(seed_listings) = seed_listings else {
            tracing::warn!("No properties found on the first page");
            return Traversal {
                listings,
                pages_scraped,
                pagination: Some(pagination),
                stop: StopReason::OutOfListings { page: 1 },
            };
        };

        pages_scraped += 1;
        tracing::info!("Page {pages_scraped}: Found {} properties", seed_listings.len());
        on_page(pages_scraped, &seed_listings);
        listings.extend(seed_listings);

        let stop = loop {
            if pages_scraped >= budget || page_cap.is_some_and(|cap| pages_scraped >= cap) {
                break StopReason::BudgetReached;
            }

            let page = pages_scraped + 1;
            tracing::info!("Scraping page {page}...");
            std::thread::sleep(self.pacing_delay);

            let html = match self.source.fetch(&page_url(seed_url.as_str(), page)) {
                Ok(html) => html,
                Err(failure) => {
                    tracing::warn!("Failed to fetch page {page}: {failure}");
                    break StopReason::FetchFailed { page, failure };
                }
            };

            let Some(page_listings) = scrape_markup(&html) else {
                tracing::info!("No properties found on page {page}");
                break StopReason::OutOfListings { page };
            };

            pages_scraped = page;
            tracing::info!("Page {page}: Found {} properties", page_listings.len());
            on_page(page, &page_listings);
            listings.extend(page_listings);
        };

        tracing::info!("Completed scraping {pages_scraped} pages");
        tracing::info!("Total properties found: {}", listings.len());

        Traversal {
            listings,
            pages_scraped,
            pagination: Some(pagination),
            stop,
        }
    }
}

/// Extracts and normalizes one page. `None` when the payload had no
/// records at all; a page whose records were all malformed is `Some(vec![])`.
fn scrape_markup(html: &str) -> Option<Vec<NormalizedListing>> {
    let raw = extract_listings(html);
    if raw.is_empty() {
        return None;
    }
    Some(normalize_page(&raw, Utc::now()))
}

/// Pages to visit: the seed page's highest page index, lowered to the cap
/// when one is given. Never below 1.
pub fn effective_page_budget(highest_page_index: u32, page_cap: Option<u32>) -> u32 {
    let budget = match page_cap {
        Some(cap) => highest_page_index.min(cap),
        None => highest_page_index,
    };
    budget.max(1)
}

/// URL of page `page` of the search rooted at `seed_url`.
///
/// Adds `page=N` with `?` or `&` as the seed's query requires, keeping
/// any `#fragment` at the end.
pub fn page_url(seed_url: &str, page: u32) -> String {
    let (base, fragment) = match seed_url.split_once('#') {
        Some((base, fragment)) => (base, Some(fragment)),
        None => (seed_url, None),
    };

    let separator = if base.ends_with('?') || base.ends_with('&') {
        ""
    } else if base.contains('?') {
        "&"
    } else {
        "?"
    };

    match fragment {
        Some(fragment) => format!("{base}{separator}page={page}#{fragment}"),
        None => format!("{base}{separator}page={page}"),
    }
}
