use crate::scraper::{FetchFailure, PageSource};
use std::cell::RefCell;
use std::collections::HashMap;
use url::Url;

pub const SEED: &str = "https://example.com/search";

pub fn seed_url() -> Url {
    Url::parse(SEED).unwrap()
}

pub fn page(n: u32) -> String {
    format!("{SEED}?page={n}")
}

/// In-memory page source that records every URL it is asked for.
/// Unknown URLs answer with a 404.
#[derive(Default)]
pub struct FakeSource {
    pages: HashMap<String, Result<String, FetchFailure>>,
    pub requests: RefCell<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.insert(url.into(), Ok(html.into()));
        self
    }

    pub fn with_failure(mut self, url: impl Into<String>, failure: FetchFailure) -> Self {
        self.pages.insert(url.into(), Err(failure));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl PageSource for FakeSource {
    fn fetch(&self, url: &str) -> Result<String, FetchFailure> {
        self.requests.borrow_mut().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .unwrap_or(Err(FetchFailure::Status(404)))
    }
}

/// Numbered pager links `1..=last`, plus a "next" arrow.
pub fn pager(last: u32) -> String {
    let mut links: String = (1..=last)
        .map(|n| format!(r#"<a href="/search?page={n}">{n}</a>"#))
        .collect();
    if last > 1 {
        links.push_str(r#"<a href="/search?page=2">»</a>"#);
    }
    format!(r#"<nav class="pagination">{links}</nav>"#)
}

/// Listings embedded in the `data-json-data` container.
pub fn container_page(results: &str, extra: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Results</title></head>
<body>
    <div class="results" data-json-data='{{"total": 99, "results": {results}}}'></div>
    {extra}
</body>
</html>"#
    )
}

/// Listings embedded in an inline script.
pub fn script_page(results: &str, extra: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <script>window.analytics = {{"page": "search"}};</script>
    <script>window.__STATE__ = {{"search": {{"results": {results}, "count": 2}}}};</script>
</head>
<body>
    {extra}
</body>
</html>"#
    )
}

/// `count` listings with ids `first..first+count`.
pub fn listings_json(first: u32, count: u32) -> String {
    let items: Vec<String> = (first..first + count)
        .map(|id| {
            format!(
                r#"{{"id": "{id}", "title": "Διαμέρισμα {id}", "price": "{id}00 €", "address": "Κολωνάκι", "levels": ["1ος"]}}"#
            )
        })
        .collect();
    format!("[{}]", items.join(", "))
}
