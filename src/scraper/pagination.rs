// pagination.rs
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;
use url::Url;

static PAGE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"page=(\d+)").expect("page pattern is valid"));

/// Pagination controls, most specific first. Only the first selector that
/// matches anything is used.
const PAGINATION_SELECTORS: &[&str] = &[
    r#"a[href*="page="]"#,
    ".pagination a",
    ".pager a",
    r#"a[href*="&p="]"#,
    r#"nav a[href*="page"]"#,
];

/// Link labels that mean "next page", in English and Greek.
const NEXT_LABELS: &[&str] = &["next", "επόμενη", "επόμενο", ">", "»"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    /// Highest page number linked from the page; at least 1.
    pub highest_page_index: u32,
    pub next_page_url: Option<Url>,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            highest_page_index: 1,
            next_page_url: None,
        }
    }
}

/// Inspects one page's pagination controls.
///
/// `page_url` is the address the markup was fetched from; relative links
/// are resolved against it.
pub fn resolve_pagination(html: &str, page_url: &Url) -> PaginationState {
    let document = Html::parse_document(html);
    let links = pagination_links(&document);

    if links.is_empty() {
        tracing::debug!("No pagination links found, assuming a single page");
        return PaginationState::default();
    }

    let highest_page_index = links
        .iter()
        .filter_map(|link| link.value().attr("href"))
        .flat_map(|href| PAGE_NUMBER.captures_iter(href))
        .filter_map(|caps| caps[1].parse::<u32>().ok())
        .fold(1, u32::max);

    let next_page_url = links
        .iter()
        .find(|link| is_next_label(&link_text(link)))
        .and_then(|link| link.value().attr("href"))
        .and_then(|href| page_url.join(href).ok());

    let state = PaginationState {
        highest_page_index,
        next_page_url,
    };
    tracing::info!(
        "Pagination info - Max page found: {}, Next page URL: {:?}",
        state.highest_page_index,
        state.next_page_url.as_ref().map(Url::as_str)
    );
    state
}

fn pagination_links(document: &Html) -> Vec<ElementRef<'_>> {
    for css in PAGINATION_SELECTORS {
        let Ok(selector) = Selector::parse(css) else {
            tracing::error!("Invalid pagination selector {css:?}");
            continue;
        };
        let links: Vec<_> = document.select(&selector).collect();
        if !links.is_empty() {
            tracing::debug!("Pagination matched by {css:?} ({} links)", links.len());
            return links;
        }
    }

    // Last resort: any link that looks like it carries a page number.
    let Ok(anchors) = Selector::parse("a[href]") else {
        return Vec::new();
    };
    document
        .select(&anchors)
        .filter(|link| link.value().attr("href").is_some_and(is_paged_href))
        .collect()
}

fn is_paged_href(href: &str) -> bool {
    href.contains("page=") || href.contains("&p=")
}

fn link_text(link: &ElementRef<'_>) -> String {
    link.text().map(str::trim).collect::<String>()
}

fn is_next_label(text: &str) -> bool {
    let text = text.to_lowercase();
    NEXT_LABELS.contains(&text.as_str()) || text.contains("next")
}
