// extractor.rs
use crate::scraper::models::RawListing;
use regex::Regex;
use scraper::{Html, Selector};
use serde_json::{Deserializer, Value};
use std::sync::LazyLock;

/// Locates each `"results": [` key; the match ends on the opening bracket.
static RESULTS_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""results"\s*:\s*\["#).expect("results pattern is valid"));

const CONTAINER_SELECTOR: &str = "div[data-json-data]";
const CONTAINER_ATTR: &str = "data-json-data";

type Strategy = fn(&Html) -> Option<Vec<RawListing>>;

/// Tried in order; the first `Some` wins, even if it holds no listings.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("container attribute", from_container_attr),
    ("script tag", from_script_tags),
];

/// Pulls the listing array out of one page's markup.
///
/// The origin embeds the same payload either in a `data-json-data`
/// attribute or inline in a `<script>`, depending on the template. An
/// empty result means neither was found and is the end-of-listings signal.
pub fn extract_listings(html: &str) -> Vec<RawListing> {
    let document = Html::parse_document(html);

    for (name, strategy) in STRATEGIES {
        if let Some(listings) = strategy(&document) {
            tracing::info!("Found {} properties via {name}", listings.len());
            return listings;
        }
    }

    tracing::info!("No JSON property data found");
    Vec::new()
}

fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css)
        .map_err(|e| tracing::error!("Invalid selector {css:?}: {e}"))
        .ok()
}

fn from_container_attr(document: &Html) -> Option<Vec<RawListing>> {
    let selector = selector(CONTAINER_SELECTOR)?;
    let raw = document.select(&selector).next()?.value().attr(CONTAINER_ATTR)?;
    if raw.trim().is_empty() {
        return None;
    }

    let data: Value = match serde_json::from_str(raw) {
        Ok(data) => data,
        Err(e) => {
            tracing::warn!("Error parsing JSON data: {e}");
            return None;
        }
    };

    match data.get("results")? {
        Value::Array(items) => Some(items.clone()),
        other => {
            tracing::warn!("`results` is not an array: {other}");
            None
        }
    }
}

fn from_script_tags(document: &Html) -> Option<Vec<RawListing>> {
    let selector = selector("script")?;

    document.select(&selector).find_map(|script| {
        let text: String = script.text().collect();
        if !text.contains("\"results\"") {
            return None;
        }
        RESULTS_KEY
            .find_iter(&text)
            .find_map(|m| parse_array_at(&text[m.end() - 1..]))
    })
}

/// Parses the JSON array that starts at the beginning of `text`, ignoring
/// whatever follows it.
fn parse_array_at(text: &str) -> Option<Vec<Value>> {
    let mut stream = Deserializer::from_str(text).into_iter::<Vec<Value>>();
    match stream.next()? {
        Ok(items) => Some(items),
        Err(e) => {
            tracing::debug!("Script payload did not parse: {e}");
            None
        }
    }
}
