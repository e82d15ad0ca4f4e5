// src/domain/summary.rs

use crate::scraper::models::Field;
use crate::scraper::NormalizedListing;
use serde_json::Value;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceStats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}

/// Figures printed at the end of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub total: usize,
    pub unique_addresses: usize,
    pub prices: Option<PriceStats>,
}

impl RunSummary {
    pub fn from_listings(listings: &[NormalizedListing]) -> Self {
        let unique_addresses = listings
            .iter()
            .filter_map(|l| l.address.as_value())
            .map(Value::to_string)
            .collect::<HashSet<_>>()
            .len();

        let prices: Vec<f64> = listings.iter().filter_map(|l| parse_price(&l.price)).collect();

        Self {
            total: listings.len(),
            unique_addresses,
            prices: price_stats(&prices),
        }
    }
}

/// Reads a price the way the origin prints it, e.g. `"1.250 €"` or
/// `"€ 1.250,50"`: `.` groups thousands and `,` marks decimals.
///
/// Text without a `€` sign is not treated as a price. Plain JSON numbers
/// are taken as-is.
pub fn parse_price(field: &Field) -> Option<f64> {
    match field.as_value()? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.contains('€') => {
            let digits: String = s
                .replace('.', "")
                .replace(',', ".")
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            digits.parse().ok()
        }
        _ => None,
    }
}

fn price_stats(prices: &[f64]) -> Option<PriceStats> {
    if prices.is_empty() {
        return None;
    }
    let min = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let max = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let average = prices.iter().sum::<f64>() / prices.len() as f64;
    Some(PriceStats { min, max, average })
}
