use crate::domain::summary::{parse_price, RunSummary};
use crate::scraper::models::{normalize_page, Field};
use chrono::Utc;
use serde_json::json;

#[test]
fn parses_european_prices() {
    assert_eq!(parse_price(&Field::Present(json!("1.250 €"))), Some(1250.0));
    assert_eq!(parse_price(&Field::Present(json!("€ 1.250,50"))), Some(1250.5));
    assert_eq!(parse_price(&Field::Present(json!(900))), Some(900.0));
}

#[test]
fn ignores_non_prices() {
    assert_eq!(parse_price(&Field::Present(json!("750"))), None);
    assert_eq!(parse_price(&Field::Present(json!("Κατόπιν επικοινωνίας €"))), None);
    assert_eq!(parse_price(&Field::NotAvailable), None);
}

#[test]
fn summary_counts_addresses_and_prices() {
    let listings = normalize_page(
        &[
            json!({"address": "Κολωνάκι", "price": "1.000 €"}),
            json!({"address": "Κολωνάκι", "price": "2.000 €"}),
            json!({"address": "Παγκράτι", "price": "Τιμή κατόπιν επικοινωνίας"}),
            json!({"price": "600 €"}),
        ],
        Utc::now(),
    );

    let summary = RunSummary::from_listings(&listings);

    assert_eq!(summary.total, 4);
    assert_eq!(summary.unique_addresses, 2);
    let prices = summary.prices.unwrap();
    assert_eq!(prices.min, 600.0);
    assert_eq!(prices.max, 2000.0);
    assert_eq!(prices.average, 1200.0);
}

#[test]
fn summary_without_prices() {
    let summary = RunSummary::from_listings(&[]);

    assert_eq!(summary.total, 0);
    assert_eq!(summary.prices, None);
}
