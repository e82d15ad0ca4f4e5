use crate::scraper::ScraperError;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

// listing (as embedded in the results payload, every key optional)
//  ├── id, title, url, address
//  ├── price, price_per_square_meter, size_with_square_meter
//  ├── bedrooms, bathrooms, construction_year, levels[]
//  ├── transaction_type, item_type
//  ├── geo_lat, geo_lng
//  ├── company_title
//  └── is_commercial

/// One listing object as found in a page's payload. No keys are guaranteed.
pub type RawListing = Value;

/// Placeholder written for every field the source did not supply.
pub const NOT_AVAILABLE: &str = "N/A";

/// A scalar taken from the source record, or the "N/A" sentinel.
///
/// Present values keep their JSON type; `null` counts as absent.
#[derive(Debug, Clone, PartialEq)]
pub enum Field {
    Present(Value),
    NotAvailable,
}

impl Field {
    fn lookup(raw: &Map<String, Value>, key: &str) -> Self {
        match raw.get(key) {
            None | Some(Value::Null) => Field::NotAvailable,
            Some(v) => Field::Present(v.clone()),
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Field::Present(v) => Some(v),
            Field::NotAvailable => None,
        }
    }

    /// Human-readable rendering; strings are returned without quotes.
    pub fn display(&self) -> String {
        match self {
            Field::Present(Value::String(s)) => s.clone(),
            Field::Present(v) => v.to_string(),
            Field::NotAvailable => NOT_AVAILABLE.to_string(),
        }
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Field::Present(v) => v.serialize(serializer),
            Field::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

/// Fixed-schema listing. Every field is always serialized, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedListing {
    pub id: Field,
    pub title: Field,
    pub price: Field,
    pub price_per_area: Field,
    pub size: Field,
    pub address: Field,
    pub bedrooms: Field,
    pub bathrooms: Field,
    pub construction_year: Field,
    pub levels: Vec<Value>,
    pub transaction_type: Field,
    pub item_type: Field,
    pub latitude: Field,
    pub longitude: Field,
    pub url: Field,
    pub provider_name: Field,
    pub is_commercial: bool,
    pub captured_at: DateTime<Utc>,
}

impl NormalizedListing {
    /// Maps a raw payload record onto the fixed schema.
    ///
    /// Only a record that is not a JSON object is rejected; any subset of
    /// keys (including none) is accepted.
    pub fn from_raw(raw: &RawListing, captured_at: DateTime<Utc>) -> Result<Self, ScraperError> {
        let obj = raw.as_object().ok_or_else(|| {
            ScraperError::MalformedRecord(format!("expected an object, got {}", kind_of(raw)))
        })?;

        let get = |key: &str| Field::lookup(obj, key);

        Ok(Self {
            id: get("id"),
            title: get("title"),
            price: get("price"),
            price_per_area: get("price_per_square_meter"),
            size: get("size_with_square_meter"),
            address: get("address"),
            bedrooms: get("bedrooms"),
            bathrooms: get("bathrooms"),
            construction_year: get("construction_year"),
            levels: levels_of(obj.get("levels")),
            transaction_type: get("transaction_type"),
            item_type: get("item_type"),
            latitude: get("geo_lat"),
            longitude: get("geo_lng"),
            url: get("url"),
            provider_name: get("company_title"),
            is_commercial: flag_of(obj.get("is_commercial")),
            captured_at,
        })
    }
}

/// Normalizes one page of records. Malformed records are logged and
/// skipped; their siblings are kept.
pub fn normalize_page(raw: &[RawListing], captured_at: DateTime<Utc>) -> Vec<NormalizedListing> {
    raw.iter()
        .enumerate()
        .filter_map(|(i, record)| match NormalizedListing::from_raw(record, captured_at) {
            Ok(listing) => Some(listing),
            Err(e) => {
                tracing::warn!("Skipping record #{i}: {e}");
                None
            }
        })
        .collect()
}

fn levels_of(value: Option<&Value>) -> Vec<Value> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.clone(),
        Some(other) => vec![other.clone()],
    }
}

fn flag_of(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.eq_ignore_ascii_case("true") || s == "1"
        }
        _ => false,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
