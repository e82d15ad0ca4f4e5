use crate::errors::{AppError, AppResult};
use crate::scraper::models::Field;
use crate::scraper::NormalizedListing;
use rust_xlsxwriter::{Workbook, Worksheet};
use serde_json::Value;
use std::path::Path;

const HEADERS: [&str; 18] = [
    "ID",
    "Title",
    "Price",
    "Price / m²",
    "Size",
    "Address",
    "Bedrooms",
    "Bathrooms",
    "Construction Year",
    "Levels",
    "Transaction",
    "Type",
    "Latitude",
    "Longitude",
    "URL",
    "Provider",
    "Commercial",
    "Captured At",
];

/// Writes one row per listing, in traversal order, under a header row.
pub fn export_listings_xlsx(listings: &[NormalizedListing], path: &Path) -> AppResult<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).map_err(|e| {
            AppError::XlsxError(format!("Failed to write header '{}': {}", header, e))
        })?;
    }

    for (i, listing) in listings.iter().enumerate() {
        let r = (i + 1) as u32;

        let fields = [
            &listing.id,
            &listing.title,
            &listing.price,
            &listing.price_per_area,
            &listing.size,
            &listing.address,
            &listing.bedrooms,
            &listing.bathrooms,
            &listing.construction_year,
        ];
        for (col, field) in fields.into_iter().enumerate() {
            write_field(worksheet, r, col as u16, field)?;
        }

        let levels = listing
            .levels
            .iter()
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", ");
        worksheet
            .write_string(r, 9, &levels)
            .map_err(|e| AppError::XlsxError(format!("Failed to write levels: {}", e)))?;

        let fields = [
            &listing.transaction_type,
            &listing.item_type,
            &listing.latitude,
            &listing.longitude,
            &listing.url,
            &listing.provider_name,
        ];
        for (offset, field) in fields.into_iter().enumerate() {
            write_field(worksheet, r, 10 + offset as u16, field)?;
        }

        worksheet
            .write_string(r, 16, if listing.is_commercial { "Yes" } else { "No" })
            .map_err(|e| AppError::XlsxError(format!("Failed to write commercial flag: {}", e)))?;

        worksheet
            .write_string(r, 17, listing.captured_at.to_rfc3339())
            .map_err(|e| AppError::XlsxError(format!("Failed to write capture time: {}", e)))?;
    }

    workbook
        .save(path)
        .map_err(|e| AppError::XlsxError(format!("Failed to save workbook: {}", e)))?;

    tracing::info!("Wrote {} listings to {}", listings.len(), path.display());
    Ok(())
}

// Numbers stay numeric so the sheet can sort and sum them.
fn write_field(worksheet: &mut Worksheet, row: u32, col: u16, field: &Field) -> AppResult<()> {
    let result = match field.as_value() {
        Some(Value::Number(n)) => match n.as_f64() {
            Some(n) => worksheet.write_number(row, col, n),
            None => worksheet.write_string(row, col, n.to_string()),
        },
        _ => worksheet.write_string(row, col, field.display()),
    };
    result
        .map(|_| ())
        .map_err(|e| AppError::XlsxError(format!("Failed to write column {}: {}", HEADERS[col as usize], e)))
}
