use crate::errors::AppResult;
use crate::scraper::NormalizedListing;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes listings as a pretty-printed JSON array.
///
/// serde_json emits UTF-8 as-is, so Greek text stays readable in the file.
pub fn save_listings_json(listings: &[NormalizedListing], path: &Path) -> AppResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, listings)?;
    writer.flush()?;

    tracing::info!("Data saved to {}", path.display());
    Ok(())
}
