pub mod json;
pub mod xlsx;

pub use json::save_listings_json;
pub use xlsx::export_listings_xlsx;
