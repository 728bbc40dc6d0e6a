pub mod catalog_loader;

pub use catalog_loader::{load_catalog, parse_catalog, validate_records, CatalogFile, CatalogFormat};
