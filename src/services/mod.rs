pub mod catalog_service;
pub mod search;

pub use catalog_service::{CatalogService, CatalogSnapshot, CategorySummary, FilterOptions, SharedRecord};
pub use search::SearchCriteria;
