pub mod deadline;
pub mod loaders;
pub mod scholarship;
pub mod sort_key;

pub use deadline::parse_deadline;
pub use loaders::{load_catalog, validate_records, CatalogFile};
pub use scholarship::ScholarshipRecord;
pub use sort_key::{CatalogAction, SortKey};
