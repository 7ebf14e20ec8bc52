//! Catalog data: record types, the category registry, loading and the
//! in-memory store the query engine reads from.

pub mod categories;
pub mod dates;
pub mod loader;
pub mod store;
pub mod types;

pub use loader::{load_catalog, load_catalog_file};
pub use store::{CatalogStats, CategorySummary, RecordStore};
pub use types::{ToolKind, ToolRecord};
