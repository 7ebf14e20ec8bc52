//! Search, filter and sort over the catalog.

pub mod engine;
pub mod spec;

pub use engine::query;
pub use spec::{QuerySpec, SortDirection, SortKey, FACET_KEYS};
