//! Reduced query specification and its translation to the engine's DSL

pub mod translator;
pub mod types;

pub use translator::translate;
pub use types::{Filters, GeoFilter, Page, QuerySpec, RangeSpec, SortSpec, TextQuery};
