//! User-selectable query parameters.
//!
//! The catalog is the closed set of competitions and seasons the dashboard
//! offers, the store holds the active [`Selection`] plus selector UI state,
//! and [`derive_key`] turns a selection into the key used by the result cache.

pub mod catalog;
pub mod query_key;
pub mod store;

pub use catalog::{Catalog, Competition};
pub use query_key::{QueryKey, derive_key};
pub use store::{ParameterStore, Selection, Selector, SelectorState};
