//! The storage trait and the query pipelines built on it.

mod aggregate;
mod paginate;
mod store;

pub use aggregate::{expand_one, list_with_relations, Join};
pub use paginate::{paginate, Expansion};
pub use store::DocumentStore;
