//! Filtering and search-field dispatch.

mod filter;
mod search;

pub use filter::{Condition, Filter, Predicate};
pub use search::{dispatch, SearchDispatch, SearchStage};
