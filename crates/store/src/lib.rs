//! Haven Care Server Document Store
//!
//! This crate provides the document-store layer for the Haven care-home
//! administration server: entity metadata, filtering and search-field
//! dispatch, the generic paginator, the relation-joining list pipeline, the
//! role-scoped profile binder, and the company-info singleton, all written
//! against the [`DocumentStore`] trait with an in-memory reference backend.
//!
//! # Architecture
//!
//! - [`types`] - Entity metadata, records, roles, and pagination types
//! - [`error`] - Error types for all operations
//! - [`query`] - Filters and the per-entity search-field dispatcher
//! - [`core`] - The [`DocumentStore`] trait and the query pipelines
//! - [`profiles`] - The role-scoped profile binder
//! - [`company`] - The company-info singleton upsert
//! - [`backends`] - Backend implementations
//!
//! # Quick Start
//!
//! ```no_run
//! use haven_store::backends::MemoryStore;
//! use haven_store::core::{paginate, DocumentStore, Expansion};
//! use haven_store::query::Filter;
//! use haven_store::types::{EntityKind, PageRequest};
//! use serde_json::json;
//!
//! # async fn demo() -> haven_store::StoreResult<()> {
//! let store = MemoryStore::new();
//! store
//!     .insert(EntityKind::User, json!({"email": "admin@example.com"}))
//!     .await?;
//!
//! let page = paginate(
//!     &store,
//!     EntityKind::User,
//!     &Filter::all(),
//!     &PageRequest::new(1, 20),
//!     &[],
//! )
//! .await?;
//! assert_eq!(page.total, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod company;
pub mod core;
pub mod error;
pub mod profiles;
pub mod query;
pub mod types;

// Re-export commonly used types at crate root
pub use crate::core::DocumentStore;
pub use error::{StoreError, StoreResult};
pub use types::{EntityKind, Page, PageRequest, ProfileKind, Record, RecordId, Role};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
