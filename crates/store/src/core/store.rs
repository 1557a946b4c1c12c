//! The storage abstraction.
//!
//! [`DocumentStore`] is the seam between the query layer and whatever engine
//! holds the records. Backends implement the primitive operations; the
//! paginator, aggregation pipeline, and profile binder are written against
//! the trait and work with any backend.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{EntityError, StoreResult};
use crate::query::Filter;
use crate::types::{EntityKind, Record, RecordId};

/// Primitive record operations a storage backend provides.
///
/// `insert` and `update` enforce the entity's unique fields
/// ([`EntityKind::unique_fields`]); a violation surfaces as
/// [`EntityError::Duplicate`]. `update` performs a shallow field merge:
/// top-level fields in `changes` overwrite, everything else is kept.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Inserts a new record and returns it.
    async fn insert(&self, kind: EntityKind, content: Value) -> StoreResult<Record>;

    /// Fetches a record by id.
    async fn get(&self, kind: EntityKind, id: RecordId) -> StoreResult<Option<Record>>;

    /// Returns all matching records in stable (creation) order.
    async fn find(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Vec<Record>>;

    /// Returns the first matching record.
    async fn find_one(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Option<Record>>;

    /// Counts matching records.
    async fn count(&self, kind: EntityKind, filter: &Filter) -> StoreResult<u64>;

    /// Shallow-merges `changes` into the record. Returns `None` when the
    /// record does not exist.
    async fn update(
        &self,
        kind: EntityKind,
        id: RecordId,
        changes: Value,
    ) -> StoreResult<Option<Record>>;

    /// Deletes a record. Returns whether it existed.
    async fn delete(&self, kind: EntityKind, id: RecordId) -> StoreResult<bool>;

    /// Fetches a record by id, converting absence into
    /// [`EntityError::NotFound`].
    async fn require(&self, kind: EntityKind, id: RecordId) -> StoreResult<Record> {
        self.get(kind, id).await?.ok_or_else(|| {
            EntityError::NotFound {
                kind,
                id: id.to_string(),
            }
            .into()
        })
    }
}
