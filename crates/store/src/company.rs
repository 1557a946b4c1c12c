//! The company-info singleton.
//!
//! The collection holds zero or one record. Reads report absence as `None`;
//! writes are an explicit find-or-create upsert, so the first write creates
//! the row and every later write merges into it.

use serde_json::Value;
use tracing::debug;

use crate::core::DocumentStore;
use crate::error::{BackendError, StoreResult};
use crate::query::Filter;
use crate::types::{EntityKind, Record};

/// Reads the singleton, if it has been written yet.
pub async fn get_company<S>(store: &S) -> StoreResult<Option<Record>>
where
    S: DocumentStore + ?Sized,
{
    store.find_one(EntityKind::CompanyInfo, &Filter::all()).await
}

/// Writes the singleton: merges into the existing record or creates it.
pub async fn upsert_company<S>(store: &S, changes: Value) -> StoreResult<Record>
where
    S: DocumentStore + ?Sized,
{
    match get_company(store).await? {
        Some(existing) => {
            debug!(id = %existing.id, "updating company info");
            store
                .update(EntityKind::CompanyInfo, existing.id, changes)
                .await?
                .ok_or_else(|| {
                    BackendError::Internal {
                        message: "company info row vanished mid-upsert".to_string(),
                    }
                    .into()
                })
        }
        None => {
            debug!("creating company info");
            store.insert(EntityKind::CompanyInfo, changes).await
        }
    }
}
