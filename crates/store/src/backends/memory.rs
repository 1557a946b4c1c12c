//! The in-memory backend.
//!
//! Records live in per-entity vectors (creation order) behind a
//! `parking_lot::RwLock`. This is the reference backend the server and the
//! test suites run against; it enforces the same unique-field constraints a
//! database index would, so the binder's race guard is exercised for real.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;

use crate::core::DocumentStore;
use crate::error::{EntityError, StoreResult, ValidationError};
use crate::query::Filter;
use crate::types::{EntityKind, Record, RecordId};

/// An in-memory [`DocumentStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<BTreeMap<EntityKind, Vec<Record>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique(
        kind: EntityKind,
        records: &[Record],
        content: &Value,
        exclude: Option<RecordId>,
    ) -> StoreResult<()> {
        for field in kind.unique_fields() {
            let Some(candidate) = content.get(*field) else {
                continue;
            };
            if candidate.is_null() {
                continue;
            }
            let taken = records.iter().any(|record| {
                Some(record.id) != exclude && record.content.get(*field) == Some(candidate)
            });
            if taken {
                return Err(EntityError::Duplicate { kind, field }.into());
            }
        }
        Ok(())
    }
}

fn require_object(value: &Value) -> StoreResult<()> {
    if value.is_object() {
        Ok(())
    } else {
        Err(ValidationError::InvalidBody {
            message: "record body must be a JSON object".to_string(),
        }
        .into())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, kind: EntityKind, content: Value) -> StoreResult<Record> {
        require_object(&content)?;
        let mut collections = self.collections.write();
        let records = collections.entry(kind).or_default();
        Self::check_unique(kind, records, &content, None)?;
        let record = Record::new(content);
        records.push(record.clone());
        Ok(record)
    }

    async fn get(&self, kind: EntityKind, id: RecordId) -> StoreResult<Option<Record>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&kind)
            .and_then(|records| records.iter().find(|record| record.id == id).cloned()))
    }

    async fn find(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Vec<Record>> {
        let collections = self.collections.read();
        Ok(collections
            .get(&kind)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| filter.matches(&record.to_json()))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_one(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Option<Record>> {
        let collections = self.collections.read();
        Ok(collections.get(&kind).and_then(|records| {
            records
                .iter()
                .find(|record| filter.matches(&record.to_json()))
                .cloned()
        }))
    }

    async fn count(&self, kind: EntityKind, filter: &Filter) -> StoreResult<u64> {
        let collections = self.collections.read();
        Ok(collections
            .get(&kind)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| filter.matches(&record.to_json()))
                    .count() as u64
            })
            .unwrap_or(0))
    }

    async fn update(
        &self,
        kind: EntityKind,
        id: RecordId,
        changes: Value,
    ) -> StoreResult<Option<Record>> {
        require_object(&changes)?;
        let mut collections = self.collections.write();
        let records = collections.entry(kind).or_default();

        let Some(position) = records.iter().position(|record| record.id == id) else {
            return Ok(None);
        };
        let mut merged = records[position].content.clone();
        if let (Some(target), Some(source)) = (merged.as_object_mut(), changes.as_object()) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }
        Self::check_unique(kind, records, &merged, Some(id))?;

        let record = &mut records[position];
        record.content = merged;
        record.updated_at = chrono::Utc::now();
        Ok(Some(record.clone()))
    }

    async fn delete(&self, kind: EntityKind, id: RecordId) -> StoreResult<bool> {
        let mut collections = self.collections.write();
        let Some(records) = collections.get_mut(&kind) else {
            return Ok(false);
        };
        let before = records.len();
        records.retain(|record| record.id != id);
        Ok(records.len() < before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Condition;
    use serde_json::json;

    #[tokio::test]
    async fn insert_and_get_round_trip() {
        let store = MemoryStore::new();
        let record = store
            .insert(EntityKind::User, json!({"email": "a@b.com"}))
            .await
            .unwrap();
        let fetched = store.get(EntityKind::User, record.id).await.unwrap();
        assert_eq!(fetched.unwrap().content["email"], "a@b.com");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let store = MemoryStore::new();
        store
            .insert(EntityKind::User, json!({"email": "a@b.com"}))
            .await
            .unwrap();
        let err = store
            .insert(EntityKind::User, json!({"email": "a@b.com"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn update_merges_shallowly() {
        let store = MemoryStore::new();
        let record = store
            .insert(EntityKind::User, json!({"email": "a@b.com", "name": "A"}))
            .await
            .unwrap();
        let updated = store
            .update(EntityKind::User, record.id, json!({"name": "B"}))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.content["name"], "B");
        assert_eq!(updated.content["email"], "a@b.com");
        assert!(updated.updated_at >= record.updated_at);
    }

    #[tokio::test]
    async fn update_missing_record_returns_none() {
        let store = MemoryStore::new();
        let result = store
            .update(EntityKind::User, RecordId::new(), json!({"name": "B"}))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_reports_existence() {
        let store = MemoryStore::new();
        let record = store
            .insert(EntityKind::Document, json!({"title": "x"}))
            .await
            .unwrap();
        assert!(store.delete(EntityKind::Document, record.id).await.unwrap());
        assert!(!store.delete(EntityKind::Document, record.id).await.unwrap());
    }

    #[tokio::test]
    async fn find_applies_filter_to_merged_view() {
        let store = MemoryStore::new();
        let record = store
            .insert(EntityKind::Document, json!({"title": "Care rota"}))
            .await
            .unwrap();
        store
            .insert(EntityKind::Document, json!({"title": "Menu"}))
            .await
            .unwrap();

        let by_id = Filter::all().and(Condition::id_eq("id", &record.id.to_string()));
        let found = store.find(EntityKind::Document, &by_id).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, record.id);
    }

    #[tokio::test]
    async fn update_cannot_steal_unique_value() {
        let store = MemoryStore::new();
        store
            .insert(EntityKind::User, json!({"email": "a@b.com"}))
            .await
            .unwrap();
        let second = store
            .insert(EntityKind::User, json!({"email": "b@b.com"}))
            .await
            .unwrap();
        let err = store
            .update(EntityKind::User, second.id, json!({"email": "a@b.com"}))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::StoreError::Entity(EntityError::Duplicate { .. })
        ));
    }
}
