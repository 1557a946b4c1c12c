//! Stored record representation.
//!
//! Every entity is persisted as a [`Record`]: an opaque JSON body plus the
//! identifier and timestamps the store maintains. Handlers and the query
//! layer work on the merged JSON view produced by [`Record::to_json`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// A record identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generates a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses an identifier from its string form.
    ///
    /// Returns `None` for syntactically invalid input; callers searching by
    /// id treat that as "no match" rather than an error.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s).ok().map(Self)
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// A stored record: the entity body plus store-maintained metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    /// The record identifier.
    pub id: RecordId,

    /// The entity body. Always a JSON object.
    pub content: Value,

    /// When the record was first inserted.
    pub created_at: DateTime<Utc>,

    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Creates a record with a fresh id and current timestamps.
    pub fn new(content: Value) -> Self {
        let now = Utc::now();
        Self {
            id: RecordId::new(),
            content,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a string field from the record body, if present.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.content.get(field).and_then(Value::as_str)
    }

    /// Merges the id and timestamps into the body, producing the JSON view
    /// clients see.
    ///
    /// Body fields named `id`, `createdAt`, or `updatedAt` are overwritten;
    /// the store's metadata is authoritative.
    pub fn to_json(&self) -> Value {
        let mut map = match &self.content {
            Value::Object(map) => map.clone(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other.clone());
                map
            }
        };
        map.insert("id".to_string(), Value::String(self.id.to_string()));
        map.insert(
            "createdAt".to_string(),
            Value::String(self.created_at.to_rfc3339()),
        );
        map.insert(
            "updatedAt".to_string(),
            Value::String(self.updated_at.to_rfc3339()),
        );
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_rejects_invalid_ids() {
        assert!(RecordId::parse("not-a-uuid").is_none());
        let id = RecordId::new();
        assert_eq!(RecordId::parse(&id.to_string()), Some(id));
    }

    #[test]
    fn to_json_merges_metadata() {
        let record = Record::new(json!({"email": "a@b.com", "id": "stale"}));
        let view = record.to_json();
        assert_eq!(view["email"], "a@b.com");
        assert_eq!(view["id"], record.id.to_string());
        assert!(view.get("createdAt").is_some());
        assert!(view.get("updatedAt").is_some());
    }

    #[test]
    fn str_field_reads_body() {
        let record = Record::new(json!({"title": "Care rota", "count": 3}));
        assert_eq!(record.str_field("title"), Some("Care rota"));
        assert_eq!(record.str_field("count"), None);
        assert_eq!(record.str_field("missing"), None);
    }
}
