//! The relation-joining list pipeline.
//!
//! Documents, timesheets, and attendance lists join one or more user
//! relations before searching and slicing. The pipeline runs the stages in a
//! fixed order: direct match, lookups, post-join match, count, skip/limit.
//! The total is counted after the post-join match so page counts stay
//! correct when the search addresses joined fields.

use serde_json::Value;
use tracing::debug;

use crate::core::store::DocumentStore;
use crate::error::StoreResult;
use crate::query::Filter;
use crate::types::{EntityKind, Page, PageRequest, RecordId};

/// A lookup stage: resolve the ids in `local_field` against `target` and
/// write the joined records to `alias`.
#[derive(Debug, Clone, Copy)]
pub struct Join {
    /// The field on the base record holding the foreign id(s).
    pub local_field: &'static str,
    /// The entity being joined.
    pub target: EntityKind,
    /// The output field the joined records are written to.
    pub alias: &'static str,
    /// Collapse the joined set to its first record (`null` when empty)
    /// instead of keeping an array.
    pub collapse: bool,
    /// Fields to retain from each joined record; `None` keeps everything.
    pub select: Option<&'static [&'static str]>,
}

impl Join {
    /// The creator join used by document lists.
    pub fn created_by() -> Self {
        Self {
            local_field: "createdBy",
            target: EntityKind::User,
            alias: "createdBy",
            collapse: true,
            select: Some(&["name", "email", "role"]),
        }
    }

    /// The associated-users join used by document lists.
    pub fn associated_users() -> Self {
        Self {
            local_field: "associatedUsers",
            target: EntityKind::User,
            alias: "associatedUsers",
            collapse: false,
            select: Some(&["name", "email", "role"]),
        }
    }

    /// The owning-user join used by timesheet and attendance lists.
    pub fn user() -> Self {
        Self {
            local_field: "userId",
            target: EntityKind::User,
            alias: "user",
            collapse: true,
            select: Some(&["name", "email", "role"]),
        }
    }
}

/// Runs the pipeline: direct match, lookups, post-join match, count, slice.
pub async fn list_with_relations<S>(
    store: &S,
    kind: EntityKind,
    direct: &Filter,
    joins: &[Join],
    post_join: &Filter,
    request: &PageRequest,
) -> StoreResult<Page<Value>>
where
    S: DocumentStore + ?Sized,
{
    let records = store.find(kind, direct).await?;
    debug!(entity = %kind, matched = records.len(), "running relation pipeline");

    let mut joined = Vec::with_capacity(records.len());
    for record in records {
        let mut document = record.to_json();
        for join in joins {
            apply_join(store, &mut document, join).await?;
        }
        if post_join.matches(&document) {
            joined.push(document);
        }
    }

    let total = joined.len() as u64;
    let (_, limit) = request.effective();
    let records = joined
        .into_iter()
        .skip(request.skip())
        .take(limit as usize)
        .collect();
    Ok(Page::new(records, total, request))
}

/// Joins a single record for a detail view, applying the same lookups as the
/// list pipeline.
pub async fn expand_one<S>(store: &S, record_json: Value, joins: &[Join]) -> StoreResult<Value>
where
    S: DocumentStore + ?Sized,
{
    let mut document = record_json;
    for join in joins {
        apply_join(store, &mut document, join).await?;
    }
    Ok(document)
}

async fn apply_join<S>(store: &S, document: &mut Value, join: &Join) -> StoreResult<()>
where
    S: DocumentStore + ?Sized,
{
    let ids = match document.get(join.local_field) {
        Some(Value::String(raw)) => vec![raw.clone()],
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    let mut matched = Vec::with_capacity(ids.len());
    for raw in ids {
        let Some(id) = RecordId::parse(&raw) else {
            continue;
        };
        if let Some(record) = store.get(join.target, id).await? {
            matched.push(project(record.to_json(), join.select));
        }
    }

    let value = if join.collapse {
        matched.into_iter().next().unwrap_or(Value::Null)
    } else {
        Value::Array(matched)
    };
    if let Some(map) = document.as_object_mut() {
        map.insert(join.alias.to_string(), value);
    }
    Ok(())
}

fn project(document: Value, select: Option<&[&str]>) -> Value {
    let Some(fields) = select else {
        return document;
    };
    let Value::Object(map) = document else {
        return document;
    };
    Value::Object(
        map.into_iter()
            .filter(|(key, _)| key == "id" || fields.contains(&key.as_str()))
            .collect(),
    )
}
