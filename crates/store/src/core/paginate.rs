//! The generic paginator.
//!
//! One code path serves every simple list endpoint: expand relations, filter,
//! count, slice. Expansion runs before the filter is evaluated, so a search
//! over an expanded path (say `userId.name`) observes the joined user rather
//! than the raw id.

use serde_json::Value;
use tracing::debug;

use crate::core::store::DocumentStore;
use crate::error::StoreResult;
use crate::query::Filter;
use crate::types::{EntityKind, Page, PageRequest, RecordId};

/// A relation expansion the paginator applies in place: the record's `field`
/// holds a target-entity id (or an array of them) and is replaced with the
/// joined record, optionally narrowed to `select` fields.
#[derive(Debug, Clone, Copy)]
pub struct Expansion {
    /// The field holding the foreign id(s).
    pub field: &'static str,
    /// The entity the id refers to.
    pub target: EntityKind,
    /// Fields to retain from the joined record; `None` keeps everything.
    pub select: Option<&'static [&'static str]>,
}

impl Expansion {
    /// The user expansion most profile lists use: `userId` replaced with the
    /// user's name, email, role, and active flag.
    pub fn user_id() -> Self {
        Self {
            field: "userId",
            target: EntityKind::User,
            select: Some(&["name", "email", "role", "active"]),
        }
    }
}

/// Lists an entity: expand, filter, count, slice.
///
/// The `documents` relation is expanded unconditionally for entities that
/// declare it, in addition to any caller-supplied expansions. The filter is
/// evaluated against the fully expanded document.
pub async fn paginate<S>(
    store: &S,
    kind: EntityKind,
    filter: &Filter,
    request: &PageRequest,
    expansions: &[Expansion],
) -> StoreResult<Page<Value>>
where
    S: DocumentStore + ?Sized,
{
    let records = store.find(kind, &Filter::all()).await?;
    debug!(entity = %kind, candidates = records.len(), "paginating");

    let mut expanded = Vec::with_capacity(records.len());
    for record in records {
        let mut document = record.to_json();
        if kind.has_documents_relation() {
            expand_field(store, &mut document, &documents_expansion()).await?;
        }
        for expansion in expansions {
            expand_field(store, &mut document, expansion).await?;
        }
        if filter.matches(&document) {
            expanded.push(document);
        }
    }

    let total = expanded.len() as u64;
    let (_, limit) = request.effective();
    let records = expanded
        .into_iter()
        .skip(request.skip())
        .take(limit as usize)
        .collect();
    Ok(Page::new(records, total, request))
}

fn documents_expansion() -> Expansion {
    Expansion {
        field: "documents",
        target: EntityKind::Document,
        select: None,
    }
}

/// Replaces a foreign-id field with the joined record in place.
///
/// A scalar id that resolves to nothing becomes `null`; unresolvable array
/// elements are dropped. Ids that fail to parse are treated as unresolved.
async fn expand_field<S>(
    store: &S,
    document: &mut Value,
    expansion: &Expansion,
) -> StoreResult<()>
where
    S: DocumentStore + ?Sized,
{
    let Some(current) = document.get(expansion.field).cloned() else {
        return Ok(());
    };
    let replacement = match current {
        Value::String(raw) => match resolve(store, expansion, &raw).await? {
            Some(joined) => joined,
            None => Value::Null,
        },
        Value::Array(items) => {
            let mut joined = Vec::with_capacity(items.len());
            for item in items {
                if let Some(raw) = item.as_str() {
                    if let Some(value) = resolve(store, expansion, raw).await? {
                        joined.push(value);
                    }
                } else {
                    // Already expanded or not an id reference.
                    joined.push(item);
                }
            }
            Value::Array(joined)
        }
        other => other,
    };
    if let Some(map) = document.as_object_mut() {
        map.insert(expansion.field.to_string(), replacement);
    }
    Ok(())
}

async fn resolve<S>(store: &S, expansion: &Expansion, raw: &str) -> StoreResult<Option<Value>>
where
    S: DocumentStore + ?Sized,
{
    let Some(id) = RecordId::parse(raw) else {
        return Ok(None);
    };
    let Some(record) = store.get(expansion.target, id).await? else {
        return Ok(None);
    };
    Ok(Some(project(record.to_json(), expansion.select)))
}

/// Narrows a joined document to the selected fields (plus `id`).
fn project(document: Value, select: Option<&[&str]>) -> Value {
    let Some(fields) = select else {
        return document;
    };
    let Value::Object(map) = document else {
        return document;
    };
    let projected = map
        .into_iter()
        .filter(|(key, _)| key == "id" || fields.contains(&key.as_str()))
        .collect();
    Value::Object(projected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn project_keeps_id_and_selected_fields() {
        let document = json!({
            "id": "x",
            "name": "Alice",
            "email": "a@b.com",
            "passwordHash": "secret"
        });
        let projected = project(document, Some(&["name", "email"]));
        assert_eq!(
            projected,
            json!({"id": "x", "name": "Alice", "email": "a@b.com"})
        );
    }

    #[test]
    fn project_without_select_is_identity() {
        let document = json!({"a": 1, "b": 2});
        assert_eq!(project(document.clone(), None), document);
    }
}
