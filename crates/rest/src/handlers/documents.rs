//! Document handlers.
//!
//! Documents are metadata records over files held by the upload boundary.
//! Lists join the creator and the associated users before searching, so
//! `createdBy.email`-style searches observe joined data; the joined creator
//! is collapsed to a single object. Updates are restricted to the creator.

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use chrono::Utc;
use haven_store::core::{expand_one, list_with_relations, Join};
use haven_store::query::{Filter, SearchStage};
use haven_store::types::EntityKind;
use haven_store::DocumentStore;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::AuthUser;
use crate::error::{RestError, RestResult};
use crate::extractors::{public_link, ListParams, UploadedFiles};
use crate::handlers::{parse_record_id, search_condition};
use crate::models::{CreateDocumentRequest, UpdateDocumentRequest};
use crate::responses;
use crate::state::AppState;

fn joins() -> [Join; 2] {
    [Join::created_by(), Join::associated_users()]
}

/// Replaces the stored filename with its public link, `null` when absent.
/// The raw stored name is dropped from the payload.
fn shape_document(base_url: &str, mut document: Value) -> Value {
    if let Some(map) = document.as_object_mut() {
        let filename = map.remove("filename");
        map.insert(
            "fileUrl".to_string(),
            public_link(base_url, "documents", filename.as_ref().and_then(Value::as_str)),
        );
    }
    document
}

/// Handler for listing documents.
///
/// # HTTP Request
///
/// `GET /documents?page&limit&search_field&search_text`
pub async fn list_documents_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    params: ListParams,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;

    let mut direct = Filter::all();
    let mut post_join = Filter::all();
    if let Some(dispatched) = search_condition(&params, EntityKind::Document)? {
        match dispatched.stage {
            SearchStage::Direct => direct = direct.and(dispatched.condition),
            SearchStage::PostJoin => post_join = post_join.and(dispatched.condition),
        }
    }

    let page = list_with_relations(
        state.store(),
        EntityKind::Document,
        &direct,
        &joins(),
        &post_join,
        &params.page_request(),
    )
    .await?;
    let base = state.base_url().to_string();
    Ok(responses::page(
        page.map(move |document| shape_document(&base, document)),
    ))
}

/// Handler for reading a document.
///
/// # HTTP Request
///
/// `GET /documents/{id}`
pub async fn get_document_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::Document, &id)?;
    let record = state.store().require(EntityKind::Document, record_id).await?;
    let expanded = expand_one(state.store(), record.to_json(), &joins()).await?;
    Ok(responses::ok(shape_document(state.base_url(), expanded)))
}

/// Handler for creating a document.
///
/// # HTTP Request
///
/// `POST /documents`
///
/// The uploaded file is mandatory; the caller becomes the creator.
pub async fn create_document_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    files: UploadedFiles,
    Json(body): Json<CreateDocumentRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let filename = files.require_file("document")?;

    let record = state
        .store()
        .insert(
            EntityKind::Document,
            json!({
                "title": body.title,
                "description": body.description,
                "filename": filename,
                "uploadedAt": Utc::now().to_rfc3339(),
                "createdBy": caller.id,
                "associatedUsers": body.associated_users.unwrap_or_default(),
            }),
        )
        .await?;
    debug!(id = %record.id, "document created");
    Ok(responses::created(shape_document(
        state.base_url(),
        record.to_json(),
    )))
}

/// Handler for updating a document.
///
/// # HTTP Request
///
/// `PUT /documents/{id}`
///
/// Only the creator may update; anyone else gets a 403. The stored file is
/// only rewritten when a new upload accompanies the request.
pub async fn update_document_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
    files: UploadedFiles,
    Json(body): Json<UpdateDocumentRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::Document, &id)?;
    let existing = state.store().require(EntityKind::Document, record_id).await?;

    if existing.str_field("createdBy") != Some(caller.id.as_str()) {
        return Err(RestError::Forbidden {
            message: "Only the creator may modify this document".to_string(),
        });
    }

    let mut changes = serde_json::Map::new();
    if let Some(title) = body.title {
        changes.insert("title".to_string(), json!(title));
    }
    if let Some(description) = body.description {
        changes.insert("description".to_string(), json!(description));
    }
    if let Some(associated) = body.associated_users {
        changes.insert("associatedUsers".to_string(), json!(associated));
    }
    if let Some(filename) = files.file {
        changes.insert("filename".to_string(), json!(filename));
    }

    let updated = state
        .store()
        .update(EntityKind::Document, record_id, Value::Object(changes))
        .await?
        .ok_or_else(|| RestError::not_found(format!("document not found: {}", id)))?;
    debug!(id = %updated.id, "document updated");
    Ok(responses::ok(shape_document(
        state.base_url(),
        updated.to_json(),
    )))
}

/// Handler for deleting a document.
///
/// # HTTP Request
///
/// `DELETE /documents/{id}`
pub async fn delete_document_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::Document, &id)?;
    if !state.store().delete(EntityKind::Document, record_id).await? {
        return Err(RestError::not_found(format!("document not found: {}", id)));
    }
    debug!(%id, "document deleted");
    Ok(responses::message("Document deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_shaping_swaps_the_filename_for_a_link() {
        let shaped = shape_document(
            "http://localhost:8080",
            json!({"title": "Menu", "filename": "menu.pdf"}),
        );
        assert_eq!(shaped["fileUrl"], "http://localhost:8080/documents/data/menu.pdf");
        assert!(shaped.get("filename").is_none());

        let shaped = shape_document("http://localhost:8080", json!({"title": "Menu"}));
        assert!(shaped["fileUrl"].is_null());
    }
}
