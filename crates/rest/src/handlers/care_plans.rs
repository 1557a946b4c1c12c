//! Care-plan handlers.
//!
//! Care plans carry an optional PDF and cover image, each arriving through
//! its own upload header, plus a list of external media links. Media links
//! only ever grow: updates append to the stored list instead of replacing
//! it. Plan names are unique across the collection.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use haven_store::core::paginate;
use haven_store::query::{Condition, Filter};
use haven_store::types::EntityKind;
use haven_store::DocumentStore;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::AuthUser;
use crate::error::{RestError, RestResult};
use crate::extractors::{public_link, ListParams, UploadedFiles};
use crate::handlers::parse_record_id;
use crate::models::{CreateCarePlanRequest, UpdateCarePlanRequest};
use crate::responses;
use crate::state::AppState;

/// Free-text search over plan name and description.
#[derive(Debug, Deserialize)]
pub struct CarePlanQuery {
    search: Option<String>,
}

/// Replaces the stored PDF and image filenames with their public links. The
/// raw stored names are dropped from the payload.
fn shape_plan(base_url: &str, mut plan: Value) -> Value {
    if let Some(map) = plan.as_object_mut() {
        let pdf = map.remove("pdfFile");
        let image = map.remove("imageFile");
        map.insert(
            "pdfUrl".to_string(),
            public_link(base_url, "care-plan-pdfs", pdf.as_ref().and_then(Value::as_str)),
        );
        map.insert(
            "imageUrl".to_string(),
            public_link(
                base_url,
                "care-plan-images",
                image.as_ref().and_then(Value::as_str),
            ),
        );
    }
    plan
}

/// Handler for listing care plans.
///
/// # HTTP Request
///
/// `GET /care-plans?page&limit&search`
pub async fn list_care_plans_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    params: ListParams,
    Query(query): Query<CarePlanQuery>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;

    let filter = match query.search.as_deref() {
        Some(text) if !text.is_empty() => Filter::all().any_of(vec![
            Condition::contains("name", text),
            Condition::contains("description", text),
            Condition::contains("level", text),
            Condition::contains("specializedCare", text),
        ]),
        _ => Filter::all(),
    };
    let page = paginate(
        state.store(),
        EntityKind::CarePlan,
        &filter,
        &params.page_request(),
        &[],
    )
    .await?;
    let base = state.base_url().to_string();
    Ok(responses::page(page.map(move |plan| shape_plan(&base, plan))))
}

/// Handler for reading a care plan.
///
/// # HTTP Request
///
/// `GET /care-plans/{id}`
pub async fn get_care_plan_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::CarePlan, &id)?;
    let record = state.store().require(EntityKind::CarePlan, record_id).await?;
    Ok(responses::ok(shape_plan(state.base_url(), record.to_json())))
}

/// Handler for creating a care plan.
///
/// # HTTP Request
///
/// `POST /care-plans`
///
/// The PDF and cover image are both optional at creation.
pub async fn create_care_plan_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    files: UploadedFiles,
    Json(body): Json<CreateCarePlanRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;

    let record = state
        .store()
        .insert(
            EntityKind::CarePlan,
            json!({
                "name": body.name,
                "description": body.description,
                "pdfFile": files.pdf,
                "imageFile": files.image,
                "mediaLinks": body.media_links.unwrap_or_default(),
            }),
        )
        .await?;
    debug!(id = %record.id, "care plan created");
    Ok(responses::created(shape_plan(
        state.base_url(),
        record.to_json(),
    )))
}

/// Handler for updating a care plan.
///
/// # HTTP Request
///
/// `PUT /care-plans/{id}`
///
/// Media links in the body are appended to the stored list; the PDF and
/// image are only rewritten when a new upload accompanies the request.
pub async fn update_care_plan_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
    files: UploadedFiles,
    Json(body): Json<UpdateCarePlanRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::CarePlan, &id)?;
    let existing = state.store().require(EntityKind::CarePlan, record_id).await?;

    let mut changes = serde_json::Map::new();
    if let Some(name) = body.name {
        changes.insert("name".to_string(), json!(name));
    }
    if let Some(description) = body.description {
        changes.insert("description".to_string(), json!(description));
    }
    if let Some(links) = body.media_links {
        let mut merged: Vec<Value> = existing
            .content
            .get("mediaLinks")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        merged.extend(links.into_iter().map(Value::String));
        changes.insert("mediaLinks".to_string(), Value::Array(merged));
    }
    if let Some(pdf) = files.pdf {
        changes.insert("pdfFile".to_string(), json!(pdf));
    }
    if let Some(image) = files.image {
        changes.insert("imageFile".to_string(), json!(image));
    }

    let updated = state
        .store()
        .update(EntityKind::CarePlan, record_id, Value::Object(changes))
        .await?
        .ok_or_else(|| RestError::not_found(format!("careplan not found: {}", id)))?;
    debug!(id = %updated.id, "care plan updated");
    Ok(responses::ok(shape_plan(state.base_url(), updated.to_json())))
}

/// Handler for deleting a care plan.
///
/// # HTTP Request
///
/// `DELETE /care-plans/{id}`
pub async fn delete_care_plan_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::CarePlan, &id)?;
    if !state.store().delete(EntityKind::CarePlan, record_id).await? {
        return Err(RestError::not_found(format!("careplan not found: {}", id)));
    }
    debug!(%id, "care plan deleted");
    Ok(responses::message("Care plan deleted"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_shaping_swaps_files_for_links() {
        let shaped = shape_plan(
            "http://localhost:8080",
            json!({"name": "Dementia care", "pdfFile": "plan.pdf", "imageFile": "cover.png"}),
        );
        assert_eq!(
            shaped["pdfUrl"],
            "http://localhost:8080/care-plan-pdfs/data/plan.pdf"
        );
        assert_eq!(
            shaped["imageUrl"],
            "http://localhost:8080/care-plan-images/data/cover.png"
        );
        assert!(shaped.get("pdfFile").is_none());
        assert!(shaped.get("imageFile").is_none());

        let shaped = shape_plan("http://localhost:8080", json!({"name": "Respite"}));
        assert!(shaped["pdfUrl"].is_null());
        assert!(shaped["imageUrl"].is_null());
    }
}
