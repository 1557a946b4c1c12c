//! Timesheet handlers.
//!
//! Any authenticated user may file a timesheet for themselves; it starts in
//! PENDING and only an administrator may move it through the review states.
//! Lists join the owning user before searching, so `user.name`-style
//! searches observe joined data.

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use haven_store::core::{expand_one, list_with_relations, Join};
use haven_store::query::{Filter, SearchStage};
use haven_store::types::{EntityKind, TimesheetStatus};
use haven_store::DocumentStore;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::AuthUser;
use crate::error::{RestError, RestResult};
use crate::extractors::ListParams;
use crate::handlers::{parse_record_id, search_condition};
use crate::models::{CreateTimesheetRequest, TimesheetStatusRequest, UpdateTimesheetRequest};
use crate::responses;
use crate::state::AppState;

/// Handler for listing timesheets.
///
/// # HTTP Request
///
/// `GET /timesheets?page&limit&search_field&search_text`
pub async fn list_timesheets_handler<S>(
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
    if let Some(dispatched) = search_condition(&params, EntityKind::Timesheet)? {
        match dispatched.stage {
            SearchStage::Direct => direct = direct.and(dispatched.condition),
            SearchStage::PostJoin => post_join = post_join.and(dispatched.condition),
        }
    }

    let page = list_with_relations(
        state.store(),
        EntityKind::Timesheet,
        &direct,
        &[Join::user()],
        &post_join,
        &params.page_request(),
    )
    .await?;
    Ok(responses::page(page))
}

/// Handler for reading a timesheet.
///
/// # HTTP Request
///
/// `GET /timesheets/{id}`
pub async fn get_timesheet_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::Timesheet, &id)?;
    let record = state.store().require(EntityKind::Timesheet, record_id).await?;
    let expanded = expand_one(state.store(), record.to_json(), &[Join::user()]).await?;
    Ok(responses::ok(expanded))
}

/// Handler for filing a timesheet.
///
/// # HTTP Request
///
/// `POST /timesheets`
///
/// The timesheet is filed for the caller and starts PENDING.
pub async fn create_timesheet_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Json(body): Json<CreateTimesheetRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    let record = state
        .store()
        .insert(
            EntityKind::Timesheet,
            json!({
                "userId": caller.id,
                "date": body.date,
                "hoursWorked": body.hours_worked,
                "notes": body.notes,
                "status": TimesheetStatus::Pending,
            }),
        )
        .await?;
    debug!(id = %record.id, user = %caller.id, "timesheet filed");
    Ok(responses::created(record.to_json()))
}

/// Handler for updating a timesheet.
///
/// # HTTP Request
///
/// `PUT /timesheets/{id}`
///
/// Edits the filed fields only; the review status moves through the
/// dedicated status endpoint.
pub async fn update_timesheet_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateTimesheetRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::Timesheet, &id)?;

    let mut changes = serde_json::Map::new();
    if let Some(date) = body.date {
        changes.insert("date".to_string(), json!(date));
    }
    if let Some(hours) = body.hours_worked {
        changes.insert("hoursWorked".to_string(), json!(hours));
    }
    if let Some(notes) = body.notes {
        changes.insert("notes".to_string(), json!(notes));
    }

    let updated = state
        .store()
        .update(EntityKind::Timesheet, record_id, Value::Object(changes))
        .await?
        .ok_or_else(|| RestError::not_found(format!("timesheet not found: {}", id)))?;
    debug!(id = %updated.id, "timesheet updated");
    Ok(responses::ok(updated.to_json()))
}

/// Handler for moving a timesheet through review.
///
/// # HTTP Request
///
/// `PATCH /timesheets/{id}/status`
///
/// Administrator only; records who made the call in `statusUpdatedBy`.
pub async fn timesheet_status_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<TimesheetStatusRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::Timesheet, &id)?;
    let updated = state
        .store()
        .update(
            EntityKind::Timesheet,
            record_id,
            json!({"status": body.status, "statusUpdatedBy": caller.id}),
        )
        .await?
        .ok_or_else(|| RestError::not_found(format!("timesheet not found: {}", id)))?;
    debug!(id = %updated.id, status = ?body.status, "timesheet status changed");
    Ok(responses::ok(updated.to_json()))
}

/// Handler for deleting a timesheet.
///
/// # HTTP Request
///
/// `DELETE /timesheets/{id}`
pub async fn delete_timesheet_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::Timesheet, &id)?;
    if !state.store().delete(EntityKind::Timesheet, record_id).await? {
        return Err(RestError::not_found(format!("timesheet not found: {}", id)));
    }
    debug!(%id, "timesheet deleted");
    Ok(responses::message("Timesheet deleted"))
}
