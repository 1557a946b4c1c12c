//! Attendance handlers.
//!
//! Same shape as timesheets: any authenticated user records their own
//! attendance, administrators manage the collection, and the dedicated
//! status endpoint records who changed the state.

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use haven_store::core::{expand_one, list_with_relations, Join};
use haven_store::query::{Filter, SearchStage};
use haven_store::types::EntityKind;
use haven_store::DocumentStore;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::AuthUser;
use crate::error::{RestError, RestResult};
use crate::extractors::ListParams;
use crate::handlers::{parse_record_id, search_condition};
use crate::models::{AttendanceStatusRequest, CreateAttendanceRequest, UpdateAttendanceRequest};
use crate::responses;
use crate::state::AppState;

/// Handler for listing attendance records.
///
/// # HTTP Request
///
/// `GET /attendance?page&limit&search_field&search_text`
pub async fn list_attendance_handler<S>(
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
    if let Some(dispatched) = search_condition(&params, EntityKind::Attendance)? {
        match dispatched.stage {
            SearchStage::Direct => direct = direct.and(dispatched.condition),
            SearchStage::PostJoin => post_join = post_join.and(dispatched.condition),
        }
    }

    let page = list_with_relations(
        state.store(),
        EntityKind::Attendance,
        &direct,
        &[Join::user()],
        &post_join,
        &params.page_request(),
    )
    .await?;
    Ok(responses::page(page))
}

/// Handler for reading an attendance record.
///
/// # HTTP Request
///
/// `GET /attendance/{id}`
pub async fn get_attendance_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::Attendance, &id)?;
    let record = state.store().require(EntityKind::Attendance, record_id).await?;
    let expanded = expand_one(state.store(), record.to_json(), &[Join::user()]).await?;
    Ok(responses::ok(expanded))
}

/// Handler for recording attendance.
///
/// # HTTP Request
///
/// `POST /attendance`
///
/// The record is filed for the caller.
pub async fn create_attendance_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Json(body): Json<CreateAttendanceRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    let record = state
        .store()
        .insert(
            EntityKind::Attendance,
            json!({
                "userId": caller.id,
                "date": body.date,
                "status": body.status,
                "checkIn": body.check_in,
                "checkOut": body.check_out,
                "notes": body.notes,
            }),
        )
        .await?;
    debug!(id = %record.id, user = %caller.id, "attendance recorded");
    Ok(responses::created(record.to_json()))
}

/// Handler for updating an attendance record.
///
/// # HTTP Request
///
/// `PUT /attendance/{id}`
pub async fn update_attendance_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateAttendanceRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::Attendance, &id)?;

    let mut changes = serde_json::Map::new();
    if let Some(date) = body.date {
        changes.insert("date".to_string(), json!(date));
    }
    if let Some(status) = body.status {
        changes.insert("status".to_string(), json!(status));
    }
    if let Some(check_in) = body.check_in {
        changes.insert("checkIn".to_string(), json!(check_in));
    }
    if let Some(check_out) = body.check_out {
        changes.insert("checkOut".to_string(), json!(check_out));
    }
    if let Some(notes) = body.notes {
        changes.insert("notes".to_string(), json!(notes));
    }

    let updated = state
        .store()
        .update(EntityKind::Attendance, record_id, Value::Object(changes))
        .await?
        .ok_or_else(|| RestError::not_found(format!("attendance not found: {}", id)))?;
    debug!(id = %updated.id, "attendance updated");
    Ok(responses::ok(updated.to_json()))
}

/// Handler for correcting an attendance state.
///
/// # HTTP Request
///
/// `PATCH /attendance/{id}/status`
///
/// Administrator only; records who made the call in `statusUpdatedBy`.
pub async fn attendance_status_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<AttendanceStatusRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::Attendance, &id)?;
    let updated = state
        .store()
        .update(
            EntityKind::Attendance,
            record_id,
            json!({"status": body.status, "statusUpdatedBy": caller.id}),
        )
        .await?
        .ok_or_else(|| RestError::not_found(format!("attendance not found: {}", id)))?;
    debug!(id = %updated.id, status = ?body.status, "attendance status changed");
    Ok(responses::ok(updated.to_json()))
}

/// Handler for deleting an attendance record.
///
/// # HTTP Request
///
/// `DELETE /attendance/{id}`
pub async fn delete_attendance_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::Attendance, &id)?;
    if !state.store().delete(EntityKind::Attendance, record_id).await? {
        return Err(RestError::not_found(format!("attendance not found: {}", id)));
    }
    debug!(%id, "attendance deleted");
    Ok(responses::message("Attendance record deleted"))
}
