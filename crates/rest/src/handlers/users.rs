//! User account handlers.
//!
//! Administrator-facing CRUD over user accounts, plus the one-time
//! seed-admin bootstrap. User responses never carry credentials or OTP
//! state; the stored profile-picture filename is shaped into its public
//! link.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use haven_store::core::paginate;
use haven_store::query::{Condition, Filter};
use haven_store::types::{EntityKind, Role, VerificationState};
use haven_store::DocumentStore;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::{self, AuthUser};
use crate::error::{RestError, RestResult};
use crate::extractors::{ListParams, UploadedFiles};
use crate::handlers::{parse_record_id, shape_user};
use crate::models::{CreateUserRequest, SeedAdminRequest, UpdateUserRequest};
use crate::responses;
use crate::state::AppState;

/// Extra user-list filters beyond the shared list parameters.
#[derive(Debug, Deserialize)]
pub struct UserFilterQuery {
    role: Option<Role>,
    active: Option<bool>,
}

/// Handler for listing users.
///
/// # HTTP Request
///
/// `GET /users?page&limit&search_field&search_text&role&active`
pub async fn list_users_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    params: ListParams,
    Query(query): Query<UserFilterQuery>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;

    let mut filter = Filter::all();
    if let Some(role) = query.role {
        filter = filter.and(Condition::eq("role", role.as_str()));
    }
    if let Some(active) = query.active {
        filter = filter.and(Condition::eq("active", active));
    }
    if let Some(dispatched) = crate::handlers::search_condition(&params, EntityKind::User)? {
        filter = filter.and(dispatched.condition);
    }

    let page = paginate(
        state.store(),
        EntityKind::User,
        &filter,
        &params.page_request(),
        &[],
    )
    .await?;
    Ok(responses::page(
        page.map(|user| shape_user(state.base_url(), user)),
    ))
}

/// Handler for reading a user.
///
/// # HTTP Request
///
/// `GET /users/{id}`
pub async fn get_user_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::User, &id)?;
    let user = state.store().require(EntityKind::User, record_id).await?;
    Ok(responses::ok(shape_user(state.base_url(), user.to_json())))
}

/// Handler for creating a user.
///
/// # HTTP Request
///
/// `POST /users`
///
/// Admin-created accounts are verified from the start. An optional profile
/// picture arrives through the upload boundary.
pub async fn create_user_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    files: UploadedFiles,
    Json(body): Json<CreateUserRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;

    let password = auth::hash_password(&body.password)?;
    let user = state
        .store()
        .insert(
            EntityKind::User,
            json!({
                "name": body.name,
                "email": body.email,
                "password": password,
                "role": body.role,
                "phone": body.phone,
                "active": body.active.unwrap_or(true),
                "verificationStatus": VerificationState::Completed,
                "profilePicture": files.file,
            }),
        )
        .await?;
    debug!(id = %user.id, "user created");
    Ok(responses::created(shape_user(
        state.base_url(),
        user.to_json(),
    )))
}

/// Handler for updating a user.
///
/// # HTTP Request
///
/// `PUT /users/{id}`
pub async fn update_user_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Path(id): Path<String>,
    files: UploadedFiles,
    Json(body): Json<UpdateUserRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;
    let record_id = parse_record_id(EntityKind::User, &id)?;

    let mut changes = serde_json::Map::new();
    if let Some(name) = body.name {
        changes.insert("name".to_string(), json!(name));
    }
    if let Some(email) = body.email {
        changes.insert("email".to_string(), json!(email));
    }
    if let Some(password) = body.password {
        changes.insert("password".to_string(), json!(auth::hash_password(&password)?));
    }
    if let Some(role) = body.role {
        changes.insert("role".to_string(), json!(role));
    }
    if let Some(phone) = body.phone {
        changes.insert("phone".to_string(), json!(phone));
    }
    if let Some(active) = body.active {
        changes.insert("active".to_string(), json!(active));
    }
    if let Some(picture) = files.file {
        changes.insert("profilePicture".to_string(), json!(picture));
    }

    let updated = state
        .store()
        .update(EntityKind::User, record_id, Value::Object(changes))
        .await?
        .ok_or_else(|| RestError::not_found(format!("user not found: {}", id)))?;
    debug!(id = %updated.id, "user updated");
    Ok(responses::ok(shape_user(state.base_url(), updated.to_json())))
}

/// Handler for the seed-admin bootstrap.
///
/// # HTTP Request
///
/// `POST /users/seed-admin`
///
/// Public by design so a fresh deployment can be bootstrapped; it refuses to
/// run once any administrator exists.
pub async fn seed_admin_handler<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<SeedAdminRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    let admins = Filter::all().and(Condition::eq("role", Role::Administrator.as_str()));
    if state
        .store()
        .find_one(EntityKind::User, &admins)
        .await?
        .is_some()
    {
        return Err(RestError::bad_request("An administrator already exists"));
    }

    let email = body
        .email
        .unwrap_or_else(|| state.config().seed_admin_email.clone());
    let password = auth::hash_password(&body.password)?;
    let admin = state
        .store()
        .insert(
            EntityKind::User,
            json!({
                "name": body.name.unwrap_or_else(|| "Administrator".to_string()),
                "email": email,
                "password": password,
                "role": Role::Administrator,
                "active": true,
                "verificationStatus": VerificationState::Completed,
            }),
        )
        .await?;
    debug!(id = %admin.id, "seed administrator created");
    Ok(responses::created(shape_user(
        state.base_url(),
        admin.to_json(),
    )))
}
