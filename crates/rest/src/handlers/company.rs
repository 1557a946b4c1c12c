//! Company-info handlers.
//!
//! The organization's contact card is a singleton: reads return `null` data
//! until it is first written, and the write endpoint upserts rather than
//! failing on a missing row. The stored logo filename is shaped into its
//! public link.

use axum::{Json, extract::State, response::Response};
use haven_store::company;
use haven_store::DocumentStore;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::AuthUser;
use crate::error::RestResult;
use crate::extractors::{public_link, UploadedFiles};
use crate::models::CompanyInfoRequest;
use crate::responses;
use crate::state::AppState;

/// Replaces the stored logo filename with its public link. The raw stored
/// name is dropped from the payload.
fn shape_company(base_url: &str, mut info: Value) -> Value {
    if let Some(map) = info.as_object_mut() {
        let logo = map.remove("logo");
        map.insert(
            "logoUrl".to_string(),
            public_link(base_url, "logo", logo.as_ref().and_then(Value::as_str)),
        );
    }
    info
}


/// Handler for reading the company info.
///
/// # HTTP Request
///
/// `GET /company-info`
///
/// Returns `null` data when nothing has been written yet.
pub async fn get_company_info_handler<S>(
    State(state): State<AppState<S>>,
    _caller: AuthUser,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    match company::get_company(state.store()).await? {
        Some(record) => Ok(responses::ok(shape_company(
            state.base_url(),
            record.to_json(),
        ))),
        None => Ok(responses::ok(Value::Null)),
    }
}

/// Handler for writing the company info.
///
/// # HTTP Request
///
/// `PUT /company-info`
///
/// Creates the singleton on first write, merges into it afterwards. The
/// stored logo is only rewritten when a new upload accompanies the request.
pub async fn upsert_company_info_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    files: UploadedFiles,
    Json(body): Json<CompanyInfoRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    caller.require_admin()?;

    let mut changes = serde_json::Map::new();
    if let Some(name) = body.name {
        changes.insert("name".to_string(), json!(name));
    }
    if let Some(email) = body.email {
        changes.insert("email".to_string(), json!(email));
    }
    if let Some(phone) = body.phone {
        changes.insert("phone".to_string(), json!(phone));
    }
    if let Some(address) = body.address {
        changes.insert("address".to_string(), json!(address));
    }
    if let Some(website) = body.website {
        changes.insert("website".to_string(), json!(website));
    }
    if let Some(about) = body.about {
        changes.insert("about".to_string(), json!(about));
    }
    if let Some(logo) = files.file {
        changes.insert("logo".to_string(), json!(logo));
    }

    let record = company::upsert_company(state.store(), Value::Object(changes)).await?;
    debug!(id = %record.id, "company info written");
    Ok(responses::ok(shape_company(
        state.base_url(),
        record.to_json(),
    )))
}
