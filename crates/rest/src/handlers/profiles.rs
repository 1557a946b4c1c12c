//! Profile handlers.
//!
//! Caregivers, healthcare professionals, residents, and interview candidates
//! share one implementation parameterized by [`ProfileKind`]; the public
//! handlers are thin per-kind wrappers the router points at.
//!
//! Routes per kind (shown for caregivers):
//!
//! - `GET /caregivers` - list, `userId` expanded
//! - `GET /caregivers/{id}` - read by profile id
//! - `POST /caregivers` - create, body carries `userId`
//! - `PUT /caregivers/{user_id}` - upsert by user id (creates when absent)
//! - `DELETE /caregivers/{id}` - delete by profile id
//!
//! Resident and interview-candidate lists additionally accept a free-text
//! `search` parameter matched against the joined user's name and email plus
//! the kind's own searchable fields (room number and diagnoses for
//! residents; desired position, skills, and qualifications for candidates).
//! Interview candidates require an uploaded resume at creation.

use axum::{
    Json,
    extract::{Path, Query, State},
    response::Response,
};
use haven_store::core::{expand_one, paginate, Expansion, Join};
use haven_store::profiles;
use haven_store::query::{Condition, Filter};
use haven_store::types::{EntityKind, ProfileKind};
use haven_store::DocumentStore;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::error::{RestError, RestResult};
use crate::extractors::{public_link, ListParams, UploadedFiles};
use crate::models::ProfileBody;
use crate::responses;
use crate::state::AppState;

/// Free-text search over the joined user, used by resident and candidate
/// lists.
#[derive(Debug, Deserialize)]
pub struct FreeTextQuery {
    search: Option<String>,
}

const USER_JOIN: Join = Join {
    local_field: "userId",
    target: EntityKind::User,
    alias: "userId",
    collapse: true,
    select: Some(&["name", "email", "role", "active"]),
};

/// The free-text OR group: the joined user's name and email, plus the
/// profile fields a kind is searched by.
fn free_text_filter(kind: ProfileKind, search: Option<&str>) -> Filter {
    let text = match search {
        Some(text) if !text.is_empty() => text,
        _ => return Filter::all(),
    };
    let mut any = vec![
        Condition::contains("userId.name", text),
        Condition::contains("userId.email", text),
    ];
    match kind {
        ProfileKind::Resident => any.extend([
            Condition::contains("roomNumber", text),
            Condition::contains("primaryDiagnosis", text),
            Condition::contains("secondaryDiagnoses", text),
        ]),
        ProfileKind::InterviewCandidate => any.extend([
            Condition::contains("desiredPosition", text),
            Condition::contains("skills", text),
            Condition::contains("qualifications", text),
        ]),
        _ => {}
    }
    Filter::all().any_of(any)
}

/// Replaces a candidate's stored resume filename with its public link. The
/// raw stored name is dropped from the payload.
fn shape_candidate(base_url: &str, mut profile: Value) -> Value {
    if let Some(map) = profile.as_object_mut() {
        let resume = map.remove("resume");
        map.insert(
            "resumeUrl".to_string(),
            public_link(base_url, "documents", resume.as_ref().and_then(Value::as_str)),
        );
    }
    profile
}

async fn list_profiles<S>(
    state: &AppState<S>,
    kind: ProfileKind,
    params: &ListParams,
    search: Option<&str>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    let filter = free_text_filter(kind, search);
    let page = paginate(
        state.store(),
        kind.entity(),
        &filter,
        &params.page_request(),
        &[Expansion::user_id()],
    )
    .await?;
    let page = if kind == ProfileKind::InterviewCandidate {
        let base = state.base_url().to_string();
        page.map(move |profile| shape_candidate(&base, profile))
    } else {
        page
    };
    Ok(responses::page(page))
}

async fn get_profile<S>(state: &AppState<S>, kind: ProfileKind, id: &str) -> RestResult<Response>
where
    S: DocumentStore,
{
    let record = profiles::get_profile(state.store(), kind, id).await?;
    let mut expanded = expand_one(state.store(), record.to_json(), &[USER_JOIN]).await?;
    if kind == ProfileKind::InterviewCandidate {
        expanded = shape_candidate(state.base_url(), expanded);
    }
    Ok(responses::ok(expanded))
}

async fn create_profile<S>(
    state: &AppState<S>,
    kind: ProfileKind,
    files: &UploadedFiles,
    body: ProfileBody,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    let user_id = body
        .user_id
        .ok_or_else(|| RestError::bad_request("userId is required"))?;
    let mut content = body.fields;
    if kind == ProfileKind::InterviewCandidate {
        let resume = files.require_file("resume")?;
        content.insert("resume".to_string(), json!(resume));
    }

    let record =
        profiles::create_profile(state.store(), kind, &user_id, Value::Object(content)).await?;
    let mut shaped = record.to_json();
    if kind == ProfileKind::InterviewCandidate {
        shaped = shape_candidate(state.base_url(), shaped);
    }
    Ok(responses::created(shaped))
}

async fn upsert_profile<S>(
    state: &AppState<S>,
    kind: ProfileKind,
    user_id: &str,
    files: &UploadedFiles,
    body: ProfileBody,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    let mut content = body.fields;
    content.remove("userId");
    // A resume is only rewritten when a new file accompanies the request.
    if kind == ProfileKind::InterviewCandidate {
        if let Some(resume) = &files.file {
            content.insert("resume".to_string(), json!(resume));
        }
    }

    let record =
        profiles::upsert_profile(state.store(), kind, user_id, Value::Object(content)).await?;
    let mut shaped = record.to_json();
    if kind == ProfileKind::InterviewCandidate {
        shaped = shape_candidate(state.base_url(), shaped);
    }
    Ok(responses::ok(shaped))
}

async fn delete_profile<S>(state: &AppState<S>, kind: ProfileKind, id: &str) -> RestResult<Response>
where
    S: DocumentStore,
{
    profiles::delete_profile(state.store(), kind, id).await?;
    Ok(responses::message(format!("{} deleted", kind)))
}

macro_rules! profile_handlers {
    ($list:ident, $get:ident, $create:ident, $upsert:ident, $delete:ident, $kind:expr) => {
        /// List handler for this profile kind.
        pub async fn $list<S: DocumentStore>(
            State(state): State<AppState<S>>,
            caller: AuthUser,
            params: ListParams,
            Query(query): Query<FreeTextQuery>,
        ) -> RestResult<Response> {
            caller.require_admin()?;
            list_profiles(&state, $kind, &params, query.search.as_deref()).await
        }

        /// Read handler for this profile kind.
        pub async fn $get<S: DocumentStore>(
            State(state): State<AppState<S>>,
            caller: AuthUser,
            Path(id): Path<String>,
        ) -> RestResult<Response> {
            caller.require_admin()?;
            get_profile(&state, $kind, &id).await
        }

        /// Create handler for this profile kind.
        pub async fn $create<S: DocumentStore>(
            State(state): State<AppState<S>>,
            caller: AuthUser,
            files: UploadedFiles,
            Json(body): Json<ProfileBody>,
        ) -> RestResult<Response> {
            caller.require_admin()?;
            create_profile(&state, $kind, &files, body).await
        }

        /// Upsert-by-user handler for this profile kind.
        pub async fn $upsert<S: DocumentStore>(
            State(state): State<AppState<S>>,
            caller: AuthUser,
            Path(user_id): Path<String>,
            files: UploadedFiles,
            Json(body): Json<ProfileBody>,
        ) -> RestResult<Response> {
            caller.require_admin()?;
            upsert_profile(&state, $kind, &user_id, &files, body).await
        }

        /// Delete handler for this profile kind.
        pub async fn $delete<S: DocumentStore>(
            State(state): State<AppState<S>>,
            caller: AuthUser,
            Path(id): Path<String>,
        ) -> RestResult<Response> {
            caller.require_admin()?;
            delete_profile(&state, $kind, &id).await
        }
    };
}

profile_handlers!(
    list_caregivers_handler,
    get_caregiver_handler,
    create_caregiver_handler,
    upsert_caregiver_handler,
    delete_caregiver_handler,
    ProfileKind::Caregiver
);

profile_handlers!(
    list_healthcare_professionals_handler,
    get_healthcare_professional_handler,
    create_healthcare_professional_handler,
    upsert_healthcare_professional_handler,
    delete_healthcare_professional_handler,
    ProfileKind::HealthcareProfessional
);

profile_handlers!(
    list_residents_handler,
    get_resident_handler,
    create_resident_handler,
    upsert_resident_handler,
    delete_resident_handler,
    ProfileKind::Resident
);

profile_handlers!(
    list_interview_candidates_handler,
    get_interview_candidate_handler,
    create_interview_candidate_handler,
    upsert_interview_candidate_handler,
    delete_interview_candidate_handler,
    ProfileKind::InterviewCandidate
);
