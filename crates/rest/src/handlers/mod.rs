//! HTTP request handlers.
//!
//! One module per resource; the router wires them up in `routing`. The
//! helpers here are the shaping and lookup steps that several resources
//! share.

pub mod attendance;
pub mod auth;
pub mod care_plans;
pub mod company;
pub mod documents;
pub mod health;
pub mod profiles;
pub mod timesheets;
pub mod users;

pub use attendance::{
    attendance_status_handler, create_attendance_handler, delete_attendance_handler,
    get_attendance_handler, list_attendance_handler, update_attendance_handler,
};
pub use auth::{
    change_password_handler, login_handler, refresh_token_handler, reset_password_handler,
    send_reset_otp_handler, signup_handler, verify_otp_handler,
};
pub use care_plans::{
    create_care_plan_handler, delete_care_plan_handler, get_care_plan_handler,
    list_care_plans_handler, update_care_plan_handler,
};
pub use company::{get_company_info_handler, upsert_company_info_handler};
pub use documents::{
    create_document_handler, delete_document_handler, get_document_handler,
    list_documents_handler, update_document_handler,
};
pub use health::health_handler;
pub use profiles::{
    create_caregiver_handler, create_healthcare_professional_handler,
    create_interview_candidate_handler, create_resident_handler, delete_caregiver_handler,
    delete_healthcare_professional_handler, delete_interview_candidate_handler,
    delete_resident_handler, get_caregiver_handler, get_healthcare_professional_handler,
    get_interview_candidate_handler, get_resident_handler, list_caregivers_handler,
    list_healthcare_professionals_handler, list_interview_candidates_handler,
    list_residents_handler, upsert_caregiver_handler, upsert_healthcare_professional_handler,
    upsert_interview_candidate_handler, upsert_resident_handler,
};
pub use timesheets::{
    create_timesheet_handler, delete_timesheet_handler, get_timesheet_handler,
    list_timesheets_handler, timesheet_status_handler, update_timesheet_handler,
};
pub use users::{
    create_user_handler, get_user_handler, list_users_handler, seed_admin_handler,
    update_user_handler,
};

use haven_store::query::{Condition, Filter, SearchDispatch};
use haven_store::types::{EntityKind, Record, RecordId};
use haven_store::DocumentStore;
use serde_json::Value;

use crate::error::{RestError, RestResult};
use crate::extractors::{public_link, ListParams};

/// Parses a path id, reporting an unparsable id the same way as a missing
/// record.
pub(crate) fn parse_record_id(kind: EntityKind, raw: &str) -> RestResult<RecordId> {
    RecordId::parse(raw).ok_or_else(|| RestError::not_found(format!("{} not found: {}", kind, raw)))
}

/// Looks a user up by its unique email.
pub(crate) async fn find_user_by_email<S>(store: &S, email: &str) -> RestResult<Option<Record>>
where
    S: DocumentStore,
{
    let filter = Filter::all().and(Condition::eq("email", email));
    Ok(store.find_one(EntityKind::User, &filter).await?)
}

/// Strips credentials and OTP state from a user document and replaces the
/// stored profile-picture filename with its public link. The raw stored
/// name is dropped from the payload.
pub(crate) fn shape_user(base_url: &str, mut user: Value) -> Value {
    if let Some(map) = user.as_object_mut() {
        map.remove("password");
        map.remove("otp");
        map.remove("otpExpiresAt");
        let picture = map.remove("profilePicture");
        map.insert(
            "profilePictureUrl".to_string(),
            public_link(
                base_url,
                "profile_picture",
                picture.as_ref().and_then(Value::as_str),
            ),
        );
    }
    user
}

/// Resolves the list parameters' search pair against an entity's dispatch
/// table; an unknown field is a 400.
pub(crate) fn search_condition(
    params: &ListParams,
    kind: EntityKind,
) -> RestResult<Option<SearchDispatch>> {
    params
        .search(kind)
        .map_err(|err| RestError::bad_request(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_shaping_strips_credentials() {
        let shaped = shape_user(
            "http://localhost:8080",
            json!({
                "name": "Ada",
                "password": "$argon2id$...",
                "otp": "123456",
                "otpExpiresAt": "2026-01-01T00:00:00Z",
                "profilePicture": "ada.png",
            }),
        );
        assert!(shaped.get("password").is_none());
        assert!(shaped.get("otp").is_none());
        assert!(shaped.get("otpExpiresAt").is_none());
        assert!(shaped.get("profilePicture").is_none());
        assert_eq!(
            shaped["profilePictureUrl"],
            "http://localhost:8080/profile_picture/data/ada.png"
        );
    }

    #[test]
    fn unparsable_id_reads_as_not_found() {
        let err = parse_record_id(EntityKind::User, "not-a-uuid").unwrap_err();
        assert!(matches!(err, RestError::NotFound { .. }));
    }
}
