//! Route table.
//!
//! Everything is served under `/api`. The auth routes, the health probe,
//! and the seed-admin bootstrap are public; every other route expects a
//! bearer token, enforced by the [`crate::auth::AuthUser`] extractor on the
//! handlers themselves.

use axum::{
    Router,
    routing::{get, patch, post},
};
use haven_store::DocumentStore;

use crate::handlers;
use crate::state::AppState;

/// Builds the `/api` route tree over the shared state.
pub fn api_router<S>(state: AppState<S>) -> Router
where
    S: DocumentStore,
{
    let auth = Router::new()
        .route("/signup", post(handlers::signup_handler::<S>))
        .route("/verify-otp", post(handlers::verify_otp_handler::<S>))
        .route("/login", post(handlers::login_handler::<S>))
        .route("/refresh-token", post(handlers::refresh_token_handler::<S>))
        .route("/change-password", post(handlers::change_password_handler::<S>))
        .route("/send-reset-otp", post(handlers::send_reset_otp_handler::<S>))
        .route("/reset-password-otp", post(handlers::reset_password_handler::<S>));

    let users = Router::new()
        .route(
            "/",
            get(handlers::list_users_handler::<S>).post(handlers::create_user_handler::<S>),
        )
        .route("/seed-admin", post(handlers::seed_admin_handler::<S>))
        .route(
            "/{id}",
            get(handlers::get_user_handler::<S>).put(handlers::update_user_handler::<S>),
        );

    let caregivers = Router::new()
        .route(
            "/",
            get(handlers::list_caregivers_handler::<S>)
                .post(handlers::create_caregiver_handler::<S>),
        )
        .route(
            "/{id}",
            get(handlers::get_caregiver_handler::<S>)
                .put(handlers::upsert_caregiver_handler::<S>)
                .delete(handlers::delete_caregiver_handler::<S>),
        );

    let healthcare_professionals = Router::new()
        .route(
            "/",
            get(handlers::list_healthcare_professionals_handler::<S>)
                .post(handlers::create_healthcare_professional_handler::<S>),
        )
        .route(
            "/{id}",
            get(handlers::get_healthcare_professional_handler::<S>)
                .put(handlers::upsert_healthcare_professional_handler::<S>)
                .delete(handlers::delete_healthcare_professional_handler::<S>),
        );

    let residents = Router::new()
        .route(
            "/",
            get(handlers::list_residents_handler::<S>).post(handlers::create_resident_handler::<S>),
        )
        .route(
            "/{id}",
            get(handlers::get_resident_handler::<S>)
                .put(handlers::upsert_resident_handler::<S>)
                .delete(handlers::delete_resident_handler::<S>),
        );

    let interview_candidates = Router::new()
        .route(
            "/",
            get(handlers::list_interview_candidates_handler::<S>)
                .post(handlers::create_interview_candidate_handler::<S>),
        )
        .route(
            "/{id}",
            get(handlers::get_interview_candidate_handler::<S>)
                .put(handlers::upsert_interview_candidate_handler::<S>)
                .delete(handlers::delete_interview_candidate_handler::<S>),
        );

    let documents = Router::new()
        .route(
            "/",
            get(handlers::list_documents_handler::<S>).post(handlers::create_document_handler::<S>),
        )
        .route(
            "/{id}",
            get(handlers::get_document_handler::<S>)
                .put(handlers::update_document_handler::<S>)
                .delete(handlers::delete_document_handler::<S>),
        );

    let company_info = Router::new().route(
        "/",
        get(handlers::get_company_info_handler::<S>)
            .put(handlers::upsert_company_info_handler::<S>),
    );

    let care_plans = Router::new()
        .route(
            "/",
            get(handlers::list_care_plans_handler::<S>)
                .post(handlers::create_care_plan_handler::<S>),
        )
        .route(
            "/{id}",
            get(handlers::get_care_plan_handler::<S>)
                .put(handlers::update_care_plan_handler::<S>)
                .delete(handlers::delete_care_plan_handler::<S>),
        );

    let timesheets = Router::new()
        .route(
            "/",
            get(handlers::list_timesheets_handler::<S>)
                .post(handlers::create_timesheet_handler::<S>),
        )
        .route(
            "/{id}",
            get(handlers::get_timesheet_handler::<S>)
                .put(handlers::update_timesheet_handler::<S>)
                .delete(handlers::delete_timesheet_handler::<S>),
        )
        .route("/{id}/status", patch(handlers::timesheet_status_handler::<S>));

    let attendance = Router::new()
        .route(
            "/",
            get(handlers::list_attendance_handler::<S>)
                .post(handlers::create_attendance_handler::<S>),
        )
        .route(
            "/{id}",
            get(handlers::get_attendance_handler::<S>)
                .put(handlers::update_attendance_handler::<S>)
                .delete(handlers::delete_attendance_handler::<S>),
        )
        .route("/{id}/status", patch(handlers::attendance_status_handler::<S>));

    let api = Router::new()
        .route("/health", get(handlers::health_handler))
        .nest("/auth", auth)
        .nest("/users", users)
        .nest("/caregivers", caregivers)
        .nest("/healthcare-professionals", healthcare_professionals)
        .nest("/residents", residents)
        .nest("/interview-candidates", interview_candidates)
        .nest("/documents", documents)
        .nest("/company-info", company_info)
        .nest("/care-plans", care_plans)
        .nest("/timesheets", timesheets)
        .nest("/attendance", attendance);

    Router::new().nest("/api", api).with_state(state)
}
