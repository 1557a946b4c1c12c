//! Request bodies.
//!
//! Every endpoint takes an explicit struct with `deny_unknown_fields`, so a
//! mistyped field is a 400 instead of silently dropped data. Profile bodies
//! are the one exception: apart from the `userId` binding their content is
//! deployment-specific, so the remainder is carried as-is.

use haven_store::types::{AttendanceStatus, Role, TimesheetStatus};
use serde::Deserialize;
use serde_json::{Map, Value};

/// `POST /auth/signup`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SignupRequest {
    /// Display name.
    pub name: String,
    /// Login email, unique.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// Contact phone.
    pub phone: Option<String>,
}

/// `POST /auth/verify-otp`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct VerifyOtpRequest {
    /// The account email.
    pub email: String,
    /// The six-digit code.
    pub otp: String,
}

/// `POST /auth/login`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    /// The account email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
}

/// `POST /auth/refresh-token`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RefreshTokenRequest {
    /// The refresh token to rotate.
    pub refresh_token: String,
}

/// `POST /auth/change-password`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChangePasswordRequest {
    /// The current password.
    pub old_password: String,
    /// The replacement password.
    pub new_password: String,
}

/// `POST /auth/send-reset-otp`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SendResetOtpRequest {
    /// The account email.
    pub email: String,
}

/// `POST /auth/reset-password-otp`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ResetPasswordRequest {
    /// The account email.
    pub email: String,
    /// The reset code.
    pub otp: String,
    /// The replacement password.
    pub new_password: String,
}

/// `POST /users`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    /// Display name.
    pub name: String,
    /// Login email, unique.
    pub email: String,
    /// Plaintext password, hashed before storage.
    pub password: String,
    /// The account role.
    pub role: Role,
    /// Contact phone.
    pub phone: Option<String>,
    /// Whether the account is active; defaults to true.
    pub active: Option<bool>,
}

/// `PUT /users/{id}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    /// Display name.
    pub name: Option<String>,
    /// Login email.
    pub email: Option<String>,
    /// New plaintext password, hashed before storage.
    pub password: Option<String>,
    /// The account role.
    pub role: Option<Role>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Whether the account is active.
    pub active: Option<bool>,
}

/// `POST /users/seed-admin`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SeedAdminRequest {
    /// Admin email; defaults to the configured seed address.
    pub email: Option<String>,
    /// Admin display name.
    pub name: Option<String>,
    /// Admin password.
    pub password: String,
}

/// Profile create/upsert body: the user binding plus free-form content.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    /// The user this profile binds to.
    pub user_id: Option<String>,
    /// Deployment-specific profile fields, stored verbatim.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// `POST /documents`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateDocumentRequest {
    /// Document title.
    pub title: String,
    /// Free-text description.
    pub description: Option<String>,
    /// User ids this document is associated with.
    pub associated_users: Option<Vec<String>>,
}

/// `PUT /documents/{id}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateDocumentRequest {
    /// Document title.
    pub title: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// User ids this document is associated with.
    pub associated_users: Option<Vec<String>>,
}

/// `PUT /company-info`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyInfoRequest {
    /// Company name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Public website.
    pub website: Option<String>,
    /// About/description text.
    pub about: Option<String>,
}

/// `POST /care-plans`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCarePlanRequest {
    /// Plan name, unique.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
    /// External media links.
    pub media_links: Option<Vec<String>>,
}

/// `PUT /care-plans/{id}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCarePlanRequest {
    /// Plan name.
    pub name: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Media links to append; existing links are never replaced.
    pub media_links: Option<Vec<String>>,
}

/// `POST /timesheets`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTimesheetRequest {
    /// The worked date, `YYYY-MM-DD`.
    pub date: String,
    /// Hours worked.
    pub hours_worked: Option<f64>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// `PUT /timesheets/{id}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTimesheetRequest {
    /// The worked date.
    pub date: Option<String>,
    /// Hours worked.
    pub hours_worked: Option<f64>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// `PATCH /timesheets/{id}/status`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TimesheetStatusRequest {
    /// The new review status.
    pub status: TimesheetStatus,
}

/// `POST /attendance`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateAttendanceRequest {
    /// The attendance date, `YYYY-MM-DD`.
    pub date: String,
    /// The attendance state.
    pub status: AttendanceStatus,
    /// Shift check-in time.
    pub check_in: Option<String>,
    /// Shift check-out time.
    pub check_out: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// `PUT /attendance/{id}`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateAttendanceRequest {
    /// The attendance date.
    pub date: Option<String>,
    /// The attendance state.
    pub status: Option<AttendanceStatus>,
    /// Shift check-in time.
    pub check_in: Option<String>,
    /// Shift check-out time.
    pub check_out: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// `PATCH /attendance/{id}/status`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AttendanceStatusRequest {
    /// The new attendance state.
    pub status: AttendanceStatus,
}
