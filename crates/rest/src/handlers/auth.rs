//! Authentication handlers.
//!
//! Public endpoints for signup, OTP verification, login, token refresh, and
//! password management. Signup defaults new accounts to the
//! INTERVIEW_CANDIDATE role; accounts stay unusable until their email is
//! verified with the OTP.

use axum::{Json, extract::State, response::Response};
use chrono::{DateTime, Duration, Utc};
use haven_store::types::{EntityKind, Role, VerificationState};
use haven_store::DocumentStore;
use serde_json::{json, Value};
use tracing::debug;

use crate::auth::{self, AuthUser};
use crate::error::{RestError, RestResult};
use crate::handlers::{find_user_by_email, shape_user};
use crate::mailer::send_fire_and_forget;
use crate::models::{
    ChangePasswordRequest, LoginRequest, RefreshTokenRequest, ResetPasswordRequest,
    SendResetOtpRequest, SignupRequest, VerifyOtpRequest,
};
use crate::responses;
use crate::state::AppState;

/// Handler for signup.
///
/// # HTTP Request
///
/// `POST /auth/signup`
///
/// Creates an unverified INTERVIEW_CANDIDATE account and mails it an OTP.
/// Signing up again with an unverified email resends a fresh OTP instead of
/// failing.
pub async fn signup_handler<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<SignupRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    if let Some(existing) = find_user_by_email(state.store(), &body.email).await? {
        if verification_state(&existing.content) == Some(VerificationState::Completed) {
            return Err(RestError::bad_request("An account with this email already exists"));
        }
        // Unverified re-signup: refresh the OTP rather than erroring.
        let otp = issue_otp(&state, &existing.id.to_string()).await?;
        send_fire_and_forget(state.mailer(), &body.email, &otp).await;
        return Ok(responses::message("A new verification code has been sent"));
    }

    let password = auth::hash_password(&body.password)?;
    let user = state
        .store()
        .insert(
            EntityKind::User,
            json!({
                "name": body.name,
                "email": body.email,
                "password": password,
                "phone": body.phone,
                "role": Role::InterviewCandidate,
                "active": true,
                "verificationStatus": VerificationState::Pending,
            }),
        )
        .await?;
    debug!(id = %user.id, "user signed up");

    let otp = issue_otp(&state, &user.id.to_string()).await?;
    send_fire_and_forget(state.mailer(), &body.email, &otp).await;
    Ok(responses::created(json!({
        "id": user.id.to_string(),
        "message": "Account created; a verification code has been sent",
    })))
}

/// Handler for OTP verification.
///
/// # HTTP Request
///
/// `POST /auth/verify-otp`
pub async fn verify_otp_handler<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<VerifyOtpRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    let user = find_user_by_email(state.store(), &body.email)
        .await?
        .ok_or_else(|| RestError::not_found("No account with this email"))?;

    check_otp(&user.content, &body.otp)?;

    state
        .store()
        .update(
            EntityKind::User,
            user.id,
            json!({
                "verificationStatus": VerificationState::Completed,
                "otp": Value::Null,
                "otpExpiresAt": Value::Null,
            }),
        )
        .await?;
    debug!(id = %user.id, "email verified");
    Ok(responses::message("Email verified"))
}

/// Handler for login.
///
/// # HTTP Request
///
/// `POST /auth/login`
///
/// An unverified account gets a fresh OTP and a 403 instead of tokens.
pub async fn login_handler<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<LoginRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    let invalid = || RestError::Unauthorized {
        message: "Invalid email or password".to_string(),
    };

    let user = find_user_by_email(state.store(), &body.email)
        .await?
        .ok_or_else(invalid)?;
    let stored = user.str_field("password").unwrap_or_default();
    if !auth::verify_password(&body.password, stored) {
        return Err(invalid());
    }

    if user.content.get("active") == Some(&Value::Bool(false)) {
        return Err(RestError::Forbidden {
            message: "This account has been deactivated".to_string(),
        });
    }

    if verification_state(&user.content) != Some(VerificationState::Completed) {
        let otp = issue_otp(&state, &user.id.to_string()).await?;
        send_fire_and_forget(state.mailer(), &body.email, &otp).await;
        return Err(RestError::Forbidden {
            message: "Email not verified; a new verification code has been sent".to_string(),
        });
    }

    let role: Role = serde_json::from_value(user.content["role"].clone())
        .map_err(|_| RestError::InternalError {
            message: format!("user {} carries no recognizable role", user.id),
        })?;
    let tokens = state.sessions().issue(AuthUser {
        id: user.id.to_string(),
        email: body.email,
        role,
    });
    debug!(id = %user.id, "login");

    Ok(responses::ok(json!({
        "accessToken": tokens.access_token,
        "refreshToken": tokens.refresh_token,
        "user": shape_user(state.base_url(), user.to_json()),
    })))
}

/// Handler for token refresh.
///
/// # HTTP Request
///
/// `POST /auth/refresh-token`
pub async fn refresh_token_handler<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<RefreshTokenRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    let tokens = state
        .sessions()
        .rotate(&body.refresh_token)
        .ok_or_else(|| RestError::Unauthorized {
            message: "Invalid or expired refresh token".to_string(),
        })?;
    Ok(responses::ok(json!({
        "accessToken": tokens.access_token,
        "refreshToken": tokens.refresh_token,
    })))
}

/// Handler for authenticated password change.
///
/// # HTTP Request
///
/// `POST /auth/change-password`
///
/// Every session for the user is revoked on success.
pub async fn change_password_handler<S>(
    State(state): State<AppState<S>>,
    caller: AuthUser,
    Json(body): Json<ChangePasswordRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    let user = find_user_by_email(state.store(), &caller.email)
        .await?
        .ok_or_else(|| RestError::not_found("Account no longer exists"))?;

    let stored = user.str_field("password").unwrap_or_default();
    if !auth::verify_password(&body.old_password, stored) {
        return Err(RestError::Unauthorized {
            message: "Current password is incorrect".to_string(),
        });
    }

    let password = auth::hash_password(&body.new_password)?;
    state
        .store()
        .update(EntityKind::User, user.id, json!({"password": password}))
        .await?;
    state.sessions().revoke_user(&caller.id);
    debug!(id = %user.id, "password changed");
    Ok(responses::message("Password changed"))
}

/// Handler for requesting a password-reset OTP.
///
/// # HTTP Request
///
/// `POST /auth/send-reset-otp`
pub async fn send_reset_otp_handler<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<SendResetOtpRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    let user = find_user_by_email(state.store(), &body.email)
        .await?
        .ok_or_else(|| RestError::not_found("No account with this email"))?;

    let otp = issue_otp(&state, &user.id.to_string()).await?;
    send_fire_and_forget(state.mailer(), &body.email, &otp).await;
    Ok(responses::message("A reset code has been sent"))
}

/// Handler for resetting a password with an OTP.
///
/// # HTTP Request
///
/// `POST /auth/reset-password-otp`
pub async fn reset_password_handler<S>(
    State(state): State<AppState<S>>,
    Json(body): Json<ResetPasswordRequest>,
) -> RestResult<Response>
where
    S: DocumentStore,
{
    let user = find_user_by_email(state.store(), &body.email)
        .await?
        .ok_or_else(|| RestError::not_found("No account with this email"))?;

    check_otp(&user.content, &body.otp)?;

    let password = auth::hash_password(&body.new_password)?;
    state
        .store()
        .update(
            EntityKind::User,
            user.id,
            json!({
                "password": password,
                "otp": Value::Null,
                "otpExpiresAt": Value::Null,
            }),
        )
        .await?;
    state.sessions().revoke_user(&user.id.to_string());
    debug!(id = %user.id, "password reset");
    Ok(responses::message("Password reset"))
}

/// Writes a fresh OTP onto the user record and returns it.
async fn issue_otp<S>(state: &AppState<S>, user_id: &str) -> RestResult<String>
where
    S: DocumentStore,
{
    let otp = auth::generate_otp();
    let expires_at = Utc::now() + Duration::seconds(state.otp_ttl() as i64);
    let id = haven_store::RecordId::parse(user_id)
        .ok_or_else(|| RestError::not_found("No account with this email"))?;
    state
        .store()
        .update(
            EntityKind::User,
            id,
            json!({"otp": otp, "otpExpiresAt": expires_at.to_rfc3339()}),
        )
        .await?;
    Ok(otp)
}

/// Compares a submitted OTP against the record's stored code and expiry.
fn check_otp(content: &Value, submitted: &str) -> RestResult<()> {
    let stored = content.get("otp").and_then(Value::as_str);
    if stored != Some(submitted) {
        return Err(RestError::bad_request("Invalid verification code"));
    }
    let expired = content
        .get("otpExpiresAt")
        .and_then(Value::as_str)
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|at| at < Utc::now())
        .unwrap_or(true);
    if expired {
        return Err(RestError::bad_request("Verification code has expired"));
    }
    Ok(())
}

fn verification_state(content: &Value) -> Option<VerificationState> {
    serde_json::from_value(content.get("verificationStatus").cloned()?).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_otp_rejects_wrong_code() {
        let content = json!({
            "otp": "123456",
            "otpExpiresAt": (Utc::now() + Duration::minutes(5)).to_rfc3339(),
        });
        assert!(check_otp(&content, "123456").is_ok());
        assert!(check_otp(&content, "999999").is_err());
    }

    #[test]
    fn check_otp_rejects_expired_code() {
        let content = json!({
            "otp": "123456",
            "otpExpiresAt": (Utc::now() - Duration::minutes(5)).to_rfc3339(),
        });
        assert!(check_otp(&content, "123456").is_err());
    }

    #[test]
    fn check_otp_rejects_missing_expiry() {
        let content = json!({"otp": "123456"});
        assert!(check_otp(&content, "123456").is_err());
    }
}
