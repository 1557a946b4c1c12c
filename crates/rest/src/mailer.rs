//! OTP delivery.
//!
//! Mail delivery sits behind [`OtpMailer`]; the default implementation just
//! logs. Delivery is fire-and-forget: a failure is warned about and never
//! surfaced to the client, so signup and reset flows succeed even when the
//! mail path is down.

use async_trait::async_trait;
use tracing::{info, warn};

/// Sends one-time passcodes to users.
#[async_trait]
pub trait OtpMailer: Send + Sync + 'static {
    /// Delivers an OTP. Errors are the implementation's own; callers log and
    /// continue.
    async fn send_otp(&self, email: &str, otp: &str) -> Result<(), String>;
}

/// Dispatches an OTP without blocking the caller on the outcome.
pub async fn send_fire_and_forget(mailer: &dyn OtpMailer, email: &str, otp: &str) {
    if let Err(message) = mailer.send_otp(email, otp).await {
        warn!(email, %message, "OTP delivery failed");
    }
}

/// A mailer that logs instead of sending. The default in development and in
/// tests.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl OtpMailer for LogMailer {
    async fn send_otp(&self, email: &str, otp: &str) -> Result<(), String> {
        info!(email, otp, "OTP issued (log mailer)");
        Ok(())
    }
}
