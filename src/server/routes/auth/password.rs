//! Password recovery endpoints
//!
//! The forgot-password response is identical whether or not the email
//! matches an account; everything account-specific happens after the
//! response is already decided. Only a SHA-256 digest of the recovery
//! token is ever stored, so the lookup during reset compares digests
//! and a database leak does not expose usable tokens.

use crate::notify::deliver_in_background;
use crate::server::routes::{ApiResponse, MessageResponse};
use crate::server::state::AppState;
use crate::utils::crypto::password::hash_password;
use crate::utils::crypto::token::{generate_reset_token, hash_reset_token};
use crate::utils::error::ForumError;
use crate::utils::validation::DataValidator;
use actix_web::{web, HttpResponse};
use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use super::models::{ForgotPasswordRequest, ResetPasswordRequest};

const RESET_TOKEN_TTL_HOURS: i64 = 1;
const FORGOT_RESPONSE: &str = "If that email is registered, a reset link has been sent";

/// Request a password reset link
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, ForumError> {
    DataValidator::validate_required("email", &request.email)?;
    debug!("Password reset requested");

    if let Some(user) = state.db.find_user_by_email(&request.email).await? {
        let token = generate_reset_token();
        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

        state
            .db
            .set_reset_token(user.id, hash_reset_token(&token), expires_at)
            .await?;

        let link = format!(
            "{}/reset-password?token={}",
            state.config.email.frontend_url.trim_end_matches('/'),
            token
        );
        let body = format!(
            "<p>Hello {},</p>\
             <p>A password reset was requested for your account. \
             <a href=\"{}\">Reset your password</a> within the next hour.</p>\
             <p>If you did not request this, you can ignore this email.</p>",
            user.firstname, link
        );

        deliver_in_background(
            state.notifier.clone(),
            user.email,
            "Password Reset Request".to_string(),
            body,
        );
        info!("Reset token issued for user {}", user.id);
    } else {
        debug!("Password reset requested for unknown email");
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(FORGOT_RESPONSE))))
}

/// Consume a reset token and set a new password
pub async fn reset_password(
    state: web::Data<AppState>,
    request: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, ForumError> {
    DataValidator::validate_required("token", &request.token)?;
    DataValidator::validate_password(&request.new_password)?;

    let token_hash = hash_reset_token(&request.token);
    let new_hash = hash_password(&request.new_password)?;

    let consumed = state.db.reset_password_by_token(&token_hash, new_hash).await?;
    if !consumed {
        warn!("Reset attempted with invalid or expired token");
        return Err(ForumError::bad_request("Invalid or expired reset token"));
    }

    info!("Password reset completed");
    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new(
        "Password has been reset",
    ))))
}
