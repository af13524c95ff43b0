//! Login endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::crypto::password::verify_password;
use crate::utils::error::ForumError;
use actix_web::{web, HttpResponse};
use tracing::{debug, info};

use super::models::{LoginRequest, LoginResponse};

const BAD_CREDENTIALS: &str = "Invalid email or password";

/// Login endpoint
///
/// An unknown email and a wrong password produce byte-identical
/// responses so the endpoint cannot be used to probe for accounts.
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ForumError> {
    debug!("Login attempt");

    let user = state
        .db
        .find_user_by_email(&request.email)
        .await?
        .ok_or_else(|| ForumError::unauthenticated(BAD_CREDENTIALS))?;

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(ForumError::unauthenticated(BAD_CREDENTIALS));
    }

    let token = state.jwt.issue_token(user.id)?;
    info!("User logged in: {}", user.username);

    let response = LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.jwt.expiration(),
        username: user.username,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}
