//! User registration endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::database::NewUser;
use crate::utils::crypto::password::hash_password;
use crate::utils::error::ForumError;
use crate::utils::validation::DataValidator;
use actix_web::{web, HttpResponse};
use tracing::info;

use super::models::{RegisterRequest, RegisterResponse};

/// User registration endpoint
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ForumError> {
    info!("User registration attempt: {}", request.username);

    DataValidator::validate_username(&request.username)?;
    DataValidator::validate_required("firstname", &request.firstname)?;
    DataValidator::validate_required("lastname", &request.lastname)?;
    DataValidator::validate_email(&request.email)?;
    DataValidator::validate_password(&request.password)?;

    let password_hash = hash_password(&request.password)?;

    // Uniqueness rides on the database's constraints; a duplicate
    // surfaces as Conflict from the insert itself, so there is no
    // check-then-insert window here.
    let created = state
        .db
        .create_user(NewUser {
            username: request.username.clone(),
            firstname: request.firstname.clone(),
            lastname: request.lastname.clone(),
            email: request.email.clone(),
            password_hash,
        })
        .await?;

    info!("User registered: {}", created.username);

    let response = RegisterResponse {
        user_id: created.id,
        username: created.username,
        email: created.email,
        message: "Registration successful".to_string(),
    };

    Ok(HttpResponse::Created().json(ApiResponse::success(response)))
}
