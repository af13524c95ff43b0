//! Authenticated user profile endpoint

use crate::server::middleware::current_user_id;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpRequest, HttpResponse, Result as ActixResult};

use super::models::UserProfile;

/// Return the caller's own profile
pub async fn current_user(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> ActixResult<HttpResponse> {
    let user_id = current_user_id(&req)?;

    // The middleware verified existence, but the account can vanish
    // between that check and this query.
    let user = state
        .db
        .find_user_by_id(user_id)
        .await?
        .ok_or_else(|| crate::utils::error::ForumError::not_found("User not found"))?;

    let profile = UserProfile {
        user_id: user.id,
        username: user.username,
        firstname: user.firstname,
        lastname: user.lastname,
        email: user.email,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(profile)))
}
