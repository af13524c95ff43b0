//! Rating endpoints

use crate::server::middleware::current_user_id;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ForumError;
use crate::utils::validation::DataValidator;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Configure rating routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/ratings")
            .route("", web::post().to(submit_rating))
            .route("/{answer_id}", web::get().to(get_rating)),
    );
}

/// Rating submission request
#[derive(Debug, Clone, Deserialize)]
pub struct RatingRequest {
    #[serde(alias = "answerId")]
    pub answer_id: i32,
    pub rating: f32,
}

/// Aggregate reported back to clients
#[derive(Debug, Clone, Serialize)]
pub struct RatingView {
    #[serde(rename = "averageRating")]
    pub average_rating: f32,
    #[serde(rename = "ratingCount")]
    pub rating_count: u64,
    /// The caller's own rating, 0.0 when they have not rated
    #[serde(rename = "userRating")]
    pub user_rating: f32,
}

/// Rate an answer, replacing any previous rating by the same user
pub async fn submit_rating(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<RatingRequest>,
) -> Result<HttpResponse, ForumError> {
    let user_id = current_user_id(&req).map_err(|_| ForumError::unauthenticated("Please log in"))?;

    DataValidator::validate_rating(request.rating)?;

    let summary = state
        .db
        .submit_rating(request.answer_id, user_id, request.rating)
        .await?;

    info!(
        "User {} rated answer {}: average now {}",
        user_id, request.answer_id, summary.average
    );

    let view = RatingView {
        average_rating: summary.average,
        rating_count: summary.count,
        user_rating: request.rating,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}

/// Current aggregate for an answer, plus the caller's own rating
pub async fn get_rating(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse, ForumError> {
    let user_id = current_user_id(&req).map_err(|_| ForumError::unauthenticated("Please log in"))?;
    let answer_id = path.into_inner();

    let summary = state.db.rating_summary(answer_id).await?;
    let user_rating = state.db.find_user_rating(answer_id, user_id).await?;

    let view = RatingView {
        average_rating: summary.average,
        rating_count: summary.count,
        user_rating: user_rating.unwrap_or(0.0),
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(view)))
}
