//! Category listing endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ForumError;
use actix_web::{web, HttpResponse};
use serde::Serialize;

/// Configure category routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/categories", web::get().to(list_categories));
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub id: i32,
    pub name: String,
}

/// List all categories, alphabetically
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, ForumError> {
    let categories: Vec<CategoryView> = state
        .db
        .list_categories()
        .await?
        .into_iter()
        .map(|c| CategoryView {
            id: c.id,
            name: c.name,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(categories)))
}
