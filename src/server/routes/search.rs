//! Question search endpoint

use crate::server::routes::questions::QuestionView;
use crate::server::routes::{ApiResponse, PaginationQuery};
use crate::server::state::AppState;
use crate::utils::error::ForumError;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Configure search routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/search", web::get().to(search));
}

/// Search query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    #[serde(default, alias = "q")]
    pub query: String,
    #[serde(flatten)]
    pub pagination: PaginationQuery,
}

/// Search results page
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub questions: Vec<QuestionView>,
    pub page: u64,
    pub total_pages: u64,
}

/// Substring search over question titles and descriptions
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, ForumError> {
    let term = query.query.trim();
    if term.is_empty() {
        return Err(ForumError::bad_request("Missing search query"));
    }
    query.pagination.validate().map_err(ForumError::bad_request)?;
    debug!("Searching questions for {:?}", term);

    let page = state
        .db
        .search_questions(term, query.pagination.page, query.pagination.limit)
        .await?;

    let response = SearchResponse {
        query: term.to_string(),
        questions: page
            .questions
            .into_iter()
            .map(QuestionView::from_row)
            .collect(),
        page: query.pagination.page,
        total_pages: page.total_pages,
    };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}
