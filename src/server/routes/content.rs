//! Owner-only edit and delete of questions and answers
//!
//! Both endpoints take a `type` discriminator naming what the id refers
//! to. The discriminator is validated before the id is parsed, so a
//! bad type never leaks whether the id exists.

use crate::server::middleware::current_user_id;
use crate::server::routes::questions::parse_question_id;
use crate::server::routes::{ApiResponse, MessageResponse};
use crate::server::state::AppState;
use crate::storage::database::{ContentKind, QuestionEdit};
use crate::utils::error::ForumError;
use crate::utils::validation::DataValidator;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

/// Configure content mutation routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/content")
            .route("/{id}", web::put().to(edit_content))
            .route("/{id}", web::delete().to(delete_content)),
    );
}

/// Content edit request
#[derive(Debug, Clone, Deserialize)]
pub struct EditRequest {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub tag: Option<String>,
}

/// Discriminator for content deletion
#[derive(Debug, Clone, Deserialize)]
pub struct DeleteQuery {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Edit a question or answer in place
pub async fn edit_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    request: web::Json<EditRequest>,
) -> Result<HttpResponse, ForumError> {
    let user_id = current_user_id(&req).map_err(|_| ForumError::unauthenticated("Please log in"))?;
    let kind: ContentKind = request.kind.parse()?;

    match kind {
        ContentKind::Question => {
            let question_id = parse_question_id(&path)?;
            let title = request
                .title
                .clone()
                .ok_or_else(|| ForumError::bad_request("Missing field: title"))?;
            let description = request
                .description
                .clone()
                .ok_or_else(|| ForumError::bad_request("Missing field: description"))?;
            DataValidator::validate_required("title", &title)?;
            DataValidator::validate_required("description", &description)?;

            state
                .db
                .edit_question(
                    question_id,
                    user_id,
                    QuestionEdit {
                        title,
                        description,
                        tag: request.tag.clone(),
                    },
                )
                .await?;
            info!("Question {} edited by user {}", question_id, user_id);
        }
        ContentKind::Answer => {
            let answer_id = parse_answer_id(&path)?;
            let body = request
                .answer
                .clone()
                .ok_or_else(|| ForumError::bad_request("Missing field: answer"))?;
            DataValidator::validate_required("answer", &body)?;

            state.db.edit_answer(answer_id, user_id, body).await?;
            info!("Answer {} edited by user {}", answer_id, user_id);
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new("Content updated"))))
}

/// Delete a question (with its answers and ratings) or a single answer
pub async fn delete_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<DeleteQuery>,
) -> Result<HttpResponse, ForumError> {
    let user_id = current_user_id(&req).map_err(|_| ForumError::unauthenticated("Please log in"))?;
    let kind: ContentKind = query.kind.parse()?;

    match kind {
        ContentKind::Question => {
            let question_id: Uuid = parse_question_id(&path)?;
            state.db.delete_question(question_id, user_id).await?;
            info!("Question {} deleted by user {}", question_id, user_id);
        }
        ContentKind::Answer => {
            let answer_id = parse_answer_id(&path)?;
            state.db.delete_answer(answer_id, user_id).await?;
            info!("Answer {} deleted by user {}", answer_id, user_id);
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(MessageResponse::new("Content deleted"))))
}

fn parse_answer_id(raw: &str) -> Result<i32, ForumError> {
    raw.parse()
        .map_err(|_| ForumError::bad_request("Invalid answer id"))
}
