//! Question endpoints

use crate::server::middleware::current_user_id;
use crate::server::routes::{ApiResponse, PaginationQuery};
use crate::server::state::AppState;
use crate::storage::database::NewQuestion;
use crate::utils::error::ForumError;
use crate::utils::validation::DataValidator;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::storage::database::entities::{question, user};

/// Configure question routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/questions")
            .route("", web::get().to(list_questions))
            .route("", web::post().to(create_question))
            .route("/{question_id}", web::get().to(get_question)),
    );
}

/// Question as returned by listing and detail endpoints
#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub question_id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub username: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl QuestionView {
    pub(super) fn from_row((question, author): (question::Model, Option<user::Model>)) -> Self {
        Self {
            question_id: question.question_id,
            title: question.title,
            description: question.description,
            tag: question.tag,
            username: author
                .map(|u| u.username)
                .unwrap_or_else(|| "unknown".to_string()),
            created_at: question.created_at,
        }
    }
}

/// One page of questions
#[derive(Debug, Clone, Serialize)]
pub struct QuestionListResponse {
    pub questions: Vec<QuestionView>,
    pub page: u64,
    pub total_pages: u64,
}

/// Question creation request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuestionRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Question creation response
#[derive(Debug, Clone, Serialize)]
pub struct CreateQuestionResponse {
    pub question_id: Uuid,
    pub message: String,
}

/// List questions, newest first
pub async fn list_questions(
    state: web::Data<AppState>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ForumError> {
    query.validate().map_err(ForumError::bad_request)?;
    debug!("Listing questions, page {}", query.page);

    let page = state.db.list_questions(query.page, query.limit).await?;
    let response = QuestionListResponse {
        questions: page.questions.into_iter().map(QuestionView::from_row).collect(),
        page: query.page,
        total_pages: page.total_pages,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response)))
}

/// Fetch a single question by its external id
pub async fn get_question(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ForumError> {
    let question_id = parse_question_id(&path)?;

    let row = state
        .db
        .find_question(question_id)
        .await?
        .ok_or_else(|| ForumError::not_found("Question not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(QuestionView::from_row(row))))
}

/// Post a new question
pub async fn create_question(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<CreateQuestionRequest>,
) -> Result<HttpResponse, ForumError> {
    let user_id = current_user_id(&req).map_err(|_| ForumError::unauthenticated("Please log in"))?;

    DataValidator::validate_required("title", &request.title)?;
    DataValidator::validate_required("description", &request.description)?;

    let category_id = match &request.category {
        Some(name) => Some(
            state
                .db
                .find_category_by_name(name)
                .await?
                .ok_or_else(|| ForumError::bad_request("Unknown category"))?
                .id,
        ),
        None => None,
    };

    let question_id = state
        .db
        .create_question(NewQuestion {
            user_id,
            title: request.title.clone(),
            description: request.description.clone(),
            tag: request.tag.clone(),
            category_id,
        })
        .await?;

    info!("Question {} created by user {}", question_id, user_id);

    let response = CreateQuestionResponse {
        question_id,
        message: "Question posted".to_string(),
    };
    Ok(HttpResponse::Created().json(ApiResponse::success(response)))
}

pub(super) fn parse_question_id(raw: &str) -> Result<Uuid, ForumError> {
    raw.parse()
        .map_err(|_| ForumError::bad_request("Invalid question id"))
}
