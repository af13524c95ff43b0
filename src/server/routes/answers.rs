//! Answer endpoints

use crate::notify::deliver_in_background;
use crate::server::middleware::current_user_id;
use crate::server::routes::questions::parse_question_id;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::database::NewAnswer;
use crate::utils::error::ForumError;
use crate::utils::validation::DataValidator;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::storage::database::entities::{answer, user};

/// Configure answer routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/answers")
            .route("", web::post().to(create_answer))
            .route("/{question_id}", web::get().to(list_answers)),
    );
}

/// Answer as returned by the listing endpoint
#[derive(Debug, Clone, Serialize)]
pub struct AnswerView {
    pub answer_id: i32,
    pub body: String,
    pub username: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Answer creation request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAnswerRequest {
    #[serde(alias = "questionId")]
    pub question_id: String,
    pub answer: String,
}

/// Answer creation response
#[derive(Debug, Clone, Serialize)]
pub struct CreateAnswerResponse {
    pub answer_id: i32,
    pub message: String,
}

/// List a question's answers, oldest first
///
/// A question with no answers is reported as 404 so clients can show
/// their "be the first to answer" state.
pub async fn list_answers(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ForumError> {
    let question_id = parse_question_id(&path)?;

    let rows = state.db.list_answers(question_id).await?;
    if rows.is_empty() {
        return Err(ForumError::not_found("No answers found for this question"));
    }

    let answers: Vec<AnswerView> = rows.into_iter().map(view_from_row).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(answers)))
}

/// Post an answer to a question
pub async fn create_answer(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<CreateAnswerRequest>,
) -> Result<HttpResponse, ForumError> {
    let user_id = current_user_id(&req).map_err(|_| ForumError::unauthenticated("Please log in"))?;

    DataValidator::validate_required("answer", &request.answer)?;
    let question_id: Uuid = parse_question_id(&request.question_id)?;

    let posted = state
        .db
        .create_answer(NewAnswer {
            question_id,
            user_id,
            body: request.answer.clone(),
        })
        .await?;

    info!(
        "Answer {} posted to question {} by user {}",
        posted.answer_id, question_id, user_id
    );

    // Notify the question's owner after the write is committed. Skipped
    // when they answered their own question.
    if let Some(owner_email) = posted.owner_email {
        let link = format!(
            "{}/questions/{}",
            state.config.email.frontend_url.trim_end_matches('/'),
            question_id
        );
        let body = format!(
            "<p>Your question \"{}\" has a new answer.</p>\
             <p><a href=\"{}\">Read it here</a>.</p>",
            posted.question_title, link
        );
        deliver_in_background(
            state.notifier.clone(),
            owner_email,
            "New Answer to Your Question".to_string(),
            body,
        );
    }

    let response = CreateAnswerResponse {
        answer_id: posted.answer_id,
        message: "Answer posted".to_string(),
    };
    Ok(HttpResponse::Created().json(ApiResponse::success(response)))
}

fn view_from_row((answer, author): (answer::Model, Option<user::Model>)) -> AnswerView {
    AnswerView {
        answer_id: answer.id,
        body: answer.body,
        username: author
            .map(|u| u.username)
            .unwrap_or_else(|| "unknown".to_string()),
        created_at: answer.created_at,
    }
}
