use crate::utils::error::Result;
use chrono::Utc;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::entities::{self, question, user};
use super::ForumDatabase;

/// Fields required to create a question
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
    pub category_id: Option<i32>,
}

/// One page of questions with their authors
#[derive(Debug)]
pub struct QuestionPage {
    pub questions: Vec<(question::Model, Option<user::Model>)>,
    pub total_pages: u64,
}

impl ForumDatabase {
    /// List questions with author usernames, newest first
    pub async fn list_questions(&self, page: u64, limit: u64) -> Result<QuestionPage> {
        let paginator = entities::Question::find()
            .find_also_related(entities::User)
            .order_by_desc(question::Column::CreatedAt)
            .paginate(&self.db, limit.max(1));

        let total_pages = paginator.num_pages().await?;
        let questions = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(QuestionPage {
            questions,
            total_pages,
        })
    }

    /// Find a question by its external id, with its author
    pub async fn find_question(
        &self,
        question_id: Uuid,
    ) -> Result<Option<(question::Model, Option<user::Model>)>> {
        let result = entities::Question::find()
            .find_also_related(entities::User)
            .filter(question::Column::QuestionId.eq(question_id))
            .one(&self.db)
            .await?;
        Ok(result)
    }

    /// Create a question, generating its external id
    pub async fn create_question(&self, new_question: NewQuestion) -> Result<Uuid> {
        let question_id = Uuid::new_v4();
        debug!("Creating question {}", question_id);

        let now = Utc::now();
        let model = question::ActiveModel {
            id: NotSet,
            question_id: Set(question_id),
            user_id: Set(new_question.user_id),
            title: Set(new_question.title),
            description: Set(new_question.description),
            tag: Set(new_question.tag),
            category_id: Set(new_question.category_id),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        entities::Question::insert(model).exec(&self.db).await?;

        Ok(question_id)
    }

    /// Substring search over titles and descriptions, newest first
    pub async fn search_questions(
        &self,
        query: &str,
        page: u64,
        limit: u64,
    ) -> Result<QuestionPage> {
        let paginator = entities::Question::find()
            .find_also_related(entities::User)
            .filter(
                Condition::any()
                    .add(question::Column::Title.contains(query))
                    .add(question::Column::Description.contains(query)),
            )
            .order_by_desc(question::Column::CreatedAt)
            .paginate(&self.db, limit.max(1));

        let total_pages = paginator.num_pages().await?;
        let questions = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok(QuestionPage {
            questions,
            total_pages,
        })
    }
}
