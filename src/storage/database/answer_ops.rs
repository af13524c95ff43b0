use crate::utils::error::{ForumError, Result};
use chrono::Utc;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::entities::{self, answer, user};
use super::ForumDatabase;

/// Fields required to create an answer
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub question_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
}

/// Result of a committed answer insert, carrying what the notification
/// side effect needs so it can run strictly after the commit.
#[derive(Debug)]
pub struct AnswerPosted {
    pub answer_id: i32,
    pub question_title: String,
    pub owner_email: Option<String>,
}

impl ForumDatabase {
    /// List a question's answers with author usernames
    pub async fn list_answers(
        &self,
        question_id: Uuid,
    ) -> Result<Vec<(answer::Model, Option<user::Model>)>> {
        let answers = entities::Answer::find()
            .find_also_related(entities::User)
            .filter(answer::Column::QuestionId.eq(question_id))
            .order_by_asc(answer::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(answers)
    }

    /// Insert an answer after verifying its parent question exists
    ///
    /// The existence check and the insert share one transaction so they
    /// observe a consistent snapshot; a question deleted concurrently
    /// surfaces as `NotFound`, never as an orphaned answer.
    pub async fn create_answer(&self, new_answer: NewAnswer) -> Result<AnswerPosted> {
        let txn = self.db.begin().await?;

        let question = entities::Question::find()
            .filter(
                super::entities::question::Column::QuestionId.eq(new_answer.question_id),
            )
            .one(&txn)
            .await?;

        let Some(question) = question else {
            txn.rollback().await?;
            return Err(ForumError::not_found("Question not found"));
        };

        let now = Utc::now();
        let model = answer::ActiveModel {
            id: NotSet,
            question_id: Set(new_answer.question_id),
            user_id: Set(new_answer.user_id),
            body: Set(new_answer.body),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let insert = entities::Answer::insert(model).exec(&txn).await?;

        // Self-answers need no notification.
        let owner = if question.user_id == new_answer.user_id {
            None
        } else {
            entities::User::find_by_id(question.user_id).one(&txn).await?
        };

        txn.commit().await?;

        debug!(
            "Answer {} posted on question {}",
            insert.last_insert_id, new_answer.question_id
        );

        Ok(AnswerPosted {
            answer_id: insert.last_insert_id,
            question_title: question.title,
            owner_email: owner.map(|u| u.email),
        })
    }
}
