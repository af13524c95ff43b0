//! Ownership-checked mutation of questions and answers
//!
//! Edit and delete share one shape: LOAD the target's owner inside an open
//! transaction, AUTHORIZE against the acting user, MUTATE with the owner
//! re-asserted in the statement's filter, COMMIT. A zero affected-row
//! count after a successful LOAD means a concurrent writer won the race;
//! it surfaces as `NotFound` rather than being silently ignored. Every
//! failure path rolls the transaction back in full.

use crate::utils::error::{ForumError, Result};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::str::FromStr;
use tracing::{debug, warn};
use uuid::Uuid;

use super::entities::{self, answer, question, rating};
use super::ForumDatabase;

/// Content-type discriminator, validated before any query is issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Question,
    Answer,
}

impl FromStr for ContentKind {
    type Err = ForumError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "question" => Ok(ContentKind::Question),
            "answer" => Ok(ContentKind::Answer),
            _ => Err(ForumError::bad_request("Invalid content type")),
        }
    }
}

/// Replacement fields for a question edit
#[derive(Debug, Clone)]
pub struct QuestionEdit {
    pub title: String,
    pub description: String,
    pub tag: Option<String>,
}

impl ForumDatabase {
    /// Edit a question's fields, owner-checked
    pub async fn edit_question(
        &self,
        question_id: Uuid,
        acting_user: Uuid,
        edit: QuestionEdit,
    ) -> Result<()> {
        let txn = self.db.begin().await?;

        let owner = Self::load_question_owner(&txn, question_id).await?;
        let Some(owner) = owner else {
            txn.rollback().await?;
            return Err(ForumError::not_found("Question not found"));
        };

        if owner != acting_user {
            warn!(
                "Ownership mismatch on question {}: owner={}, request user={}",
                question_id, owner, acting_user
            );
            txn.rollback().await?;
            return Err(ForumError::forbidden(
                "You are not authorized to edit this question",
            ));
        }

        let result = entities::Question::update_many()
            .col_expr(question::Column::Title, Expr::value(edit.title))
            .col_expr(question::Column::Description, Expr::value(edit.description))
            .col_expr(question::Column::Tag, Expr::value(edit.tag))
            .col_expr(question::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(question::Column::QuestionId.eq(question_id))
            .filter(question::Column::UserId.eq(acting_user))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            // Lost the race against a concurrent delete.
            txn.rollback().await?;
            return Err(ForumError::not_found("Question not found"));
        }

        txn.commit().await?;
        debug!("Question {} updated", question_id);
        Ok(())
    }

    /// Edit an answer's body, owner-checked
    pub async fn edit_answer(&self, answer_id: i32, acting_user: Uuid, body: String) -> Result<()> {
        let txn = self.db.begin().await?;

        let owner = Self::load_answer_owner(&txn, answer_id).await?;
        let Some(owner) = owner else {
            txn.rollback().await?;
            return Err(ForumError::not_found("Answer not found"));
        };

        if owner != acting_user {
            warn!(
                "Ownership mismatch on answer {}: owner={}, request user={}",
                answer_id, owner, acting_user
            );
            txn.rollback().await?;
            return Err(ForumError::forbidden(
                "You are not authorized to edit this answer",
            ));
        }

        let result = entities::Answer::update_many()
            .col_expr(answer::Column::Body, Expr::value(body))
            .col_expr(answer::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(answer::Column::Id.eq(answer_id))
            .filter(answer::Column::UserId.eq(acting_user))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ForumError::not_found("Answer not found"));
        }

        txn.commit().await?;
        debug!("Answer {} updated", answer_id);
        Ok(())
    }

    /// Delete a question and everything hanging off it, owner-checked
    ///
    /// Dependents go first: ratings of the question's answers, then the
    /// answers, then the question, all in one transaction.
    pub async fn delete_question(&self, question_id: Uuid, acting_user: Uuid) -> Result<()> {
        let txn = self.db.begin().await?;

        let owner = Self::load_question_owner(&txn, question_id).await?;
        let Some(owner) = owner else {
            txn.rollback().await?;
            return Err(ForumError::not_found("Question not found"));
        };

        if owner != acting_user {
            txn.rollback().await?;
            return Err(ForumError::forbidden(
                "You are not authorized to delete this question",
            ));
        }

        let answer_ids: Vec<i32> = entities::Answer::find()
            .filter(answer::Column::QuestionId.eq(question_id))
            .all(&txn)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        if !answer_ids.is_empty() {
            entities::Rating::delete_many()
                .filter(rating::Column::AnswerId.is_in(answer_ids))
                .exec(&txn)
                .await?;

            entities::Answer::delete_many()
                .filter(answer::Column::QuestionId.eq(question_id))
                .exec(&txn)
                .await?;
        }

        let result = entities::Question::delete_many()
            .filter(question::Column::QuestionId.eq(question_id))
            .filter(question::Column::UserId.eq(acting_user))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ForumError::not_found("Question not found"));
        }

        txn.commit().await?;
        debug!("Question {} and its answers deleted", question_id);
        Ok(())
    }

    /// Delete an answer and its ratings, owner-checked
    pub async fn delete_answer(&self, answer_id: i32, acting_user: Uuid) -> Result<()> {
        let txn = self.db.begin().await?;

        let owner = Self::load_answer_owner(&txn, answer_id).await?;
        let Some(owner) = owner else {
            txn.rollback().await?;
            return Err(ForumError::not_found("Answer not found"));
        };

        if owner != acting_user {
            txn.rollback().await?;
            return Err(ForumError::forbidden(
                "You are not authorized to delete this answer",
            ));
        }

        entities::Rating::delete_many()
            .filter(rating::Column::AnswerId.eq(answer_id))
            .exec(&txn)
            .await?;

        let result = entities::Answer::delete_many()
            .filter(answer::Column::Id.eq(answer_id))
            .filter(answer::Column::UserId.eq(acting_user))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Err(ForumError::not_found("Answer not found"));
        }

        txn.commit().await?;
        debug!("Answer {} deleted", answer_id);
        Ok(())
    }

    async fn load_question_owner(
        txn: &DatabaseTransaction,
        question_id: Uuid,
    ) -> Result<Option<Uuid>> {
        let question = entities::Question::find()
            .filter(question::Column::QuestionId.eq(question_id))
            .one(txn)
            .await?;
        Ok(question.map(|q| q.user_id))
    }

    async fn load_answer_owner(txn: &DatabaseTransaction, answer_id: i32) -> Result<Option<Uuid>> {
        let answer = entities::Answer::find_by_id(answer_id).one(txn).await?;
        Ok(answer.map(|a| a.user_id))
    }
}

#[cfg(test)]
mod content_kind_tests {
    use super::*;

    #[test]
    fn test_known_kinds_parse() {
        assert_eq!("question".parse::<ContentKind>().unwrap(), ContentKind::Question);
        assert_eq!("answer".parse::<ContentKind>().unwrap(), ContentKind::Answer);
    }

    #[test]
    fn test_unknown_kind_is_bad_request() {
        let err = "comment".parse::<ContentKind>().unwrap_err();
        assert!(matches!(err, ForumError::BadRequest(_)));
        // Case matters: the discriminator is an enumerated set
        assert!("Question".parse::<ContentKind>().is_err());
        assert!("".parse::<ContentKind>().is_err());
    }
}
