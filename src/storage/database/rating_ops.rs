//! Rating submission and aggregation
//!
//! A user holds at most one rating per answer; resubmitting replaces the
//! previous value. The reported average is always recomputed from the
//! full set of stored rows inside the same transaction as the write, so
//! the caller never observes a stale aggregate.

use crate::utils::error::{ForumError, Result};
use chrono::Utc;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::entities::{self, rating};
use super::ForumDatabase;

/// Fresh aggregate returned alongside every rating write
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    /// Mean of all ratings, rounded half-up to one decimal place
    pub average: f32,
    pub count: u64,
}

impl ForumDatabase {
    /// Create or replace the acting user's rating of an answer
    ///
    /// Rejects ratings of the user's own answer with `Forbidden`. The
    /// caller is expected to have range-checked `value` already.
    pub async fn submit_rating(
        &self,
        answer_id: i32,
        user_id: Uuid,
        value: f32,
    ) -> Result<RatingSummary> {
        let txn = self.db.begin().await?;

        let answer = entities::Answer::find_by_id(answer_id).one(&txn).await?;
        let Some(answer) = answer else {
            txn.rollback().await?;
            return Err(ForumError::not_found("Answer not found"));
        };

        if answer.user_id == user_id {
            txn.rollback().await?;
            return Err(ForumError::forbidden("You cannot rate your own answer"));
        }

        let existing = entities::Rating::find()
            .filter(rating::Column::AnswerId.eq(answer_id))
            .filter(rating::Column::UserId.eq(user_id))
            .one(&txn)
            .await?;

        match existing {
            Some(row) => {
                let mut row: rating::ActiveModel = row.into();
                row.value = Set(value);
                row.updated_at = Set(Utc::now());
                row.update(&txn).await?;
            }
            None => {
                let inserted = rating::ActiveModel {
                    answer_id: Set(answer_id),
                    user_id: Set(user_id),
                    value: Set(value),
                    created_at: Set(Utc::now()),
                    updated_at: Set(Utc::now()),
                    ..Default::default()
                }
                .insert(&txn)
                .await;
                if let Err(err) = inserted {
                    txn.rollback().await?;
                    return Err(map_duplicate_rating(err));
                }
            }
        }

        let summary = Self::summarize(&txn, answer_id).await?;
        txn.commit().await?;

        debug!(
            "Rating recorded for answer {}: average={}, count={}",
            answer_id, summary.average, summary.count
        );
        Ok(summary)
    }

    /// Current aggregate for an answer, without writing anything
    pub async fn rating_summary(&self, answer_id: i32) -> Result<RatingSummary> {
        let answer = entities::Answer::find_by_id(answer_id)
            .one(&self.db)
            .await?;
        if answer.is_none() {
            return Err(ForumError::not_found("Answer not found"));
        }
        Self::summarize(&self.db, answer_id).await
    }

    /// The acting user's own rating of an answer, if any
    pub async fn find_user_rating(&self, answer_id: i32, user_id: Uuid) -> Result<Option<f32>> {
        let row = entities::Rating::find()
            .filter(rating::Column::AnswerId.eq(answer_id))
            .filter(rating::Column::UserId.eq(user_id))
            .one(&self.db)
            .await?;
        Ok(row.map(|r| r.value))
    }

    async fn summarize<C: ConnectionTrait>(conn: &C, answer_id: i32) -> Result<RatingSummary> {
        let rows = entities::Rating::find()
            .filter(rating::Column::AnswerId.eq(answer_id))
            .all(conn)
            .await?;

        let count = rows.len() as u64;
        let average = if count == 0 {
            0.0
        } else {
            let sum: f32 = rows.iter().map(|r| r.value).sum();
            round_one_decimal(sum / count as f32)
        };

        Ok(RatingSummary { average, count })
    }
}

/// The unique index on (answer_id, user_id) decides races between two
/// first-time submissions from the same user; the loser reports a
/// conflict rather than a storage failure.
pub(super) fn map_duplicate_rating(err: DbErr) -> ForumError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        ForumError::Conflict("Rating already submitted for this answer".to_string())
    } else {
        err.into()
    }
}

fn round_one_decimal(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod rounding_tests {
    use super::*;

    #[test]
    fn test_midpoint_rounds_up() {
        // mean(4.5, 3.0) = 3.75, reported as 3.8
        assert_eq!(round_one_decimal(3.75), 3.8);
    }

    #[test]
    fn test_exact_values_unchanged() {
        assert_eq!(round_one_decimal(4.5), 4.5);
        assert_eq!(round_one_decimal(0.0), 0.0);
        assert_eq!(round_one_decimal(5.0), 5.0);
    }

    #[test]
    fn test_repeating_fraction() {
        // mean(4.0, 4.0, 3.0) = 3.666..., reported as 3.7
        assert_eq!(round_one_decimal(11.0 / 3.0), 3.7);
    }
}
