use crate::utils::error::{ForumError, Result};
use chrono::{DateTime, Utc};
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::entities::{self, user};
use super::ForumDatabase;

/// Fields required to create a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub email: String,
    pub password_hash: String,
}

impl ForumDatabase {
    /// Find user by ID
    pub async fn find_user_by_id(&self, user_id: Uuid) -> Result<Option<user::Model>> {
        let user = entities::User::find_by_id(user_id).one(&self.db).await?;
        Ok(user)
    }

    /// Find user by email (case-sensitive exact match)
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<user::Model>> {
        let user = entities::User::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(user)
    }

    /// Create a new user
    ///
    /// The unique constraints on username and email are the authoritative
    /// guard: registration does no pre-check, so a duplicate lands here
    /// as `Conflict`.
    pub async fn create_user(&self, new_user: NewUser) -> Result<user::Model> {
        debug!("Creating user: {}", new_user.username);

        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(new_user.username),
            email: Set(new_user.email),
            firstname: Set(new_user.firstname),
            lastname: Set(new_user.lastname),
            password_hash: Set(new_user.password_hash),
            reset_token_hash: Set(None),
            reset_token_expires_at: Set(None),
            created_at: Set(Utc::now().into()),
        };

        let created = model.insert(&self.db).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                ForumError::Conflict("Username or email already taken".to_string())
            } else {
                e.into()
            }
        })?;

        Ok(created)
    }

    /// Store a reset token digest with its expiry, replacing any prior one
    ///
    /// Both columns are written together; they are never set individually.
    pub async fn set_reset_token(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        debug!("Storing reset token for user: {}", user_id);

        let user = entities::User::find_by_id(user_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ForumError::not_found("User not found"))?;

        let mut active: user::ActiveModel = user.into();
        active.reset_token_hash = Set(Some(token_hash));
        active.reset_token_expires_at = Set(Some(expires_at.into()));
        active.update(&self.db).await?;

        Ok(())
    }

    /// Consume a live reset token and replace the password, atomically
    ///
    /// Looks up the user whose stored token digest matches and whose
    /// expiry is strictly after now, then writes the new hash and clears
    /// both reset columns in the same transaction. Returns `false` when
    /// no live token matched (absent and expired are indistinguishable to
    /// the caller). Any failure rolls back, leaving the old password and
    /// token intact.
    pub async fn reset_password_by_token(
        &self,
        token_hash: &str,
        new_password_hash: String,
    ) -> Result<bool> {
        let txn = self.db.begin().await?;

        let user = entities::User::find()
            .filter(user::Column::ResetTokenHash.eq(token_hash))
            .filter(user::Column::ResetTokenExpiresAt.gt(Utc::now()))
            .one(&txn)
            .await?;

        let Some(user) = user else {
            txn.rollback().await?;
            return Ok(false);
        };

        debug!("Resetting password for user: {}", user.id);

        let mut active: user::ActiveModel = user.into();
        active.password_hash = Set(new_password_hash);
        active.reset_token_hash = Set(None);
        active.reset_token_expires_at = Set(None);
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(true)
    }
}
