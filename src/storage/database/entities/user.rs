use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
///
/// The two reset-token columns are co-nullable: every write sets or clears
/// them together through the password-recovery operations.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// User ID (UUID)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Username (unique)
    #[sea_orm(unique)]
    pub username: String,

    /// Email address (unique)
    #[sea_orm(unique)]
    pub email: String,

    /// First name
    pub firstname: String,

    /// Last name
    pub lastname: String,

    /// Argon2 password hash
    pub password_hash: String,

    /// SHA-256 digest of the active reset token, if any
    pub reset_token_hash: Option<String>,

    /// Expiry of the active reset token, if any
    pub reset_token_expires_at: Option<DateTimeUtc>,

    /// Creation timestamp
    pub created_at: DateTimeUtc,
}

/// User entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Questions posted by this user
    #[sea_orm(has_many = "super::question::Entity")]
    Questions,

    /// Answers posted by this user
    #[sea_orm(has_many = "super::answer::Entity")]
    Answers,

    /// Ratings submitted by this user
    #[sea_orm(has_many = "super::rating::Entity")]
    Ratings,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl Related<super::answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl Related<super::rating::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ratings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
