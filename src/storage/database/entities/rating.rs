use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Rating database model
///
/// One row per (answer, rater) pair; the unique index lives in the
/// migration. Values are constrained to [0, 5] in 0.5 increments by the
/// write path.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    /// Rating ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Rated answer
    pub answer_id: i32,

    /// Rating user; never the answer's owner
    pub user_id: Uuid,

    /// Rating value
    pub value: f32,

    /// Creation timestamp
    pub created_at: DateTimeUtc,

    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

/// Rating entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Rated answer
    #[sea_orm(
        belongs_to = "super::answer::Entity",
        from = "Column::AnswerId",
        to = "super::answer::Column::Id"
    )]
    Answer,

    /// Rating user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answer.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
