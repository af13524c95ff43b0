use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Question database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    /// Row ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// External question ID (unique, generated independently of the row id)
    #[sea_orm(unique)]
    pub question_id: Uuid,

    /// Owning user; immutable after creation
    pub user_id: Uuid,

    /// Question title
    pub title: String,

    /// Question body
    #[sea_orm(column_type = "Text")]
    pub description: String,

    /// Optional free-form tag
    pub tag: Option<String>,

    /// Optional category reference
    pub category_id: Option<i32>,

    /// Creation timestamp
    pub created_at: DateTimeUtc,

    /// Last update timestamp
    pub updated_at: DateTimeUtc,
}

/// Question entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Owning user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    /// Category, when assigned
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,

    /// Answers to this question
    #[sea_orm(has_many = "super::answer::Entity")]
    Answers,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::answer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Answers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
