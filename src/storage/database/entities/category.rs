use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category lookup table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Category ID
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Category name (unique)
    #[sea_orm(unique)]
    pub name: String,
}

/// Category entity relations
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Questions filed under this category
    #[sea_orm(has_many = "super::question::Entity")]
    Questions,
}

impl Related<super::question::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Questions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
