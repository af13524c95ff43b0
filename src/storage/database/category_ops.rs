//! Category lookups

use crate::utils::error::Result;
use sea_orm::*;

use super::entities::{self, category};
use super::ForumDatabase;

impl ForumDatabase {
    pub async fn list_categories(&self) -> Result<Vec<category::Model>> {
        let categories = entities::Category::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;
        Ok(categories)
    }

    pub async fn find_category_by_name(&self, name: &str) -> Result<Option<category::Model>> {
        let found = entities::Category::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(found)
    }
}
