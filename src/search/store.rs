use async_trait::async_trait;

use crate::db::{self, models::RecipeRow, DbPool};
use crate::error::Result;

/// Delimiter the store uses to join a recipe's ingredient items
pub const INGREDIENT_DELIMITER: &str = "|||";

/// Source of the recipe corpus the matcher scans.
///
/// Implementations must do the ingredient join/group themselves and return
/// one row per recipe, including recipes with no ingredients (`ings: None`).
#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn fetch_all_with_ingredients(&self) -> Result<Vec<RecipeRow>>;
}

#[async_trait]
impl RecipeStore for DbPool {
    async fn fetch_all_with_ingredients(&self) -> Result<Vec<RecipeRow>> {
        db::recipes::fetch_all_with_ingredients(self).await
    }
}

/// In-memory store, mostly useful for tests and offline tooling
#[async_trait]
impl RecipeStore for Vec<RecipeRow> {
    async fn fetch_all_with_ingredients(&self) -> Result<Vec<RecipeRow>> {
        Ok(self.clone())
    }
}
