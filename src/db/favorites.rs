use crate::db::{models::*, DbPool};
use crate::error::Result;

/// Whether the user has favorited the recipe
pub async fn is_favorite(pool: &DbPool, user_id: i64, recipe_id: i64) -> Result<bool> {
    let found: Option<i64> =
        sqlx::query_scalar("SELECT id FROM favoritos WHERE user_id = ? AND recipe_id = ?")
            .bind(user_id)
            .bind(recipe_id)
            .fetch_optional(pool)
            .await?;

    Ok(found.is_some())
}

pub async fn add_favorite(pool: &DbPool, user_id: i64, recipe_id: i64) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO favoritos (user_id, recipe_id) VALUES (?, ?)")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    Ok(())
}

pub async fn remove_favorite(pool: &DbPool, user_id: i64, recipe_id: i64) -> Result<()> {
    sqlx::query("DELETE FROM favoritos WHERE user_id = ? AND recipe_id = ?")
        .bind(user_id)
        .bind(recipe_id)
        .execute(pool)
        .await?;

    Ok(())
}

/// Flip the favorite state and return the new one
pub async fn toggle_favorite(pool: &DbPool, user_id: i64, recipe_id: i64) -> Result<bool> {
    if is_favorite(pool, user_id, recipe_id).await? {
        remove_favorite(pool, user_id, recipe_id).await?;
        Ok(false)
    } else {
        add_favorite(pool, user_id, recipe_id).await?;
        Ok(true)
    }
}

/// Count favorites of a user
pub async fn count_favorites(pool: &DbPool, user_id: i64) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM favoritos WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

/// List favorites of a user, most recently favorited first
pub async fn list_favorites(
    pool: &DbPool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<FavoriteRecipe>> {
    let favorites = sqlx::query_as::<_, FavoriteRecipe>(
        r#"
        SELECT r.id, r.titulo, CAST(r.nota AS TEXT) AS nota,
               CAST(r.avaliacoes AS TEXT) AS avaliacoes, r.autor,
               r.tempo_preparo, r.link, r.imagem, f.data_favoritado
        FROM favoritos f
        JOIN recipes r ON r.id = f.recipe_id
        WHERE f.user_id = ?
        ORDER BY f.data_favoritado DESC, f.id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(favorites)
}
