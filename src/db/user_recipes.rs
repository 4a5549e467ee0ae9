use crate::db::{models::*, DbPool};
use crate::error::{Error, Result};

/// Store a user-submitted recipe and return its ID
pub async fn create_user_recipe(pool: &DbPool, recipe: &NewUserRecipe) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO receitas_usuario
            (user_id, titulo, descricao, tempo_preparo, ingredientes, modo_preparo, imagem)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(recipe.user_id)
    .bind(&recipe.titulo)
    .bind(&recipe.descricao)
    .bind(&recipe.tempo_preparo)
    .bind(recipe.ingredientes.join("\n"))
    .bind(recipe.modo_preparo.join("\n"))
    .bind(&recipe.imagem)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Count recipes submitted by a user
pub async fn count_user_recipes(pool: &DbPool, user_id: i64) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM receitas_usuario WHERE user_id = ?")
        .bind(user_id)
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

/// List a user's submissions, newest first
pub async fn list_user_recipes(
    pool: &DbPool,
    user_id: i64,
    limit: i64,
    offset: i64,
) -> Result<Vec<UserRecipeSummary>> {
    let recipes = sqlx::query_as::<_, UserRecipeSummary>(
        r#"
        SELECT id, titulo, descricao, tempo_preparo, imagem, data_criacao
        FROM receitas_usuario
        WHERE user_id = ?
        ORDER BY data_criacao DESC, id DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await?;

    Ok(recipes)
}

/// Get one submission, only if it belongs to `user_id`
pub async fn get_user_recipe(pool: &DbPool, user_id: i64, recipe_id: i64) -> Result<UserRecipe> {
    let recipe = sqlx::query_as::<_, UserRecipe>(
        r#"
        SELECT id, user_id, titulo, descricao, tempo_preparo, ingredientes,
               modo_preparo, imagem, data_criacao
        FROM receitas_usuario
        WHERE id = ? AND user_id = ?
        "#,
    )
    .bind(recipe_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound("Receita não encontrada".to_string()))?;

    Ok(recipe)
}
