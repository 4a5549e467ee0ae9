use crate::db::{models::*, DbPool};
use crate::error::{Error, Result};

/// Create a user account
pub async fn create_user(pool: &DbPool, new_user: &NewUser) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (nome, email, senha_hash)
        VALUES (?, ?, ?)
        RETURNING id, nome, email, senha_hash, data_criacao
        "#,
    )
    .bind(&new_user.nome)
    .bind(&new_user.email)
    .bind(&new_user.senha_hash)
    .fetch_one(pool)
    .await?;

    Ok(user)
}

/// Look up a user by (already lowercased) email
pub async fn get_user_by_email(pool: &DbPool, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, nome, email, senha_hash, data_criacao FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
pub async fn get_user(pool: &DbPool, user_id: i64) -> Result<User> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, nome, email, senha_hash, data_criacao FROM users WHERE id = ?",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound("Usuário não encontrado".to_string()))?;

    Ok(user)
}
