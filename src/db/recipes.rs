use crate::db::{models::*, DbPool};
use crate::error::{Error, Result};

// The scraper owns the recipes table, so every text column is cast and the
// title defaulted: one odd row must not fail the whole decode.
const RECIPE_COLUMNS: &str = r#"
    id, COALESCE(CAST(titulo AS TEXT), '') AS titulo,
    CAST(nota AS TEXT) AS nota, CAST(avaliacoes AS TEXT) AS avaliacoes,
    CAST(autor AS TEXT) AS autor, CAST(tempo_preparo AS TEXT) AS tempo_preparo,
    CAST(link AS TEXT) AS link, CAST(imagem AS TEXT) AS imagem,
    CAST(descricao AS TEXT) AS descricao,
    CAST(informacoes_adicionais AS TEXT) AS informacoes_adicionais
"#;

/// Fetch every recipe with its ingredient items joined by `|||`.
///
/// Recipes without ingredient rows are still returned, with `ings` set to
/// `NULL`. The connection is held only for the duration of the query and is
/// returned to the pool when dropped.
pub async fn fetch_all_with_ingredients(pool: &DbPool) -> Result<Vec<RecipeRow>> {
    let mut conn = pool.acquire().await?;

    let rows = sqlx::query_as::<_, RecipeRow>(
        r#"
        SELECT r.id, COALESCE(CAST(r.titulo AS TEXT), '') AS titulo,
               CAST(r.nota AS TEXT) AS nota,
               CAST(r.avaliacoes AS TEXT) AS avaliacoes,
               CAST(r.autor AS TEXT) AS autor,
               CAST(r.tempo_preparo AS TEXT) AS tempo_preparo,
               CAST(r.link AS TEXT) AS link, CAST(r.imagem AS TEXT) AS imagem,
               GROUP_CONCAT(CAST(i.item AS TEXT), '|||') AS ings
        FROM recipes r
        LEFT JOIN ingredients i ON i.recipe_id = r.id
        GROUP BY r.id
        "#,
    )
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows)
}

/// Get recipe by ID
pub async fn get_recipe(pool: &DbPool, recipe_id: i64) -> Result<Recipe> {
    let recipe = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?"
    ))
    .bind(recipe_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| Error::NotFound("Receita não encontrada".to_string()))?;

    Ok(recipe)
}

/// Pick one recipe at random, if any exist
pub async fn random_recipe(pool: &DbPool) -> Result<Option<Recipe>> {
    let recipe = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY RANDOM() LIMIT 1"
    ))
    .fetch_optional(pool)
    .await?;

    Ok(recipe)
}

/// Ingredient items of a recipe, in insertion order
pub async fn get_recipe_ingredients(pool: &DbPool, recipe_id: i64) -> Result<Vec<String>> {
    let items: Vec<String> =
        sqlx::query_scalar("SELECT item FROM ingredients WHERE recipe_id = ? ORDER BY id")
            .bind(recipe_id)
            .fetch_all(pool)
            .await?;

    Ok(items)
}

/// Preparation steps of a recipe, ordered by position
pub async fn get_recipe_steps(pool: &DbPool, recipe_id: i64) -> Result<Vec<String>> {
    let steps: Vec<String> =
        sqlx::query_scalar("SELECT text FROM recipe_steps WHERE recipe_id = ? ORDER BY position")
            .bind(recipe_id)
            .fetch_all(pool)
            .await?;

    Ok(steps)
}

/// Check whether a recipe exists
pub async fn recipe_exists(pool: &DbPool, recipe_id: i64) -> Result<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM recipes WHERE id = ?")
        .bind(recipe_id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

/// Count all recipes
pub async fn count_all_recipes(pool: &DbPool) -> Result<i64> {
    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM recipes")
        .fetch_one(pool)
        .await?;
    Ok(count.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::{memory_pool, seed_recipe};

    #[tokio::test]
    async fn test_fetch_all_with_ingredients() {
        let pool = memory_pool().await;

        let bolo = seed_recipe(
            &pool,
            "Bolo de Chocolate",
            Some("4.8"),
            Some("120 votos"),
            &["farinha", "chocolate em pó", "ovos"],
            &[],
        )
        .await;
        let vazio = seed_recipe(&pool, "Sem ingredientes", None, None, &[], &[]).await;

        let rows = fetch_all_with_ingredients(&pool).await.unwrap();
        assert_eq!(rows.len(), 2);

        let bolo_row = rows.iter().find(|r| r.id == bolo).unwrap();
        let mut items: Vec<&str> = bolo_row.ings.as_deref().unwrap().split("|||").collect();
        items.sort();
        assert_eq!(items, vec!["chocolate em pó", "farinha", "ovos"]);
        assert_eq!(bolo_row.nota.as_deref(), Some("4.8"));
        assert_eq!(bolo_row.avaliacoes.as_deref(), Some("120 votos"));

        let vazio_row = rows.iter().find(|r| r.id == vazio).unwrap();
        assert!(vazio_row.ings.is_none());
    }

    #[tokio::test]
    async fn test_numeric_rating_is_read_as_text() {
        let pool = memory_pool().await;
        sqlx::query("INSERT INTO recipes (titulo, nota) VALUES ('Pudim', 4.5)")
            .execute(&pool)
            .await
            .unwrap();

        let rows = fetch_all_with_ingredients(&pool).await.unwrap();
        assert_eq!(rows[0].nota.as_deref(), Some("4.5"));
    }

    #[tokio::test]
    async fn test_loose_scraped_schema_still_decodes() {
        // A scraped database created without this crate's constraints
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE recipes (id INTEGER PRIMARY KEY, titulo, nota, avaliacoes,
             autor, tempo_preparo, link, imagem, descricao, informacoes_adicionais)",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query("CREATE TABLE ingredients (id INTEGER PRIMARY KEY, recipe_id INTEGER, item)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO recipes (id, titulo, nota, autor) VALUES (1, NULL, 4.5, 42)")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO recipes (id, titulo) VALUES (2, 'Bolo')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO ingredients (recipe_id, item) VALUES (1, 'ovo'), (2, 'farinha')")
            .execute(&pool)
            .await
            .unwrap();

        let rows = fetch_all_with_ingredients(&pool).await.unwrap();
        assert_eq!(rows.len(), 2);

        let untitled = rows.iter().find(|r| r.id == 1).unwrap();
        assert_eq!(untitled.titulo, "");
        assert_eq!(untitled.nota.as_deref(), Some("4.5"));
        assert_eq!(untitled.autor.as_deref(), Some("42"));
        assert_eq!(untitled.ings.as_deref(), Some("ovo"));

        let recipe = get_recipe(&pool, 1).await.unwrap();
        assert_eq!(recipe.titulo, "");
    }

    #[tokio::test]
    async fn test_recipe_detail_queries() {
        let pool = memory_pool().await;
        let id = seed_recipe(
            &pool,
            "Arroz",
            Some("4.0"),
            Some("10 votos"),
            &["arroz", "água", "sal"],
            &["Refogue", "Cozinhe"],
        )
        .await;

        let recipe = get_recipe(&pool, id).await.unwrap();
        assert_eq!(recipe.titulo, "Arroz");
        assert_eq!(recipe.descricao.as_deref(), Some("desc"));

        assert_eq!(
            get_recipe_ingredients(&pool, id).await.unwrap(),
            vec!["arroz", "água", "sal"]
        );
        assert_eq!(
            get_recipe_steps(&pool, id).await.unwrap(),
            vec!["Refogue", "Cozinhe"]
        );

        assert!(recipe_exists(&pool, id).await.unwrap());
        assert!(!recipe_exists(&pool, id + 100).await.unwrap());
        assert_eq!(count_all_recipes(&pool).await.unwrap(), 1);

        let err = get_recipe(&pool, id + 100).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_random_recipe() {
        let pool = memory_pool().await;
        assert!(random_recipe(&pool).await.unwrap().is_none());

        let id = seed_recipe(&pool, "Única", None, None, &["ovo"], &[]).await;
        let picked = random_recipe(&pool).await.unwrap().unwrap();
        assert_eq!(picked.id, id);
    }
}
