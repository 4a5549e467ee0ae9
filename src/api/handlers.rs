use axum::{
    extract::{rejection::PathRejection, FromRef, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    api::models::*,
    auth::{AuthUser, TokenIssuer},
    config::Settings,
    db::{self, models::NewUserRecipe},
    search::{IngredientMatcher, Normalizer},
    utils::validation,
    Error, Result,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::SqlitePool,
    pub matcher: IngredientMatcher,
    pub tokens: Arc<TokenIssuer>,
    pub settings: Settings,
}

impl AppState {
    pub fn new(pool: sqlx::SqlitePool, settings: Settings) -> Self {
        let normalizer = Arc::new(Normalizer::new(settings.search.normalizer_cache_size));

        Self {
            pool,
            matcher: IngredientMatcher::new(normalizer),
            tokens: Arc::new(TokenIssuer::new(&settings.auth)),
            settings,
        }
    }

    fn page(&self, raw: Option<&str>) -> PageRequest {
        PageRequest::from_param(raw, self.settings.search.page_size)
    }
}

impl FromRef<AppState> for Arc<TokenIssuer> {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

/// Non-numeric ids fall through to the unknown-route response
fn numeric_id(path: std::result::Result<Path<i64>, PathRejection>) -> Result<i64> {
    path.map(|Path(id)| id).map_err(|_| route_not_found())
}

fn route_not_found() -> Error {
    Error::NotFound("Rota não encontrada".to_string())
}

/// GET / - Service status and endpoint listing
pub async fn index() -> Json<Value> {
    Json(json!({
        "status": "online",
        "endpoints": {
            "auth": {
                "registro": "POST /auth/registro",
                "login": "POST /auth/login",
                "perfil": "GET /auth/perfil (requer token)"
            },
            "receitas": {
                "buscar": "GET /receitas?ingredientes=x,y&pagina=1",
                "detalhes": "GET /receitas/<id>",
                "surpresa": "GET /receitas/surpresa",
                "favoritar": "POST /receitas/<id>/favoritar (requer token)",
                "favoritos": "GET /receitas/favoritos?pagina=1 (requer token)",
                "minhas": "GET /receitas/minhas?pagina=1 (requer token)",
                "criar": "POST /receitas (requer token)"
            }
        }
    }))
}

/// GET /receitas - Search recipes by ingredients
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    debug!("Search request: {:?}", params);

    let raw = params.ingredientes.as_deref().unwrap_or_default().trim();
    if raw.is_empty() {
        return Err(Error::Validation(
            "Parâmetro \"ingredientes\" obrigatório".to_string(),
        ));
    }

    let ingredientes = validation::parse_ingredient_list(raw);
    if ingredientes.is_empty() {
        return Err(Error::Validation("Nenhum ingrediente válido".to_string()));
    }

    let page = state.page(params.pagina.as_deref());

    let results = state.matcher.search(&state.pool, &ingredientes).await;
    let total = results.len();
    let receitas = page.slice(results);

    Ok(Json(SearchResponse {
        sucesso: true,
        ingredientes,
        pagina: page.page,
        total,
        mostrando: receitas.len(),
        tem_mais: page.has_more(total),
        receitas,
    }))
}

/// Load a recipe together with its ingredients and steps
async fn load_recipe_detail(state: &AppState, recipe_id: i64) -> Result<RecipeDetail> {
    let recipe = db::recipes::get_recipe(&state.pool, recipe_id).await?;
    let ingredientes = db::recipes::get_recipe_ingredients(&state.pool, recipe_id).await?;
    let modo_preparo = db::recipes::get_recipe_steps(&state.pool, recipe_id).await?;

    Ok(RecipeDetail {
        recipe,
        ingredientes,
        modo_preparo,
    })
}

/// GET /receitas/:id - Get recipe details
pub async fn get_recipe(
    State(state): State<AppState>,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<RecipeDetailResponse>> {
    let id = numeric_id(id)?;
    debug!("Get recipe request: {}", id);

    let receita = load_recipe_detail(&state, id).await?;

    Ok(Json(RecipeDetailResponse {
        sucesso: true,
        mensagem: None,
        receita,
    }))
}

/// GET /receitas/surpresa - Random recipe
pub async fn surprise_recipe(State(state): State<AppState>) -> Result<Json<RecipeDetailResponse>> {
    if db::recipes::count_all_recipes(&state.pool).await? == 0 {
        return Err(Error::NotFound("Nenhuma receita disponível".to_string()));
    }

    let picked = db::recipes::random_recipe(&state.pool)
        .await?
        .ok_or_else(|| Error::Internal("Random recipe query returned no row".to_string()))?;

    let receita = load_recipe_detail(&state, picked.id).await?;

    Ok(Json(RecipeDetailResponse {
        sucesso: true,
        mensagem: Some("Receita surpresa! 🎉".to_string()),
        receita,
    }))
}

/// POST /receitas/:id/favoritar - Toggle a favorite
pub async fn toggle_favorite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    recipe_id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<FavoriteToggleResponse>> {
    let recipe_id = numeric_id(recipe_id)?;
    if !db::recipes::recipe_exists(&state.pool, recipe_id).await? {
        return Err(Error::NotFound("Receita não encontrada".to_string()));
    }

    let favoritado = db::favorites::toggle_favorite(&state.pool, user_id, recipe_id).await?;
    debug!(
        "User {} {} recipe {}",
        user_id,
        if favoritado { "favorited" } else { "unfavorited" },
        recipe_id
    );

    let mensagem = if favoritado {
        "Receita adicionada aos favoritos"
    } else {
        "Receita removida dos favoritos"
    };

    Ok(Json(FavoriteToggleResponse {
        sucesso: true,
        mensagem: mensagem.to_string(),
        favoritado,
    }))
}

/// GET /receitas/favoritos - List the caller's favorites
pub async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<FavoritesResponse>> {
    let page = state.page(params.pagina.as_deref());

    let total = db::favorites::count_favorites(&state.pool, user_id).await?;
    let favorites =
        db::favorites::list_favorites(&state.pool, user_id, page.limit_i64(), page.offset_i64())
            .await?;

    Ok(Json(PagedResponse::new(page, total, favorites)))
}

/// GET /receitas/minhas - List the caller's submissions
pub async fn list_my_recipes(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<PageParams>,
) -> Result<Json<UserRecipesResponse>> {
    let page = state.page(params.pagina.as_deref());

    let total = db::user_recipes::count_user_recipes(&state.pool, user_id).await?;
    let recipes = db::user_recipes::list_user_recipes(
        &state.pool,
        user_id,
        page.limit_i64(),
        page.offset_i64(),
    )
    .await?;

    Ok(Json(PagedResponse::new(page, total, recipes)))
}

/// GET /receitas/minhas/:id - One of the caller's submissions
pub async fn get_my_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    id: std::result::Result<Path<i64>, PathRejection>,
) -> Result<Json<UserRecipeResponse>> {
    let id = numeric_id(id)?;
    let recipe = db::user_recipes::get_user_recipe(&state.pool, user_id, id).await?;

    Ok(Json(UserRecipeResponse {
        sucesso: true,
        receita: UserRecipeDetail {
            id: recipe.id,
            titulo: recipe.titulo,
            descricao: recipe.descricao,
            tempo_preparo: recipe.tempo_preparo,
            ingredientes: validation::split_lines(&recipe.ingredientes),
            modo_preparo: validation::split_lines(&recipe.modo_preparo),
            imagem: recipe.imagem,
            data_criacao: recipe.data_criacao,
        },
    }))
}

/// POST /receitas - Submit a recipe
pub async fn create_recipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    body: Option<Json<NewRecipeRequest>>,
) -> Result<(StatusCode, Json<RecipeCreatedResponse>)> {
    let Json(request) =
        body.ok_or_else(|| Error::Validation("Dados não fornecidos".to_string()))?;

    let titulo = request.titulo.trim().to_string();
    let ingredientes = validation::clean_lines(&request.ingredientes);
    let modo_preparo = validation::clean_lines(&request.modo_preparo);
    validation::validate_new_recipe(&titulo, &ingredientes, &modo_preparo)?;

    let receita_id = db::user_recipes::create_user_recipe(
        &state.pool,
        &NewUserRecipe {
            user_id,
            titulo,
            descricao: request.descricao.trim().to_string(),
            tempo_preparo: request.tempo_preparo.trim().to_string(),
            ingredientes,
            modo_preparo,
            imagem: request.imagem.trim().to_string(),
        },
    )
    .await?;

    info!("User {} submitted recipe {}", user_id, receita_id);

    Ok((
        StatusCode::CREATED,
        Json(RecipeCreatedResponse {
            sucesso: true,
            mensagem: "Receita criada com sucesso".to_string(),
            receita_id,
        }),
    ))
}

/// Fallback for unknown routes
pub async fn not_found() -> Error {
    route_not_found()
}

/// GET /health - Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}

/// GET /ready - Readiness check endpoint
pub async fn readiness_check(State(state): State<AppState>) -> Result<Json<ReadinessResponse>> {
    let db_healthy = sqlx::query("SELECT 1").fetch_one(&state.pool).await.is_ok();

    Ok(Json(ReadinessResponse {
        ready: db_healthy,
        database: if db_healthy { "ok" } else { "error" }.to_string(),
    }))
}
