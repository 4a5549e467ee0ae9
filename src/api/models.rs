use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::db::models::{FavoriteRecipe, Recipe, User, UserRecipeSummary};
use crate::search::MatchResult;

/// 1-indexed page of a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    /// Parse a `pagina` parameter; missing or unparsable values mean page 1,
    /// and anything below 1 is raised to 1
    pub fn from_param(raw: Option<&str>, size: usize) -> Self {
        let page = raw
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1)
            .max(1);

        Self {
            page: usize::try_from(page).unwrap_or(usize::MAX),
            size,
        }
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.size)
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.offset().saturating_add(self.size) < total
    }

    /// Take this page out of an already-ordered list
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        items.into_iter().skip(self.offset()).take(self.size).collect()
    }

    pub fn limit_i64(&self) -> i64 {
        i64::try_from(self.size).unwrap_or(i64::MAX)
    }

    pub fn offset_i64(&self) -> i64 {
        i64::try_from(self.offset()).unwrap_or(i64::MAX)
    }
}

/// `GET /receitas` parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub ingredientes: Option<String>,
    #[serde(default)]
    pub pagina: Option<String>,
}

/// Parameters of the paged, authenticated listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub pagina: Option<String>,
}

/// Ingredient search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub sucesso: bool,
    pub ingredientes: Vec<String>,
    pub pagina: usize,
    pub total: usize,
    pub mostrando: usize,
    pub tem_mais: bool,
    pub receitas: Vec<MatchResult>,
}

/// Envelope shared by the favorites and submissions listings
#[derive(Debug, Clone, Serialize)]
pub struct PagedResponse<T> {
    pub sucesso: bool,
    pub pagina: usize,
    pub total: i64,
    pub mostrando: usize,
    pub tem_mais: bool,
    pub receitas: Vec<T>,
}

impl<T> PagedResponse<T> {
    pub fn new(page: PageRequest, total: i64, receitas: Vec<T>) -> Self {
        Self {
            sucesso: true,
            pagina: page.page,
            total,
            mostrando: receitas.len(),
            tem_mais: page.has_more(usize::try_from(total).unwrap_or(0)),
            receitas,
        }
    }
}

pub type FavoritesResponse = PagedResponse<FavoriteRecipe>;
pub type UserRecipesResponse = PagedResponse<UserRecipeSummary>;

/// Full recipe with ingredients and preparation steps
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredientes: Vec<String>,
    pub modo_preparo: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetailResponse {
    pub sucesso: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mensagem: Option<String>,
    pub receita: RecipeDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct FavoriteToggleResponse {
    pub sucesso: bool,
    pub mensagem: String,
    pub favoritado: bool,
}

/// `POST /receitas` body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewRecipeRequest {
    pub titulo: String,
    pub descricao: String,
    pub tempo_preparo: String,
    pub ingredientes: Vec<String>,
    pub modo_preparo: Vec<String>,
    pub imagem: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecipeCreatedResponse {
    pub sucesso: bool,
    pub mensagem: String,
    pub receita_id: i64,
}

/// User submission with its lists split back out
#[derive(Debug, Clone, Serialize)]
pub struct UserRecipeDetail {
    pub id: i64,
    pub titulo: String,
    pub descricao: Option<String>,
    pub tempo_preparo: Option<String>,
    pub ingredientes: Vec<String>,
    pub modo_preparo: Vec<String>,
    pub imagem: Option<String>,
    pub data_criacao: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRecipeResponse {
    pub sucesso: bool,
    pub receita: UserRecipeDetail,
}

/// `POST /auth/registro` body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub nome: String,
    pub email: String,
    pub senha: String,
}

/// `POST /auth/login` body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserInfo {
    pub id: i64,
    pub nome: String,
    pub email: String,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nome: user.nome,
            email: user.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub sucesso: bool,
    pub mensagem: String,
    pub token: String,
    pub usuario: UserInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub id: i64,
    pub nome: String,
    pub email: String,
    pub data_criacao: Option<NaiveDateTime>,
    pub total_favoritos: i64,
    pub total_receitas: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub sucesso: bool,
    pub usuario: Profile,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub database: String,
}
