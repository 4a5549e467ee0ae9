use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A scraped recipe as stored in `recipes`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub titulo: String,
    pub nota: Option<String>,
    pub avaliacoes: Option<String>,
    pub autor: Option<String>,
    pub tempo_preparo: Option<String>,
    pub link: Option<String>,
    pub imagem: Option<String>,
    pub descricao: Option<String>,
    pub informacoes_adicionais: Option<String>,
}

/// Recipe summary row with its ingredient items joined by `|||`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecipeRow {
    pub id: i64,
    pub titulo: String,
    pub nota: Option<String>,
    pub avaliacoes: Option<String>,
    pub autor: Option<String>,
    pub tempo_preparo: Option<String>,
    pub link: Option<String>,
    pub imagem: Option<String>,
    pub ings: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub nome: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub senha_hash: String,
    pub data_criacao: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub nome: String,
    pub email: String,
    pub senha_hash: String,
}

/// Favorited recipe as listed for its owner
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FavoriteRecipe {
    pub id: i64,
    pub titulo: String,
    pub nota: Option<String>,
    pub avaliacoes: Option<String>,
    pub autor: Option<String>,
    pub tempo_preparo: Option<String>,
    pub link: Option<String>,
    pub imagem: Option<String>,
    pub data_favoritado: Option<NaiveDateTime>,
}

/// User-submitted recipe, list columns still newline-joined
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRecipe {
    pub id: i64,
    pub user_id: i64,
    pub titulo: String,
    pub descricao: Option<String>,
    pub tempo_preparo: Option<String>,
    pub ingredientes: String,
    pub modo_preparo: String,
    pub imagem: Option<String>,
    pub data_criacao: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserRecipeSummary {
    pub id: i64,
    pub titulo: String,
    pub descricao: Option<String>,
    pub tempo_preparo: Option<String>,
    pub imagem: Option<String>,
    pub data_criacao: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUserRecipe {
    pub user_id: i64,
    pub titulo: String,
    pub descricao: String,
    pub tempo_preparo: String,
    pub ingredientes: Vec<String>,
    pub modo_preparo: Vec<String>,
    pub imagem: String,
}
