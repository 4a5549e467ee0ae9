use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

use crate::{
    api::{handlers::AppState, models::*},
    auth::{password, AuthUser},
    db::{self, models::NewUser},
    utils::validation,
    Error, Result,
};

const BAD_CREDENTIALS: &str = "Email ou senha incorretos";

/// POST /auth/registro - Create an account and return a session token
pub async fn register(
    State(state): State<AppState>,
    body: Option<Json<RegisterRequest>>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let Json(request) =
        body.ok_or_else(|| Error::Validation("Dados não fornecidos".to_string()))?;

    let nome = request.nome.trim().to_string();
    let email = validation::normalize_email(&request.email);
    validation::validate_registration(&nome, &email, &request.senha)?;

    if db::users::get_user_by_email(&state.pool, &email).await?.is_some() {
        return Err(Error::Validation("Email já cadastrado".to_string()));
    }

    let senha_hash = password::hash_password(request.senha, state.settings.auth.bcrypt_cost).await?;

    let user = db::users::create_user(
        &state.pool,
        &NewUser {
            nome,
            email,
            senha_hash,
        },
    )
    .await?;

    let token = state.tokens.issue(user.id)?;
    info!("Registered user {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            sucesso: true,
            mensagem: "Usuário registrado com sucesso".to_string(),
            token,
            usuario: user.into(),
        }),
    ))
}

/// POST /auth/login - Exchange credentials for a session token
pub async fn login(
    State(state): State<AppState>,
    body: Option<Json<LoginRequest>>,
) -> Result<Json<AuthResponse>> {
    let Json(request) =
        body.ok_or_else(|| Error::Validation("Dados não fornecidos".to_string()))?;

    let email = validation::normalize_email(&request.email);
    if email.is_empty() || request.senha.is_empty() {
        return Err(Error::Validation(
            "Email e senha são obrigatórios".to_string(),
        ));
    }

    let user = db::users::get_user_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| Error::Unauthorized(BAD_CREDENTIALS.to_string()))?;

    if !password::verify_password(request.senha, user.senha_hash.clone()).await? {
        return Err(Error::Unauthorized(BAD_CREDENTIALS.to_string()));
    }

    let token = state.tokens.issue(user.id)?;

    Ok(Json(AuthResponse {
        sucesso: true,
        mensagem: "Login realizado com sucesso".to_string(),
        token,
        usuario: user.into(),
    }))
}

/// GET /auth/perfil - Profile of the authenticated user
pub async fn profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileResponse>> {
    let user = db::users::get_user(&state.pool, user_id).await?;
    let total_favoritos = db::favorites::count_favorites(&state.pool, user_id).await?;
    let total_receitas = db::user_recipes::count_user_recipes(&state.pool, user_id).await?;

    Ok(Json(ProfileResponse {
        sucesso: true,
        usuario: Profile {
            id: user.id,
            nome: user.nome,
            email: user.email,
            data_criacao: user.data_criacao,
            total_favoritos,
            total_receitas,
        },
    }))
}
