#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use recipe_finder::{
    api::{handlers::AppState, routes::create_router},
    config::{AuthConfig, DatabaseConfig, SearchConfig, ServerConfig, Settings},
    db::{self, DbPool},
};
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

pub fn test_settings(page_size: usize) -> Settings {
    Settings {
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connection_timeout_seconds: 30,
            idle_timeout_seconds: 600,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 5000,
            external_url: None,
            api_rate_limit: 100,
            cors_origin: "*".to_string(),
            max_request_body_size: 1024 * 1024,
        },
        auth: AuthConfig {
            jwt_secret: "integration-secret".to_string(),
            token_expiration_days: 30,
            bcrypt_cost: 4,
        },
        search: SearchConfig {
            normalizer_cache_size: 128,
            page_size,
        },
    }
}

/// In-memory database with migrations applied. A single connection keeps
/// every query on the same database.
pub async fn memory_pool() -> DbPool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create in-memory database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

pub async fn seed_recipe(
    pool: &DbPool,
    titulo: &str,
    nota: Option<&str>,
    avaliacoes: Option<&str>,
    ingredients: &[&str],
    steps: &[&str],
) -> i64 {
    let (id,): (i64,) = sqlx::query_as(
        "INSERT INTO recipes (titulo, nota, avaliacoes, autor, tempo_preparo, link, imagem, descricao, informacoes_adicionais)
         VALUES (?, ?, ?, 'Ana', '40 min', 'https://example.com/receita', 'foto.jpg', 'Uma receita', 'Serve 4')
         RETURNING id",
    )
    .bind(titulo)
    .bind(nota)
    .bind(avaliacoes)
    .fetch_one(pool)
    .await
    .expect("Failed to insert recipe");

    for item in ingredients {
        sqlx::query("INSERT INTO ingredients (recipe_id, item) VALUES (?, ?)")
            .bind(id)
            .bind(item)
            .execute(pool)
            .await
            .expect("Failed to insert ingredient");
    }

    for (position, text) in steps.iter().enumerate() {
        sqlx::query("INSERT INTO recipe_steps (recipe_id, position, text) VALUES (?, ?, ?)")
            .bind(id)
            .bind(position as i64 + 1)
            .bind(text)
            .execute(pool)
            .await
            .expect("Failed to insert step");
    }

    id
}

/// Seeded recipe ids, in insertion order
pub struct Corpus {
    pub bolo: i64,
    pub omelete: i64,
    pub feijoada: i64,
    pub pao: i64,
}

pub async fn seed_corpus(pool: &DbPool) -> Corpus {
    let bolo = seed_recipe(
        pool,
        "Bolo de Chocolate",
        Some("4.8"),
        Some("120 votos"),
        &["2 xícaras de farinha de trigo", "3 ovos", "chocolate em pó"],
        &["Misture tudo", "Asse por 40 minutos"],
    )
    .await;
    let omelete = seed_recipe(
        pool,
        "Omelete",
        Some("4.5"),
        Some("300 votos"),
        &["3 ovos", "sal", "Queijo"],
        &["Bata os ovos"],
    )
    .await;
    let feijoada = seed_recipe(
        pool,
        "Feijoada",
        Some("N/A"),
        None,
        &["Feijão preto", "linguiça"],
        &[],
    )
    .await;
    let pao = seed_recipe(
        pool,
        "Pão Caseiro",
        Some("4.8"),
        Some("500 votos"),
        &["farinha", "fermento", "1 ovo"],
        &["Sove a massa"],
    )
    .await;

    Corpus {
        bolo,
        omelete,
        feijoada,
        pao,
    }
}

pub struct TestApp {
    pub router: Router,
    pub pool: DbPool,
}

impl TestApp {
    pub async fn new(page_size: usize) -> Self {
        let pool = memory_pool().await;
        let settings = test_settings(page_size);
        let state = AppState::new(pool.clone(), settings.clone());
        let router = create_router(state, &settings);
        Self { router, pool }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn get_auth(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// Register an account and return its token
    pub async fn register(&self, nome: &str, email: &str) -> String {
        let (status, body) = self
            .post(
                "/auth/registro",
                None,
                serde_json::json!({"nome": nome, "email": email, "senha": "segredo123"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["token"].as_str().unwrap().to_string()
    }
}

pub fn titles(body: &Value) -> Vec<String> {
    body["receitas"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["titulo"].as_str().unwrap().to_string())
        .collect()
}
