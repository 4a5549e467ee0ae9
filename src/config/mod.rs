use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connection_timeout_seconds: u64,
    pub idle_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub external_url: Option<String>,
    pub api_rate_limit: u64,
    pub cors_origin: String,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub token_expiration_days: i64,
    pub bcrypt_cost: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub normalizer_cache_size: usize,
    pub page_size: usize,
}

const DEV_SECRET: &str = "dev-secret-key-change-in-production";

/// Read an environment variable, falling back to `default`, and parse it
fn env_parse<T: FromStr>(key: &str, default: &str) -> Result<T> {
    std::env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {key} value")))
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/receitas.db?mode=rwc".to_string());

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env_parse("PORT", "5000")?;
        let external_url = std::env::var("EXTERNAL_URL").ok();
        let api_rate_limit = env_parse("API_RATE_LIMIT", "100")?;
        let cors_origin = std::env::var("CORS_ORIGIN").unwrap_or_else(|_| "*".to_string());
        let max_request_body_size = env_parse("MAX_REQUEST_BODY_SIZE", "52428800")?;

        let max_connections = env_parse("DATABASE_MAX_CONNECTIONS", "25")?;
        let min_connections = env_parse("DATABASE_MIN_CONNECTIONS", "5")?;
        let connection_timeout_seconds = env_parse("DATABASE_CONNECTION_TIMEOUT", "30")?;
        let idle_timeout_seconds = env_parse("DATABASE_IDLE_TIMEOUT", "600")?;

        let jwt_secret = std::env::var("JWT_SECRET_KEY")
            .or_else(|_| std::env::var("SECRET_KEY"))
            .unwrap_or_else(|_| DEV_SECRET.to_string());
        let token_expiration_days = env_parse("TOKEN_EXPIRATION_DAYS", "30")?;
        let bcrypt_cost = env_parse("BCRYPT_COST", &bcrypt::DEFAULT_COST.to_string())?;

        let normalizer_cache_size = env_parse("NORMALIZER_CACHE_SIZE", "1024")?;
        let page_size = env_parse("PAGE_SIZE", "10")?;

        Ok(Settings {
            database: DatabaseConfig {
                url: database_url,
                max_connections,
                min_connections,
                connection_timeout_seconds,
                idle_timeout_seconds,
            },
            server: ServerConfig {
                host,
                port,
                external_url,
                api_rate_limit,
                cors_origin,
                max_request_body_size,
            },
            auth: AuthConfig {
                jwt_secret,
                token_expiration_days,
                bcrypt_cost,
            },
            search: SearchConfig {
                normalizer_cache_size,
                page_size,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.search.normalizer_cache_size == 0 {
            return Err(Error::Config(
                "Normalizer cache size must be non-zero".to_string(),
            ));
        }

        if self.search.page_size == 0 {
            return Err(Error::Config("Page size must be non-zero".to_string()));
        }

        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(Error::Config(
                "BCRYPT_COST must be between 4 and 31".to_string(),
            ));
        }

        if self.auth.token_expiration_days <= 0 {
            return Err(Error::Config(
                "Token expiration must be at least one day".to_string(),
            ));
        }

        if self.auth.jwt_secret == DEV_SECRET {
            tracing::warn!("JWT_SECRET_KEY is not set; using the development secret");
        }

        Ok(())
    }

    /// Base URL clients should use to reach this server
    pub fn server_url(&self) -> String {
        self.server
            .external_url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.server.host, self.server.port))
    }
}
