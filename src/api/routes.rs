use axum::http::{header, HeaderValue, Method};
use axum::{
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

#[cfg(not(test))]
use {
    axum::extract::ConnectInfo,
    std::net::IpAddr,
    std::sync::Arc,
    tower_governor::{governor::GovernorConfigBuilder, key_extractor::KeyExtractor, GovernorLayer},
};

use crate::api::auth as auth_handlers;
use crate::api::handlers::{self as api_handlers, AppState};
use crate::config::Settings;

/// Create the router with all endpoints
#[cfg_attr(test, allow(unused_variables))]
pub fn create_router(state: AppState, settings: &Settings) -> Router {
    #[cfg_attr(test, allow(unused_mut))]
    let mut api_routes = Router::new()
        // Recipes
        .route(
            "/receitas",
            get(api_handlers::search_recipes).post(api_handlers::create_recipe),
        )
        .route("/receitas/surpresa", get(api_handlers::surprise_recipe))
        .route("/receitas/favoritos", get(api_handlers::list_favorites))
        .route("/receitas/minhas", get(api_handlers::list_my_recipes))
        .route("/receitas/minhas/:id", get(api_handlers::get_my_recipe))
        .route("/receitas/:id", get(api_handlers::get_recipe))
        .route("/receitas/:id/favoritar", post(api_handlers::toggle_favorite))
        // Accounts
        .route("/auth/registro", post(auth_handlers::register))
        .route("/auth/login", post(auth_handlers::login))
        .route("/auth/perfil", get(auth_handlers::profile))
        .with_state(state.clone());

    // Rate limiting only in non-test builds. Keys on the peer IP when axum
    // provides it and falls back to localhost otherwise; behind a reverse
    // proxy, configure the proxy to forward the client address.
    #[cfg(not(test))]
    {
        #[derive(Clone, Copy, Debug)]
        struct FallbackIpKeyExtractor;

        impl KeyExtractor for FallbackIpKeyExtractor {
            type Key = IpAddr;

            fn extract<B>(
                &self,
                req: &axum::http::Request<B>,
            ) -> Result<Self::Key, tower_governor::GovernorError> {
                if let Some(ConnectInfo(addr)) =
                    req.extensions().get::<ConnectInfo<std::net::SocketAddr>>()
                {
                    return Ok(addr.ip());
                }

                Ok(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)))
            }
        }

        let rate = settings.server.api_rate_limit;
        let burst = u32::try_from(rate.saturating_mul(2)).unwrap_or(u32::MAX);
        match GovernorConfigBuilder::default()
            .key_extractor(FallbackIpKeyExtractor)
            .per_millisecond(replenish_interval_ms(rate))
            .burst_size(burst)
            .finish()
        {
            Some(config) => {
                api_routes = api_routes.layer(GovernorLayer {
                    config: Arc::new(config),
                });
            }
            None => {
                tracing::warn!(
                    "Invalid API_RATE_LIMIT ({}); rate limiting disabled",
                    settings.server.api_rate_limit
                );
            }
        }
    }

    let api_routes = api_routes;

    let health_routes = Router::new()
        .route("/", get(api_handlers::index))
        .route("/health", get(api_handlers::health_check))
        .route("/ready", get(api_handlers::readiness_check))
        .with_state(state);

    Router::new()
        .merge(health_routes)
        .merge(api_routes)
        .fallback(api_handlers::not_found)
        .layer(
            // Request body size limit - prevent memory exhaustion from large payloads
            RequestBodyLimitLayer::new(settings.server.max_request_body_size),
        )
        .layer(cors_layer(&settings.server.cors_origin))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}

/// Milliseconds between quota refills for `rate` requests per second.
///
/// The governor builder counts in periods per token, not tokens per period.
fn replenish_interval_ms(rate: u64) -> u64 {
    1000u64.checked_div(rate).unwrap_or(1000).max(1)
}

/// CORS for browser and app clients; `*` allows any origin
fn cors_layer(origin: &str) -> CorsLayer {
    let allow_origin = if origin.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = origin
            .split(',')
            .filter_map(|o| HeaderValue::from_str(o.trim()).ok())
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allow_origin(allow_origin)
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn create_test_state() -> AppState {
        let pool = crate::db::test_support::memory_pool().await;

        let settings = crate::config::Settings {
            database: crate::config::DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
                min_connections: 1,
                connection_timeout_seconds: 30,
                idle_timeout_seconds: 600,
            },
            server: crate::config::ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
                external_url: None,
                api_rate_limit: 100,
                cors_origin: "*".to_string(),
                max_request_body_size: 1024 * 1024,
            },
            auth: crate::config::AuthConfig {
                jwt_secret: "test-secret".to_string(),
                token_expiration_days: 30,
                bcrypt_cost: 4,
            },
            search: crate::config::SearchConfig {
                normalizer_cache_size: 64,
                page_size: 10,
            },
        };

        AppState::new(pool, settings)
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_replenish_interval_matches_requests_per_second() {
        assert_eq!(replenish_interval_ms(100), 10);
        assert_eq!(replenish_interval_ms(1), 1000);
        assert_eq!(replenish_interval_ms(3), 333);
        // Above 1000 req/s the interval bottoms out at one millisecond
        assert_eq!(replenish_interval_ms(5000), 1);
        assert_eq!(replenish_interval_ms(0), 1000);
    }

    #[tokio::test]
    async fn test_index_and_health_routes_exist() {
        let state = create_test_state().await;
        let app = create_router(state.clone(), &state.settings);

        let (status, body) = get(app.clone(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "online");

        let (status, body) = get(app, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ready"], true);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let state = create_test_state().await;
        let app = create_router(state.clone(), &state.settings);

        let (status, body) = get(app, "/nao-existe").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["erro"], "Rota não encontrada");
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let state = create_test_state().await;
        let app = create_router(state.clone(), &state.settings);

        let (status, body) = get(app, "/receitas/favoritos").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["erro"], "Token não fornecido");
    }

    #[tokio::test]
    async fn test_static_route_wins_over_id() {
        let state = create_test_state().await;
        let app = create_router(state.clone(), &state.settings);

        // Empty corpus: the surprise route answers, not the :id route
        let (status, body) = get(app, "/receitas/surpresa").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["erro"], "Nenhuma receita disponível");
    }
}
