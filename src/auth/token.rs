use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::AuthConfig;
use crate::error::{Error, Result};

/// JWT payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 session tokens
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    lifetime: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            lifetime: Duration::days(config.token_expiration_days),
        }
    }

    pub fn issue(&self, user_id: i64) -> Result<String> {
        let claims = Claims {
            user_id,
            exp: (Utc::now() + self.lifetime).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Verify a token and return its user ID.
    ///
    /// Failures map to the 401 messages clients display.
    pub fn verify(&self, token: &str) -> Result<i64> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims.user_id)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => Error::Unauthorized("Token expirado".to_string()),
                _ => Error::Unauthorized("Token inválido".to_string()),
            })
    }
}

/// Authenticated caller, extracted from the `Authorization` header.
///
/// Accepts the raw token or `Bearer <token>`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    Arc<TokenIssuer>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::Unauthorized("Token não fornecido".to_string()))?;

        let token = header.strip_prefix("Bearer ").unwrap_or(header);

        let issuer = Arc::<TokenIssuer>::from_ref(state);
        issuer.verify(token).map(AuthUser)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(days: i64) -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_expiration_days: days,
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn test_issue_and_verify() {
        let issuer = TokenIssuer::new(&config(30));
        let token = issuer.issue(42).unwrap();
        assert_eq!(issuer.verify(&token).unwrap(), 42);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = TokenIssuer::new(&config(30)).issue(1).unwrap();

        let mut other = config(30);
        other.jwt_secret = "another-secret".to_string();
        let err = TokenIssuer::new(&other).verify(&token).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Token inválido");
    }

    #[test]
    fn test_expired_token() {
        let secret = "test-secret";
        let claims = Claims {
            user_id: 1,
            exp: (Utc::now() - Duration::days(2)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let err = TokenIssuer::new(&config(30)).verify(&token).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Token expirado");
    }

    #[test]
    fn test_garbage_token() {
        let err = TokenIssuer::new(&config(30)).verify("abc.def").unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }
}
