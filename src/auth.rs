use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{HeaderMap, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::{
    config::{AppConfig, Env},
    models::{User, verified_by_default},
    session::{AuthCheck, AuthCheckError},
};

/// Name of the cookie the storefront backend sets on login.
pub const TOKEN_COOKIE: &str = "token";

/// Claims
///
/// Payload of the session JWT issued by the storefront backend. Carries the two facts
/// navigation needs so no profile lookup is required per request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the user id.
    pub sub: String,
    pub is_admin: bool,
    /// Tokens minted before verification existed omit the flag.
    #[serde(default = "verified_by_default")]
    pub is_verified: bool,
    pub exp: u64,
    pub iat: u64,
}

impl From<Claims> for User {
    fn from(claims: Claims) -> Self {
        User {
            id: claims.sub,
            is_admin: claims.is_admin,
            is_verified: claims.is_verified,
        }
    }
}

/// issue_token
///
/// Signs an HS256 session token for `user`, valid for `ttl_secs` seconds.
pub fn issue_token(
    user: &User,
    secret: &str,
    ttl_secs: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = jsonwebtoken::get_current_timestamp();
    let claims = Claims {
        sub: user.id.clone(),
        is_admin: user.is_admin,
        is_verified: user.is_verified,
        iat: now,
        exp: now + ttl_secs,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// verify_token
///
/// Decodes and validates a session token, expiry included.
pub fn verify_token(token: &str, secret: &str) -> Result<User, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.validate_exp = true;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims.into())
}

/// CurrentUser Extractor
///
/// Resolves who is making the request, for handlers that evaluate navigation on the
/// caller's behalf. Every HTTP request is an already-checked session, so this never
/// rejects: a missing, malformed or expired token simply yields `CurrentUser(None)`.
///
/// Resolution order:
/// 1. `Authorization: Bearer <token>`, then the `token` cookie.
/// 2. In `Env::Local` only, when no token was sent: `x-user-id` (+ `x-user-role: admin`).
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<User>);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);

        if let Some(token) = bearer_token(&parts.headers).or_else(|| cookie_token(&parts.headers))
        {
            return Ok(match verify_token(token, &config.jwt_secret) {
                Ok(user) => CurrentUser(Some(user)),
                Err(e) => {
                    tracing::debug!(error = %e, "rejected session token; treating as anonymous");
                    CurrentUser(None)
                }
            });
        }

        if config.env == Env::Local {
            if let Some(user) = local_bypass_user(&parts.headers) {
                tracing::debug!(user_id = %user.id, "local header bypass");
                return Ok(CurrentUser(Some(user)));
            }
        }

        Ok(CurrentUser(None))
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn cookie_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value)
}

fn local_bypass_user(headers: &HeaderMap) -> Option<User> {
    let id = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty())?;
    let is_admin = headers
        .get("x-user-role")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|role| role.eq_ignore_ascii_case("admin"));
    Some(User {
        id: id.to_string(),
        is_admin,
        is_verified: true,
    })
}

/// HttpAuthCheck
///
/// The browser-side half of the one-time check: asks the backend's `GET /auth/check`
/// who owns the current session token.
///
/// - `200` with a user body: signed in.
/// - `401` / `403`: nobody signed in.
/// - anything else, transport or decode failure: `AuthCheckError`.
#[derive(Clone)]
pub struct HttpAuthCheck {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpAuthCheck {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Check against the backend named by `AUTH_API_URL`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.auth_api_url.clone())
    }

    /// Sends `token` as a Bearer credential with the check.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

#[async_trait]
impl AuthCheck for HttpAuthCheck {
    async fn check(&self) -> Result<Option<User>, AuthCheckError> {
        let url = format!("{}/auth/check", self.base_url.trim_end_matches('/'));
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::OK => Ok(Some(response.json::<User>().await?)),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            other => Err(AuthCheckError::UnexpectedStatus(other.as_u16())),
        }
    }
}
