use std::{env, time::Duration};

/// AppConfig
///
/// Holds the navigator's configuration. Loaded once at startup and immutable afterwards;
/// handlers pull it out of `AppState` via `FromRef`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and the local header bypass.
    pub env: Env,
    // Address the navigation service listens on.
    pub bind_addr: String,
    // Secret used to validate session JWTs (HS256).
    pub jwt_secret: String,
    // Base URL of the backend exposing `GET /auth/check`.
    pub auth_api_url: String,
    // Upper bound on the one-time auth check before it is treated as failed.
    pub auth_check_timeout: Duration,
}

/// Env
///
/// Runtime context: local development (pretty logs, header bypass) or production
/// (JSON logs, token-only identity).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Env {
    Local,
    Production,
}

const LOCAL_JWT_SECRET: &str = "super-secure-test-secret-value-local";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_AUTH_API_URL: &str = "http://localhost:8000";
const DEFAULT_AUTH_CHECK_TIMEOUT_MS: u64 = 10_000;

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking configuration for tests; never reads the environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:0".to_string(),
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            auth_api_url: DEFAULT_AUTH_API_URL.to_string(),
            auth_check_timeout: Duration::from_millis(DEFAULT_AUTH_CHECK_TIMEOUT_MS),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables.
    ///
    /// # Panics
    /// Panics in production when `JWT_SECRET` is missing, and in any environment when
    /// `AUTH_CHECK_TIMEOUT_MS` is set but not a number.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").unwrap_or_else(|_| "local".to_string()).as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let jwt_secret = match env {
            Env::Production => {
                env::var("JWT_SECRET").expect("FATAL: JWT_SECRET must be set in production.")
            }
            Env::Local => env::var("JWT_SECRET").unwrap_or_else(|_| LOCAL_JWT_SECRET.to_string()),
        };

        let auth_check_timeout = env::var("AUTH_CHECK_TIMEOUT_MS")
            .map(|raw| {
                raw.parse::<u64>()
                    .expect("FATAL: AUTH_CHECK_TIMEOUT_MS must be a whole number of milliseconds.")
            })
            .unwrap_or(DEFAULT_AUTH_CHECK_TIMEOUT_MS);

        Self {
            env,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
            jwt_secret,
            auth_api_url: env::var("AUTH_API_URL")
                .unwrap_or_else(|_| DEFAULT_AUTH_API_URL.to_string()),
            auth_check_timeout: Duration::from_millis(auth_check_timeout),
        }
    }
}
