use std::env;
use std::fmt;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

/// Errors raised while assembling configuration at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Token lifetimes are capped at one hundred years
pub const MAX_JWT_EXPIRY_HOURS: u64 = 24 * 365 * 100;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub statement_timeout_ms: u64,
}

#[derive(Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
    /// Allowed CORS origins; `*` allows any origin
    pub cors_origins: Vec<String>,
}

impl Environment {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// `DATABASE_URL` and `JWT_SECRET` are required; everything else falls
    /// back to the defaults of the selected `APP_ENV` profile.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = Environment::from_lookup(&lookup);

        Ok(Self {
            environment,
            server: ServerConfig::from_lookup(&lookup)?,
            database: DatabaseConfig::from_lookup(environment, &lookup)?,
            security: SecurityConfig::from_lookup(environment, &lookup)?,
        })
    }
}

impl ServerConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = parse_or(lookup, "PORT", 5000)?;
        Ok(Self { port })
    }
}

impl DatabaseConfig {
    /// Database settings only, for tools that never issue tokens
    pub fn from_env() -> Result<Self, ConfigError> {
        let lookup = |key: &str| env::var(key).ok();
        let environment = Environment::from_lookup(&lookup);
        Self::from_lookup(environment, &lookup)
    }

    fn from_lookup(
        environment: Environment,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let url = required(lookup, "DATABASE_URL")?;

        let (max_connections, min_connections, acquire_timeout_secs) = match environment {
            Environment::Development => (10, 1, 30),
            Environment::Staging => (20, 2, 20),
            Environment::Production => (20, 2, 20),
        };

        Ok(Self {
            url,
            max_connections: parse_or(lookup, "DATABASE_MAX_CONNECTIONS", max_connections)?,
            min_connections: parse_or(lookup, "DATABASE_MIN_CONNECTIONS", min_connections)?,
            acquire_timeout_secs: parse_or(lookup, "DATABASE_ACQUIRE_TIMEOUT_SECS", acquire_timeout_secs)?,
            idle_timeout_secs: parse_or(lookup, "DATABASE_IDLE_TIMEOUT_SECS", 30)?,
            statement_timeout_ms: parse_or(lookup, "DATABASE_STATEMENT_TIMEOUT_MS", 60_000)?,
        })
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

impl SecurityConfig {
    fn from_lookup(
        environment: Environment,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let jwt_secret = required(lookup, "JWT_SECRET")?;

        let cors_origins = match lookup("SECURITY_CORS_ORIGINS") {
            Some(v) => v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => match environment {
                Environment::Development => vec!["*".to_string()],
                Environment::Staging | Environment::Production => Vec::new(),
            },
        };

        let jwt_expiry_hours = parse_or(lookup, "SECURITY_JWT_EXPIRY_HOURS", 24 * 7)?;
        if jwt_expiry_hours == 0 || jwt_expiry_hours > MAX_JWT_EXPIRY_HOURS {
            return Err(ConfigError::Invalid {
                name: "SECURITY_JWT_EXPIRY_HOURS",
                value: jwt_expiry_hours.to_string(),
            });
        }

        Ok(Self {
            jwt_secret,
            jwt_expiry_hours,
            cors_origins,
        })
    }

    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

// Connection strings and signing secrets never reach the logs
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"<redacted>")
            .field("max_connections", &self.max_connections)
            .field("min_connections", &self.min_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .field("idle_timeout_secs", &self.idle_timeout_secs)
            .field("statement_timeout_ms", &self.statement_timeout_ms)
            .finish()
    }
}

impl fmt::Debug for SecurityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityConfig")
            .field("jwt_secret", &"<redacted>")
            .field("jwt_expiry_hours", &self.jwt_expiry_hours)
            .field("cors_origins", &self.cors_origins)
            .finish()
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<String, ConfigError> {
    match lookup(name) {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::Missing(name)),
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: v }),
        None => Ok(default),
    }
}
