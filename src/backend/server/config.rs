/**
 * Server Configuration
 *
 * Settings are read from the environment (after `.env` is loaded by the
 * binary). Every variable has a default except `JWT_SECRET`, which is
 * required outside development.
 *
 * | Variable          | Default              |
 * |-------------------|----------------------|
 * | `DATABASE_URL`    | `sqlite://kanban.db` |
 * | `JWT_SECRET`      | dev fallback only    |
 * | `TOKEN_TTL_HOURS` | 6 (1 to 6)           |
 * | `SERVER_PORT`     | 3000                 |
 * | `STATIC_DIR`      | `public`             |
 * | `APP_ENV`         | `production`         |
 * | `BCRYPT_COST`     | 12                   |
 */

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

const DEV_JWT_SECRET: &str = "kanban-development-secret";

/// Tokens live six hours at most
const MAX_TOKEN_TTL_HOURS: u64 = 6;

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },

    #[error("missing value: {0}")]
    MissingValue(&'static str),
}

/// Deployment environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppEnv {
    Development,
    #[default]
    Production,
}

impl AppEnv {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            _ => Err(ConfigError::Invalid {
                var: "APP_ENV",
                value: value.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub port: u16,
    pub static_dir: PathBuf,
    pub env: AppEnv,
    pub bcrypt_cost: u32,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(env) = lookup("APP_ENV") {
            builder = builder.env(AppEnv::parse(&env)?);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(hours) = lookup("TOKEN_TTL_HOURS") {
            builder = builder.token_ttl_hours(parse_number("TOKEN_TTL_HOURS", &hours)?);
        }
        if let Some(port) = lookup("SERVER_PORT") {
            builder = builder.port(parse_number("SERVER_PORT", &port)?);
        }
        if let Some(dir) = lookup("STATIC_DIR") {
            builder = builder.static_dir(dir);
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_number("BCRYPT_COST", &cost)?);
        }

        builder.build()
    }

    pub fn debug_detail(&self) -> bool {
        self.env == AppEnv::Development
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value: value.to_string(),
    })
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    token_ttl_hours: Option<u64>,
    port: Option<u16>,
    static_dir: Option<PathBuf>,
    env: AppEnv,
    bcrypt_cost: Option<u32>,
}

impl ServerConfigBuilder {
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn token_ttl_hours(mut self, hours: u64) -> Self {
        self.token_ttl_hours = Some(hours);
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn env(mut self, env: AppEnv) -> Self {
        self.env = env;
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let jwt_secret = match (self.jwt_secret, self.env) {
            (Some(secret), _) if !secret.trim().is_empty() => secret,
            (_, AppEnv::Development) => {
                tracing::warn!("JWT_SECRET not set, using the development secret");
                DEV_JWT_SECRET.to_string()
            }
            (_, AppEnv::Production) => return Err(ConfigError::MissingValue("JWT_SECRET")),
        };

        let hours = self.token_ttl_hours.unwrap_or(MAX_TOKEN_TTL_HOURS);
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&hours) {
            return Err(ConfigError::Invalid {
                var: "TOKEN_TTL_HOURS",
                value: hours.to_string(),
            });
        }

        let bcrypt_cost = self.bcrypt_cost.unwrap_or(bcrypt::DEFAULT_COST);
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                var: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
            });
        }

        Ok(ServerConfig {
            database_url: self
                .database_url
                .unwrap_or_else(|| "sqlite://kanban.db".to_string()),
            jwt_secret,
            token_ttl: Duration::from_secs(hours * 60 * 60),
            port: self.port.unwrap_or(3000),
            static_dir: self.static_dir.unwrap_or_else(|| PathBuf::from("public")),
            env: self.env,
            bcrypt_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.database_url, "sqlite://kanban.db");
        assert_eq!(config.token_ttl, Duration::from_secs(6 * 3600));
        assert_eq!(config.port, 3000);
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.env, AppEnv::Production);
        assert_eq!(config.bcrypt_cost, 12);
        assert!(!config.debug_detail());
    }

    #[test]
    fn test_production_requires_secret() {
        let err = ServerConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::MissingValue("JWT_SECRET"));
    }

    #[test]
    fn test_development_falls_back_to_dev_secret() {
        let config = ServerConfig::from_lookup(lookup(&[("APP_ENV", "development")])).unwrap();
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
        assert!(config.debug_detail());
    }

    #[test]
    fn test_unparsable_values_are_rejected() {
        let err = ServerConfig::from_lookup(lookup(&[
            ("JWT_SECRET", "s3cret"),
            ("SERVER_PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "SERVER_PORT", .. }));

        let err = ServerConfig::from_lookup(lookup(&[("JWT_SECRET", "s3cret"), ("APP_ENV", "staging")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "APP_ENV", .. }));
    }

    #[test]
    fn test_token_ttl_bounds() {
        for hours in ["0", "7", "18446744073709551615"] {
            let err = ServerConfig::from_lookup(lookup(&[
                ("JWT_SECRET", "s3cret"),
                ("TOKEN_TTL_HOURS", hours),
            ]))
            .unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { var: "TOKEN_TTL_HOURS", .. }),
                "{} hours accepted",
                hours
            );
        }

        let config = ServerConfig::builder()
            .jwt_secret("s3cret")
            .token_ttl_hours(1)
            .build()
            .unwrap();
        assert_eq!(config.token_ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let err = ServerConfig::builder()
            .jwt_secret("s3cret")
            .bcrypt_cost(2)
            .build()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "BCRYPT_COST", .. }));
    }
}
