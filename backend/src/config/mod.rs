//! Configuration management for the account service
//!
//! This module handles loading and validating configuration from environment variables,
//! with support for different environments (development, staging, production).

use std::env;
use std::time::Duration;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid environment value: {0}")]
    InvalidValue(String),

    #[error("Invalid port number: {0}")]
    InvalidPort(String),
}

/// One year
const MAX_JWT_TTL_MINUTES: i64 = 60 * 24 * 365;

/// Application environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    /// Parse environment from string
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(ConfigError::InvalidValue(format!(
                "Invalid environment: '{}'. Expected: dev, staging, or prod",
                s
            ))),
        }
    }

    /// Check if this is a production environment
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    /// Get the environment name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection URI
    pub mongodb_uri: String,

    /// Database holding the `accounts` collection
    pub mongodb_database: String,

    /// Current environment
    pub environment: Environment,

    /// Server port
    pub port: u16,

    /// Upper bound on every database call
    pub store_timeout: Duration,

    /// Serve Swagger UI and the OpenAPI document
    pub enable_swagger: bool,

    /// CORS allowed origins
    pub cors_allowed_origins: Option<String>,

    /// Log level (RUST_LOG)
    pub log_level: String,

    /// JWT secret for token signing
    pub jwt_secret: String,

    /// Token lifetime in minutes (default: 30)
    pub jwt_ttl_minutes: i64,

    /// bcrypt work factor
    pub bcrypt_cost: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors)
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .map(|s| Environment::parse(&s))
            .unwrap_or(Ok(Environment::Development))?;

        let mongodb_uri = lookup("MONGODB_URI")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("MONGODB_URI".to_string()))?;

        let mongodb_database =
            lookup("MONGODB_DATABASE").unwrap_or_else(|| "accounts".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "8181".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort("PORT must be a valid number".to_string()))?;

        let store_timeout_seconds = lookup("STORE_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "10".to_string())
            .parse::<u64>()
            .ok()
            .filter(|s| *s > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "STORE_TIMEOUT_SECONDS must be a positive integer".to_string(),
                )
            })?;

        let enable_swagger = match lookup("ENABLE_SWAGGER") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                ConfigError::InvalidValue(format!("ENABLE_SWAGGER must be a boolean, got '{}'", raw))
            })?,
            None => false,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS");

        let log_level = lookup("RUST_LOG").unwrap_or_else(|| "info".to_string());

        // The signing secret has no fallback; tokens must never be signed with a default key.
        let jwt_secret = lookup("JWT_SECRET")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;

        let jwt_ttl_minutes = lookup("JWT_TTL_MINUTES")
            .unwrap_or_else(|| "30".to_string())
            .parse::<i64>()
            .ok()
            .filter(|m| (1..=MAX_JWT_TTL_MINUTES).contains(m))
            .ok_or_else(|| {
                ConfigError::InvalidValue(format!(
                    "JWT_TTL_MINUTES must be between 1 and {}",
                    MAX_JWT_TTL_MINUTES
                ))
            })?;

        let bcrypt_cost = lookup("BCRYPT_COST")
            .unwrap_or_else(|| bcrypt::DEFAULT_COST.to_string())
            .parse::<u32>()
            .ok()
            .filter(|c| (4..=31).contains(c))
            .ok_or_else(|| {
                ConfigError::InvalidValue("BCRYPT_COST must be between 4 and 31".to_string())
            })?;

        Ok(Config {
            mongodb_uri,
            mongodb_database,
            environment,
            port,
            store_timeout: Duration::from_secs(store_timeout_seconds),
            enable_swagger,
            cors_allowed_origins,
            log_level,
            jwt_secret,
            jwt_ttl_minutes,
            bcrypt_cost,
        })
    }

    /// Get MongoDB URI with credentials masked (for logging)
    pub fn mongodb_uri_masked(&self) -> String {
        if let Some(at_pos) = self.mongodb_uri.find('@') {
            if let Some(colon_pos) = self.mongodb_uri[..at_pos].rfind(':') {
                let prefix = &self.mongodb_uri[..colon_pos + 1];
                let suffix = &self.mongodb_uri[at_pos..];
                return format!("{}****{}", prefix, suffix);
            }
        }
        self.mongodb_uri.clone()
    }
}

/// Boolean flag parsing with the usual spellings (1/t/true/0/f/false)
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}
