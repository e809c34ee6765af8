//! Database configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `DB_NAME` - Database name
//! - `DB_USER` - Role to connect as
//! - `DB_PASSWORD` - Role password
//! - `DB_HOST` - Server host name or address
//! - `DB_PORT` - Server port
//!
//! All five are read once at startup. A missing or malformed value is not an
//! error at load time; it surfaces as a connection failure the first time the
//! gateway acquires a connection.

use std::collections::HashMap;

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

pub const DB_NAME: &str = "DB_NAME";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";

/// Configuration errors found when building connection options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Connection settings for the ordering database.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone, Default)]
pub struct DatabaseConfig {
    pub name: Option<String>,
    pub user: Option<String>,
    pub password: Option<SecretString>,
    pub host: Option<String>,
    pub port: Option<String>,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl DatabaseConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    #[must_use]
    pub fn from_env() -> Self {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        Self {
            name: get(DB_NAME),
            user: get(DB_USER),
            password: get(DB_PASSWORD).map(SecretString::from),
            host: get(DB_HOST),
            port: get(DB_PORT),
        }
    }

    /// Build configuration from a map of variables, mainly for tests.
    #[must_use]
    pub fn from_map(vars: &HashMap<String, String>) -> Self {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Turn the settings into driver connection options.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` for the first unset variable, or
    /// `ConfigError::InvalidEnvVar` if `DB_PORT` is not a valid port number.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        let name = required(self.name.as_deref(), DB_NAME)?;
        let user = required(self.user.as_deref(), DB_USER)?;
        let password = required(
            self.password.as_ref().map(|password| password.expose_secret()),
            DB_PASSWORD,
        )?;
        let host = required(self.host.as_deref(), DB_HOST)?;
        let port = required(self.port.as_deref(), DB_PORT)?
            .trim()
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar(DB_PORT.to_string(), e.to_string()))?;

        Ok(PgConnectOptions::new()
            .host(host)
            .port(port)
            .database(name)
            .username(user)
            .password(password))
    }
}

fn required<'a>(value: Option<&'a str>, key: &str) -> Result<&'a str, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}
