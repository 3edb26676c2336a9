//! Database configuration management.

use std::fmt::Display;

use crate::prelude::*;

/// Environment variable holding the PostgreSQL connection string.
pub const DATABASE_URL_ENV: &str = "DATABASE_URL";

/// Database connection configuration.
#[derive(Clone)]
pub struct DbConfig {
    /// PostgreSQL database URL.
    pub database_url: String,
}

impl DbConfig {
    /// Wraps an explicit database URL.
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Create database configuration from environment variables.
    ///
    /// Reads the `DATABASE_URL` environment variable.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use chirpy_models::db::config::DbConfig;
    ///
    /// let config = DbConfig::from_env().unwrap();
    /// ```
    pub fn from_env() -> Result<Self> {
        let database_url =
            std::env::var(DATABASE_URL_ENV).map_err(|_| Error::MissingEnv(DATABASE_URL_ENV))?;
        Ok(Self { database_url })
    }
}

impl Display for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "REDACTED")
    }
}
