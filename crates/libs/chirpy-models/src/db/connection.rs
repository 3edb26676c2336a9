//! Database connection management and migrations.

use diesel::PgConnection;
use diesel::r2d2::ConnectionManager;
use diesel::r2d2::Pool;
use diesel_migrations::embed_migrations;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness};
use tracing::info;

use super::config::DbConfig;
use crate::prelude::*;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Database connection pool wrapper.
#[derive(Debug, Clone)]
pub struct DbConnection {
    /// PostgreSQL connection pool.
    pub pool: Pool<ConnectionManager<PgConnection>>,
}

impl DbConnection {
    /// Create a new database connection pool.
    ///
    /// Fails if no connection to the database can be established.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use chirpy_models::db::{connection::DbConnection, config::DbConfig};
    ///
    /// let config = DbConfig::from_env().unwrap();
    /// let db = DbConnection::new(&config).unwrap();
    /// ```
    pub fn new(config: &DbConfig) -> Result<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
        let pool = Pool::builder().build(manager)?;
        Ok(Self { pool })
    }

    /// Create a pool without connecting.
    ///
    /// Connections are opened on first use; a bad URL only surfaces as an
    /// error from the first query.
    pub fn lazy(config: &DbConfig) -> Self {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);
        let pool = Pool::builder().build_unchecked(manager);
        Self { pool }
    }

    /// Run database migrations and return configured connection.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use chirpy_models::db::{connection::DbConnection, config::DbConfig};
    ///
    /// let config = DbConfig::from_env().unwrap();
    /// let db = DbConnection::new(&config).unwrap().setup().unwrap();
    /// ```
    pub fn setup(self) -> Result<Self> {
        info!("Running Database Migrations");
        let mut conn = self.pool.get()?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(Error::Migration)?
            .len();
        info!("Applied {applied} pending migration(s)");
        Ok(self)
    }
}
