#![allow(dead_code)]

use chirpy_models::db::{config::DbConfig, connection::DbConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

pub fn from_env(var: &str) -> String {
    std::env::var(var).expect(&format!("Env Variable '{}' missing", var))
}

/// Migrated database that is wiped again when dropped.
pub struct DbTestContext {
    pub db: DbConnection,
}

impl DbTestContext {
    pub fn new(url: &str) -> Self {
        let db = DbConnection::new(&DbConfig::new(url))
            .expect("Cannot connect to database")
            .setup()
            .expect("Failed to run database migrations");
        Self { db }
    }

    pub fn from_env() -> Self {
        Self::new(&from_env("TEST_DATABASE_URL"))
    }
}

impl Drop for DbTestContext {
    fn drop(&mut self) {
        self.db
            .pool
            .get()
            .expect("Couldn't get a connection from the pool")
            .revert_all_migrations(MIGRATIONS)
            .expect("Failed to revert changes to db");
    }
}
