//! Shared application state handed to every handler.

use chirpy_auth::signing_secret::SigningSecret;
use chirpy_models::db::connection::DbConnection;

use crate::config::Platform;
use crate::metrics::Metrics;

#[derive(Debug, Clone)]
pub struct AppState {
    pub connection: DbConnection,
    pub secret: SigningSecret,
    pub metrics: Metrics,
    pub platform: Platform,
}

impl AppState {
    pub fn new(connection: DbConnection, secret: SigningSecret, platform: Platform) -> Self {
        Self {
            connection,
            secret,
            metrics: Metrics::default(),
            platform,
        }
    }
}
