//! Error types for the Chirpy server.
//!
//! Everything here is fatal at startup: bad configuration, an unreachable
//! database, or a listener that can't bind.

/// Errors that can occur while starting or running the server.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    IO(#[from] std::io::Error),

    #[error(transparent)]
    Model(#[from] chirpy_models::error::Error),

    #[error(transparent)]
    Auth(#[from] chirpy_auth::Error),

    #[error("Invalid listen address '{0}': {1}")]
    InvalidAddress(String, std::net::AddrParseError),
}
