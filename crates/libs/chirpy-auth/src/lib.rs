//! Authentication core for Chirpy.
//!
//! Two stateless services live here:
//!
//! - [`secret_hash`]: salted one-way password hashing and verification (Argon2).
//! - [`jwt`]: issuance and validation of signed, time-bounded session tokens.
//!
//! Both are pure functions of their inputs. The token signing key is carried
//! by [`signing_secret::SigningSecret`] and handed to every call explicitly.

pub mod auth_body;
pub mod error;
pub mod jwt;
pub mod prelude;
pub mod secret_hash;
pub mod signing_secret;

pub use error::Error;

/// Token type advertised alongside every issued token.
pub const CONNECTION_TOKEN_TYPE: &str = "Bearer";

/// Issuer label embedded in, and required from, every session token.
pub const ISS: &str = "chirpy";

/// Header carrying the bearer token.
pub const AUTH_HEADER: &str = "Authorization";

/// Prefix of the [`AUTH_HEADER`] value preceding the token.
pub const AUTH_HEADER_PREFIX: &str = "Bearer ";
