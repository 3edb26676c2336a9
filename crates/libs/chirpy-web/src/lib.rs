//! Web layer utilities and middleware for Chirpy.
//!
//! Request context resolution from session tokens, the authentication guard,
//! the user/chirp operations behind each endpoint and the mapping of every
//! failure onto an HTTP response.

pub mod auth;
pub mod chirp;
pub mod ctx;
pub mod error;
pub mod mw_auth;
pub mod prelude;
pub mod user;
