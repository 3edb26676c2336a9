//! Database models and ORM layer for Chirpy.
//!
//! Provides Diesel-based models, queries, connection pooling and embedded
//! migrations for users and their chirps.
//!
//! # Usage
//!
//! ```rust,no_run
//! use chirpy_models::chirp::{Chirp, SortOrder};
//! use chirpy_models::db::{config::DbConfig, connection::DbConnection};
//!
//! let config = DbConfig::from_env().unwrap();
//! let conn = DbConnection::new(&config).unwrap().setup().unwrap();
//!
//! let chirps = Chirp::fetch_all(SortOrder::Asc, &conn).unwrap();
//! println!("Found {} chirps", chirps.len());
//! ```

pub mod chirp;
pub mod db;
pub mod error;
pub mod prelude;
mod schema;
pub mod user;
