//! Common types and utilities.

/// Server error type.
pub use crate::error::Error;

/// Server result type.
pub type Result<T> = core::result::Result<T, Error>;
