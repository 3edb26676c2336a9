//! Database error types.

use diesel::result::DatabaseErrorKind;

/// Database operation errors.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A required environment variable is not set.
    #[error("Env Variable '{0}' missing")]
    MissingEnv(&'static str),

    /// Database connection pool error.
    #[error(transparent)]
    R2D2(#[from] diesel::r2d2::PoolError),

    /// Diesel ORM operation error.
    #[error(transparent)]
    Diesel(#[from] diesel::result::Error),

    /// Embedded migrations could not be applied.
    #[error("Failed to run database migrations: {0}")]
    Migration(Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
    /// The query matched no row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Diesel(diesel::result::Error::NotFound))
    }

    /// The write was refused by a `UNIQUE` constraint.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Error::Diesel(diesel::result::Error::DatabaseError(
                DatabaseErrorKind::UniqueViolation,
                _
            ))
        )
    }
}
