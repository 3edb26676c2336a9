//! User management utilities for web handlers.

use std::fmt;

use chirpy_auth::secret_hash::hash_password;
use chirpy_models::{
    db::connection::DbConnection,
    user::{User, UserCreate},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::prelude::*;

/// Public view of a user. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserApi {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
}

/// Sign-up payload.
#[derive(Clone, Deserialize, Serialize)]
pub struct UserPost {
    pub email: String,
    pub password: String,
}

/// Login payload.
#[derive(Clone, Deserialize, Serialize)]
pub struct UserLoginRequest {
    pub email: String,
    pub password: String,
    /// Requested token lifetime, capped at one hour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in_seconds: Option<i64>,
}

/// Login answer: the user plus a fresh session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLogin {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub email: String,
    pub token: String,
}

impl UserPost {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl UserLoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            expires_in_seconds: None,
        }
    }
}

impl fmt::Debug for UserPost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPost")
            .field("email", &self.email)
            .field("password", &"REDACTED")
            .finish()
    }
}

impl fmt::Debug for UserLoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserLoginRequest")
            .field("email", &self.email)
            .field("password", &"REDACTED")
            .field("expires_in_seconds", &self.expires_in_seconds)
            .finish()
    }
}

impl From<User> for UserApi {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            created_at: value.created_at,
            updated_at: value.updated_at,
            email: value.email,
        }
    }
}

impl fmt::Display for UserApi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User '{}' (ID: {})", self.email, self.id)
    }
}

/// Creates a new user from the provided payload.
///
/// # Examples
///
/// ```rust,no_run
/// use chirpy_web::user::{UserPost, create_user};
/// # use chirpy_models::db::connection::DbConnection;
///
/// # fn example(connection: &DbConnection) -> Result<(), Box<dyn std::error::Error>> {
/// let payload = UserPost::new("saul@bettercall.com", "123456");
/// let user = create_user(payload, connection)?;
/// # Ok(())
/// # }
/// ```
pub fn create_user(payload: UserPost, connection: &DbConnection) -> Result<UserApi> {
    let hash = hash_password(&payload.password)?;
    let user = UserCreate::new(payload.email, hash)
        .save(connection)
        .map_err(|err| {
            if err.is_unique_violation() {
                Error::EmailTaken
            } else {
                Error::from(err)
            }
        })?;

    let user = UserApi::from(user);
    info!("Created {user}");
    Ok(user)
}
