//! Credential checks and token lifetime policy for logins.

use chirpy_auth::secret_hash::check_password_hash;
use chirpy_models::{db::connection::DbConnection, user::User};
use chrono::TimeDelta;
use tracing::debug;

use crate::prelude::*;
use crate::user::UserLoginRequest;

/// Lifetime of a session token when the client asks for nothing, or for too much.
pub const MAX_TOKEN_LIFETIME: TimeDelta = TimeDelta::hours(1);

/// Lifetime granted for a requested `expires_in_seconds`.
///
/// Missing, non-positive and over-long requests all get [`MAX_TOKEN_LIFETIME`].
///
/// ```rust
/// use chirpy_web::auth::{MAX_TOKEN_LIFETIME, token_lifetime};
/// use chrono::TimeDelta;
///
/// assert_eq!(token_lifetime(Some(60)), TimeDelta::seconds(60));
/// assert_eq!(token_lifetime(None), MAX_TOKEN_LIFETIME);
/// assert_eq!(token_lifetime(Some(86_400)), MAX_TOKEN_LIFETIME);
/// ```
pub fn token_lifetime(requested_seconds: Option<i64>) -> TimeDelta {
    match requested_seconds {
        Some(seconds) if seconds > 0 && seconds <= MAX_TOKEN_LIFETIME.num_seconds() => {
            TimeDelta::seconds(seconds)
        }
        _ => MAX_TOKEN_LIFETIME,
    }
}

/// Authenticates a user using login credentials.
///
/// Unknown email, wrong password and an unreadable stored hash all end up as
/// [`Error::WrongCredentials`]. Only faults (database, hashing primitive)
/// are reported as such.
///
/// # Examples
///
/// ```rust,no_run
/// use chirpy_web::auth::authenticate;
/// use chirpy_web::user::UserLoginRequest;
/// # use chirpy_models::db::connection::DbConnection;
///
/// # fn example(connection: &DbConnection) -> Result<(), Box<dyn std::error::Error>> {
/// let login = UserLoginRequest::new("saul@bettercall.com", "123456");
/// let user = authenticate(&login, connection)?;
/// println!("Authenticated user {}", user.id);
/// # Ok(())
/// # }
/// ```
pub fn authenticate(auth: &UserLoginRequest, connection: &DbConnection) -> Result<User> {
    let user = User::fetch_by_email(&auth.email, connection).map_err(|err| {
        if err.is_not_found() {
            debug!("Login attempt for unknown email");
            Error::WrongCredentials
        } else {
            Error::from(err)
        }
    })?;

    check_password_hash(&auth.password, &user.hashed_password).map_err(|err| {
        if err.is_unauthenticated() {
            debug!("Login rejected for user {}: {err}", user.id);
            Error::WrongCredentials
        } else {
            Error::from(err)
        }
    })?;

    Ok(user)
}
