//! User context for authenticated web requests.

use chirpy_auth::{auth_body::AuthBody, jwt::make_jwt, signing_secret::SigningSecret};
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

use crate::prelude::*;

/// The identity a session token vouches for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CtxUser {
    /// The unique user ID.
    pub id: Uuid,
}

impl CtxUser {
    /// Issues a session token for this user.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chirpy_auth::signing_secret::SigningSecret;
    /// use chirpy_web::ctx::ctx_user::CtxUser;
    /// use chrono::TimeDelta;
    /// use uuid::Uuid;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let secret = SigningSecret::new("MySuperSecret")?;
    /// let user = CtxUser { id: Uuid::new_v4() };
    ///
    /// let auth = user.generate_token(&secret, TimeDelta::hours(1))?;
    /// assert_eq!(auth.token_type, "Bearer");
    /// # Ok(())
    /// # }
    /// ```
    pub fn generate_token(&self, secret: &SigningSecret, expires_in: TimeDelta) -> Result<AuthBody> {
        let token = make_jwt(&self.id, secret, expires_in).map_err(|err| {
            error!("Failed to encode JWT {err}");
            err
        })?;
        Ok(AuthBody::new(token))
    }
}
