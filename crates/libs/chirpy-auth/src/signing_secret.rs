//! Symmetric token signing secret.

use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::prelude::*;

/// Environment variable holding the signing secret.
pub const JWT_SECRET_ENV: &str = "JWT_SECRET";

/// Process-wide key used both to sign and to verify session tokens.
///
/// Loaded once at startup and shared read-only afterwards; cloning only bumps
/// a reference count. The secret never shows up in `Debug` or `Display`
/// output.
#[derive(Clone)]
pub struct SigningSecret(Arc<str>);

impl SigningSecret {
    /// Wraps a secret, rejecting the empty string.
    ///
    /// ```rust
    /// use chirpy_auth::signing_secret::SigningSecret;
    ///
    /// assert!(SigningSecret::new("MySuperSecret").is_ok());
    /// assert!(SigningSecret::new("").is_err());
    /// ```
    pub fn new(secret: impl Into<String>) -> Result<Self> {
        let secret: String = secret.into();
        if secret.is_empty() {
            return Err(Error::EmptySigningSecret);
        }
        Ok(Self(Arc::from(secret)))
    }

    /// Reads the secret from the `JWT_SECRET` environment variable.
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var(JWT_SECRET_ENV).map_err(|_| Error::MissingSigningSecret)?;
        Self::new(secret)
    }

    pub(crate) fn encoding_key(&self) -> EncodingKey {
        EncodingKey::from_secret(self.0.as_bytes())
    }

    pub(crate) fn decoding_key(&self) -> DecodingKey {
        DecodingKey::from_secret(self.0.as_bytes())
    }
}

impl Display for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REDACTED")
    }
}

impl Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"REDACTED").finish()
    }
}
