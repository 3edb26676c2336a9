//! Secure password hashing and verification using Argon2.
//!
//! Hashes are PHC strings (`$argon2id$v=19$m=...,t=...,p=...$<salt>$<hash>`)
//! embedding the algorithm, its cost parameters and a per-hash random salt,
//! so a stored hash is self-describing and can be verified without any other
//! lookup.
//!
//! # Examples
//!
//! ```rust
//! use chirpy_auth::secret_hash::{check_password_hash, hash_password};
//!
//! let hash = hash_password("user_password_123").unwrap();
//!
//! assert!(check_password_hash("user_password_123", &hash).is_ok());
//! assert!(check_password_hash("wrong_password", &hash).is_err());
//! ```

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{self, PasswordHash, SaltString},
};
use rand::rngs::OsRng;
use tracing::{debug, warn};

use crate::prelude::*;

/// Hashes a plaintext password with a freshly generated salt.
///
/// Accepts any string, including the empty string and very long inputs.
/// Only a failure of the underlying primitive is reported as an error.
///
/// # Returns
///
/// * `Ok(String)` - PHC-encoded hash ready for storage
/// * `Err(Error::HashingFault)` - the hashing primitive failed
pub fn hash_password(pw: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(pw.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(Error::HashingFault)
}

/// Verifies a password against a stored PHC hash.
///
/// Verification is delegated to the hash's own algorithm with its embedded
/// salt and parameters; the digest comparison is constant-time.
///
/// # Returns
///
/// * `Ok(())` - the password matches
/// * `Err(Error::CredentialMismatch)` - the password does not match
/// * `Err(Error::MalformedHash)` - the stored hash is unparseable or uses an
///   unsupported algorithm
pub fn check_password_hash(pw: &str, hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(hash).map_err(|err| {
        warn!("Stored password hash could not be parsed: {err}");
        Error::MalformedHash(err)
    })?;

    match Argon2::default().verify_password(pw.as_bytes(), &parsed) {
        Ok(()) => Ok(()),
        Err(password_hash::Error::Password) => {
            debug!("Password does not match stored hash");
            Err(Error::CredentialMismatch)
        }
        Err(err) => {
            warn!(
                "Stored password hash with algorithm '{}' cannot be verified: {err}",
                parsed.algorithm
            );
            Err(Error::MalformedHash(err))
        }
    }
}
