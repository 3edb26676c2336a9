//! Authentication error types.
//!
//! Every variant is distinguishable internally so callers can log and test
//! the exact reason a credential or token was refused. At the HTTP boundary
//! all of them except the faults collapse into one "unauthenticated" answer,
//! see [`Error::is_unauthenticated`].

use argon2::password_hash;

/// Authentication errors.
#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
    /// The hashing primitive itself failed (e.g. entropy source).
    #[error("Error hashing password {0}")]
    HashingFault(password_hash::Error),

    /// The secret does not match the stored hash.
    #[error("Credential mismatch")]
    CredentialMismatch,

    /// The stored hash cannot be parsed or names an unsupported algorithm.
    #[error("Malformed password hash {0}")]
    MalformedHash(password_hash::Error),

    /// No token was presented.
    #[error("Token Missing")]
    TokenMissing,

    /// The token is not a well-formed JWS compact string with the expected claims.
    #[error("Malformed Token")]
    TokenMalformed,

    /// The token header names an algorithm other than the pinned one.
    #[error("Token algorithm '{0}' rejected")]
    TokenAlgorithmRejected(String),

    /// The token signature does not verify with the signing secret.
    #[error("Invalid Token Signature")]
    TokenSignatureInvalid,

    /// The token was not issued by this service.
    #[error("Token issuer rejected")]
    TokenIssuerRejected,

    /// The token is at or past its expiration time.
    #[error("Token Expired")]
    TokenExpired,

    /// The subject claim is not a UUID.
    #[error("Malformed token subject: {0}")]
    TokenSubjectMalformed(uuid::Error),

    /// Signing or serializing a new token failed.
    #[error(transparent)]
    TokenCreation(jsonwebtoken::errors::Error),

    /// `iat + lifetime` does not fit in a timestamp.
    #[error("Token lifetime overflows the expiration timestamp")]
    TokenLifetimeOverflow,

    /// `JWT_SECRET` is not set.
    #[error("Env Variable 'JWT_SECRET' missing")]
    MissingSigningSecret,

    /// The configured signing secret is empty.
    #[error("Signing secret must not be empty")]
    EmptySigningSecret,
}

impl Error {
    /// Whether this error is a token rejection (as opposed to a fault).
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            Error::TokenMissing
                | Error::TokenMalformed
                | Error::TokenAlgorithmRejected(_)
                | Error::TokenSignatureInvalid
                | Error::TokenIssuerRejected
                | Error::TokenExpired
                | Error::TokenSubjectMalformed(_)
        )
    }

    /// Whether the caller should simply be told "unauthenticated".
    ///
    /// Credential mismatches, corrupt stored hashes and every token rejection
    /// answer `true`. Hashing/signing faults and configuration errors are
    /// internal errors and answer `false`.
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Error::CredentialMismatch | Error::MalformedHash(_))
            || self.is_token_rejection()
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(value: jsonwebtoken::errors::Error) -> Self {
        Self::TokenCreation(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_rejections_are_unauthenticated() {
        let rejections = [
            Error::TokenMissing,
            Error::TokenMalformed,
            Error::TokenAlgorithmRejected(String::from("none")),
            Error::TokenSignatureInvalid,
            Error::TokenIssuerRejected,
            Error::TokenExpired,
        ];
        for err in rejections {
            assert!(err.is_token_rejection(), "{err}");
            assert!(err.is_unauthenticated(), "{err}");
        }
    }

    #[test]
    fn credential_errors_are_unauthenticated_but_not_token_rejections() {
        let mismatch = Error::CredentialMismatch;
        let malformed = Error::MalformedHash(password_hash::Error::PhcStringField);
        assert!(mismatch.is_unauthenticated());
        assert!(malformed.is_unauthenticated());
        assert!(!mismatch.is_token_rejection());
        assert!(!malformed.is_token_rejection());
    }

    #[test]
    fn faults_are_not_unauthenticated() {
        let faults = [
            Error::HashingFault(password_hash::Error::Crypto),
            Error::TokenLifetimeOverflow,
            Error::MissingSigningSecret,
            Error::EmptySigningSecret,
        ];
        for err in faults {
            assert!(!err.is_unauthenticated(), "{err}");
        }
    }
}
