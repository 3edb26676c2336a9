//! Session token issuance and validation.
//!
//! Tokens are JWS compact strings signed with HMAC-SHA256 under the
//! process-wide [`SigningSecret`]. A token asserts one identity (a user
//! [`Uuid`]) for a bounded time and carries no server-side state.
//!
//! Validation is deliberately strict:
//!
//! 1. the raw header is inspected before the JWT library sees the token and
//!    anything but [`ALGORITHM`] is refused (`none`, `RS256`, `HS512`, ...),
//! 2. the signature must verify under the signing secret,
//! 3. the issuer must be [`ISS`],
//! 4. `now >= exp` means expired, with no leeway,
//! 5. the subject must parse back into a [`Uuid`].
//!
//! # Examples
//!
//! ```rust
//! use chirpy_auth::jwt::{make_jwt, validate_jwt};
//! use chirpy_auth::signing_secret::SigningSecret;
//! use chrono::TimeDelta;
//! use uuid::Uuid;
//!
//! let secret = SigningSecret::new("MySuperSecret").unwrap();
//! let user_id = Uuid::new_v4();
//!
//! let token = make_jwt(&user_id, &secret, TimeDelta::hours(1)).unwrap();
//! assert_eq!(validate_jwt(&token, &secret).unwrap(), user_id);
//! ```

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, Header, TokenData, Validation, decode, encode, errors::ErrorKind};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;
use uuid::Uuid;

use crate::ISS;
use crate::prelude::*;
use crate::signing_secret::SigningSecret;

/// The only signing algorithm this service issues or accepts.
pub const ALGORITHM: Algorithm = Algorithm::HS256;

/// JOSE name of [`ALGORITHM`] as it appears in the token header.
const ALGORITHM_NAME: &str = "HS256";

/// Claims carried by every session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id in canonical hyphenated form.
    pub sub: String,
    /// Issuer, always [`ISS`].
    pub iss: String,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Expires at (Unix seconds), always `iat` plus the requested lifetime.
    pub exp: i64,
}

impl Claims {
    /// Builds the claims for `user_id` issued at `issued_at`.
    ///
    /// `expires_in` may be zero or negative; such claims are already expired.
    /// The lifetime is truncated to whole seconds.
    pub fn new(user_id: &Uuid, issued_at: DateTime<Utc>, expires_in: TimeDelta) -> Result<Self> {
        let iat = issued_at.timestamp();
        let exp = iat
            .checked_add(expires_in.num_seconds())
            .ok_or(Error::TokenLifetimeOverflow)?;

        Ok(Self {
            sub: user_id.to_string(),
            iss: String::from(ISS),
            iat,
            exp,
        })
    }

    /// Strict expiry: a token is expired from the exact second `exp` on.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Parses the subject back into a user id.
    pub fn subject(&self) -> Result<Uuid> {
        Uuid::parse_str(&self.sub).map_err(Error::TokenSubjectMalformed)
    }
}

/// The part of the JOSE header the algorithm pin needs.
#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Refuses any token whose header does not name [`ALGORITHM`].
///
/// Runs on the raw header, independently of `jsonwebtoken`, so an attacker
/// controlling `alg` can never steer which verifier is used.
fn check_algorithm(token: &str) -> Result<()> {
    let mut segments = token.split('.');
    let (Some(header), Some(_payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(Error::TokenMalformed);
    };

    let header = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|_| Error::TokenMalformed)?;
    let header: RawHeader = serde_json::from_slice(&header).map_err(|_| Error::TokenMalformed)?;

    if header.alg != ALGORITHM_NAME {
        return Err(Error::TokenAlgorithmRejected(header.alg));
    }
    Ok(())
}

fn validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    // Expiry is checked by the caller against an explicit clock, strictly.
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.leeway = 0;
    validation.set_issuer(&[ISS]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    validation
}

fn decode_error(err: jsonwebtoken::errors::Error) -> Error {
    match err.kind() {
        ErrorKind::InvalidSignature => Error::TokenSignatureInvalid,
        ErrorKind::InvalidIssuer => Error::TokenIssuerRejected,
        ErrorKind::ExpiredSignature => Error::TokenExpired,
        _ => Error::TokenMalformed,
    }
}

/// Creates a signed token from arbitrary claims.
///
/// Claims are signed, not encrypted: never put secrets in them.
pub fn jwt_encode<T>(body: &T, secret: &SigningSecret) -> Result<String>
where
    T: Serialize,
{
    let header = Header::new(ALGORITHM);
    Ok(encode(&header, body, &secret.encoding_key())?)
}

/// Verifies algorithm, signature and issuer of a token and extracts its claims.
///
/// Expiry is *not* checked here; see [`validate_jwt_at`].
pub fn jwt_decode<T>(token: &str, secret: &SigningSecret) -> Result<TokenData<T>>
where
    T: DeserializeOwned,
{
    check_algorithm(token).inspect_err(|err| debug!("Token refused before decoding: {err}"))?;

    decode(token, &secret.decoding_key(), &validation()).map_err(|err| {
        debug!("Failed to decode jwt token {err}");
        decode_error(err)
    })
}

/// Issues a session token for `user_id` valid for `expires_in`.
///
/// Any lifetime is accepted, including non-positive ones which yield a token
/// that is expired from the moment it is issued.
pub fn make_jwt(user_id: &Uuid, secret: &SigningSecret, expires_in: TimeDelta) -> Result<String> {
    let claims = Claims::new(user_id, Utc::now(), expires_in)?;
    jwt_encode(&claims, secret)
}

/// Validates a session token against the current time and returns its subject.
pub fn validate_jwt(token: &str, secret: &SigningSecret) -> Result<Uuid> {
    validate_jwt_at(token, secret, Utc::now())
}

/// Validates a session token as of `now` and returns its subject.
pub fn validate_jwt_at(token: &str, secret: &SigningSecret, now: DateTime<Utc>) -> Result<Uuid> {
    let claims = jwt_decode::<Claims>(token, secret)?.claims;

    if claims.is_expired_at(now) {
        debug!("Token for subject {} expired at {}", claims.sub, claims.exp);
        return Err(Error::TokenExpired);
    }

    claims.subject()
}
