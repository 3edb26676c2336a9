//! Tokens signed (or "unsigned") with any algorithm other than HS256 must be
//! refused before their signature is even looked at.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chirpy_auth::jwt::{Claims, jwt_encode, validate_jwt};
use chirpy_auth::signing_secret::SigningSecret;
use chirpy_auth::{Error, ISS};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use uuid::Uuid;

const SECRET: &str = "your-test-secret";
const RSA_PRIVATE_KEY: &str = include_str!("fixtures/rsa_private.pem");
const ED25519_PRIVATE_KEY: &str = include_str!("fixtures/ed25519_private.pem");

fn secret() -> SigningSecret {
    SigningSecret::new(SECRET).unwrap()
}

fn claims() -> Claims {
    Claims::new(&Uuid::new_v4(), Utc::now(), TimeDelta::hours(1)).unwrap()
}

fn assert_rejected(token: &str, alg: &str) {
    match validate_jwt(token, &secret()) {
        Err(Error::TokenAlgorithmRejected(got)) => assert_eq!(got, alg),
        other => panic!("expected {alg} to be rejected, got {other:?}"),
    }
}

fn with_header(token: &str, header: &str) -> String {
    let (_, rest) = token.split_once('.').unwrap();
    format!("{}.{rest}", URL_SAFE_NO_PAD.encode(header))
}

#[test]
fn rs256_token_is_rejected() {
    let key = EncodingKey::from_rsa_pem(RSA_PRIVATE_KEY.as_bytes()).unwrap();
    let token = encode(&Header::new(Algorithm::RS256), &claims(), &key).unwrap();

    assert_rejected(&token, "RS256");
}

#[test]
fn eddsa_token_is_rejected() {
    let key = EncodingKey::from_ed_pem(ED25519_PRIVATE_KEY.as_bytes()).unwrap();
    let token = encode(&Header::new(Algorithm::EdDSA), &claims(), &key).unwrap();

    assert_rejected(&token, "EdDSA");
}

#[test]
fn other_hmac_variants_are_rejected() {
    let key = EncodingKey::from_secret(SECRET.as_bytes());
    for (alg, name) in [(Algorithm::HS384, "HS384"), (Algorithm::HS512, "HS512")] {
        let token = encode(&Header::new(alg), &claims(), &key).unwrap();
        assert_rejected(&token, name);
    }
}

#[test]
fn unsigned_token_is_rejected() {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims()).unwrap());
    let token = format!("{header}.{payload}.");

    assert_rejected(&token, "none");
}

#[test]
fn algorithm_name_is_case_sensitive() {
    let token = jwt_encode(&claims(), &secret()).unwrap();

    assert_rejected(&with_header(&token, r#"{"alg":"hs256","typ":"JWT"}"#), "hs256");
}

#[test]
fn relabelled_hs256_token_is_rejected() {
    let token = jwt_encode(&claims(), &secret()).unwrap();

    assert_rejected(&with_header(&token, r#"{"alg":"RS256","typ":"JWT"}"#), "RS256");
}

#[test]
fn pinned_algorithm_is_accepted() {
    let claims = claims();
    let token = jwt_encode(&claims, &secret()).unwrap();

    assert_eq!(claims.iss, ISS);
    assert_eq!(
        validate_jwt(&token, &secret()).unwrap().to_string(),
        claims.sub
    );
}
