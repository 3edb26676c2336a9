//! Main Crate Error

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;
use tracing::{debug, error};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Models(#[from] chirpy_models::error::Error),

    #[error(transparent)]
    Auth(#[from] chirpy_auth::Error),

    /* Api Errors */
    #[error("Wrong Credentials")]
    WrongCredentials,

    #[error("Chirp is too long")]
    ChirpTooLong,

    #[error("Chirp not found")]
    ChirpNotFound,

    #[error("Email already registered")]
    EmailTaken,

    #[error("API Forbidden")]
    Forbidden,

    #[error("Context Missing")]
    CtxMissing,
}

impl Error {
    /// Status and client-facing message.
    ///
    /// Every authentication failure shares one answer so a caller can't tell
    /// an unknown email from a wrong password, or a forged token from an
    /// expired one.
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            Error::WrongCredentials | Error::CtxMissing => {
                (StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            Error::Auth(err) if err.is_unauthenticated() => {
                (StatusCode::UNAUTHORIZED, "Unauthorized")
            }
            Error::ChirpTooLong => (StatusCode::BAD_REQUEST, "Chirp is too long"),
            Error::ChirpNotFound => (StatusCode::NOT_FOUND, "Chirp not found"),
            Error::EmailTaken => (StatusCode::CONFLICT, "Email already registered"),
            Error::Forbidden => (StatusCode::FORBIDDEN, "Forbidden"),
            Error::Auth(_) | Error::Models(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("Creating API error response for error: {:?}", self);
        } else {
            debug!("Creating API error response for error: {}", self);
        }

        let body = Json(json!({
            "error": {
                "message": message,
                "status": status.as_u16()
            }
        }));
        (status, body).into_response()
    }
}
