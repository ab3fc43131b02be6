//! Error taxonomy shared by the remote clients, the authorization handshake
//! and the playlist pipeline.
//!
//! Every remote-call boundary classifies its outcome into exactly one variant
//! before returning; raw transport errors never cross a component boundary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Upstream says the resource does not exist (404-equivalent).
    #[error("resource not found")]
    NotFound,

    /// Non-2xx response from a remote dependency.
    #[error("upstream service returned status {0}")]
    Upstream(reqwest::StatusCode),

    /// 2xx response whose body was unusable (missing field, bad encoding).
    #[error("upstream response was unusable: {0}")]
    MalformedResponse(String),

    /// Transport-level failure reaching a remote dependency.
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    /// CSRF state check failed during the authorization callback.
    #[error("authorization state mismatch")]
    StateMismatch,

    /// The authorization code could not be exchanged for a credential.
    #[error("authorization code exchange failed")]
    ExchangeFailed(#[source] Box<Error>),

    /// Locally detectable bad input (empty artist or song name, etc.).
    #[error("invalid input: {0}")]
    Validation(String),

    /// Request carried no usable access credential.
    #[error("not authenticated")]
    Unauthenticated,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            Error::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Error::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            Error::MalformedResponse(_) => (StatusCode::BAD_GATEWAY, "MALFORMED_RESPONSE"),
            Error::Network(_) => (StatusCode::BAD_GATEWAY, "NETWORK_ERROR"),
            Error::StateMismatch => (StatusCode::FORBIDDEN, "STATE_MISMATCH"),
            Error::ExchangeFailed(_) => (StatusCode::BAD_GATEWAY, "EXCHANGE_FAILED"),
            Error::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Error::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
        };

        // The Display strings are generic by construction; upstream payloads
        // are never echoed back to the caller.
        let body = Json(json!({
            "error": {
                "code": code,
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}
