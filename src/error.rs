use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value as JsonValue};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error {status}: {detail}")]
    Upstream {
        status: u16,
        detail: String,
        raw: JsonValue,
    },

    #[error("Malformed model output: {detail}")]
    MalformedOutput { detail: String, raw: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),

    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, detail, raw) = match self {
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            Error::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string(), None),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            Error::Upstream {
                status,
                detail,
                raw,
            } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                detail,
                Some(raw),
            ),
            Error::MalformedOutput { detail, raw } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                detail,
                Some(JsonValue::String(raw)),
            ),
            Error::Reqwest(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("External service error: {}", err),
                None,
            ),
            Error::Json(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None),
            Error::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            Error::Anyhow(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None),
        };

        if status.is_server_error() {
            tracing::error!(status = %status, "{}", detail);
        }

        let body = match raw {
            Some(raw) => json!({ "detail": detail, "raw": raw }),
            None => json!({ "detail": detail }),
        };
        (status, Json(body)).into_response()
    }
}
