use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Said to the user when the chat endpoint fails for any reason.
pub const CHAT_FALLBACK: &str = "Desculpe, tive um problema técnico. Pode repetir?";

/// Failure of a single gateway request. None of these take the server down.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0} not configured")]
    NotConfigured(String),
    #[error("{0:#}")]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) => StatusCode::BAD_REQUEST,
            Self::NotConfigured(_) | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Attach the user-facing fallback sentence to the error body.
    pub fn with_fallback(self, message: &'static str) -> ErrorReply {
        ErrorReply {
            error: self,
            message: Some(message),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

/// An [`ApiError`] plus an optional sentence the client can show verbatim.
#[derive(Debug)]
pub struct ErrorReply {
    pub error: ApiError,
    pub message: Option<&'static str>,
}

impl From<ApiError> for ErrorReply {
    fn from(error: ApiError) -> Self {
        Self {
            error,
            message: None,
        }
    }
}

impl IntoResponse for ErrorReply {
    fn into_response(self) -> Response {
        let status = self.error.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.error);
        } else {
            tracing::warn!("Rejected request: {}", self.error);
        }
        let body = ErrorBody {
            error: self.error.to_string(),
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ErrorReply::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::MissingField("text").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotConfigured("OPENAI_API_KEY".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::from(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(ApiError::MissingField("text").to_string(), "text is required");
        assert_eq!(
            ApiError::NotConfigured("ELEVENLABS_API_KEY".into()).to_string(),
            "ELEVENLABS_API_KEY not configured"
        );
    }

    #[test]
    fn test_fallback_response_status() {
        let resp = ApiError::NotConfigured("OPENAI_API_KEY".into())
            .with_fallback(CHAT_FALLBACK)
            .into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
