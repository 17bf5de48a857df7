use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use league_core::LeagueError;
use serde_json::json;

/// Translation key plus the untranslated detail. Attached to error responses
/// so the localization layer can rewrite the message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    pub key: &'static str,
    pub detail: String,
}

impl ErrorMessage {
    pub fn new(key: &'static str, detail: impl Into<String>) -> Self {
        ErrorMessage {
            key,
            detail: detail.into(),
        }
    }
}

/// Custom error type for API handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NotFound(ErrorMessage),
    BadRequest(ErrorMessage),
    Unauthorized(ErrorMessage),
    Forbidden(ErrorMessage),
    Conflict(ErrorMessage),
    InternalError(ErrorMessage),
}

impl ApiError {
    pub fn not_found(detail: impl Into<String>) -> Self {
        ApiError::NotFound(ErrorMessage::new("error.not_found", detail))
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        ApiError::BadRequest(ErrorMessage::new("error.bad_request", detail))
    }

    pub fn unauthorized(detail: impl Into<String>) -> Self {
        ApiError::Unauthorized(ErrorMessage::new("error.unauthorized", detail))
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden(ErrorMessage::new(
            "error.forbidden",
            "operation not permitted for this user",
        ))
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        ApiError::Conflict(ErrorMessage::new("error.conflict", detail))
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        ApiError::InternalError(ErrorMessage::new("error.internal", detail))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &ErrorMessage {
        match self {
            ApiError::NotFound(m)
            | ApiError::BadRequest(m)
            | ApiError::Unauthorized(m)
            | ApiError::Forbidden(m)
            | ApiError::Conflict(m)
            | ApiError::InternalError(m) => m,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message().clone();

        let body = Json(json!({
            "error": message.detail,
        }));

        let mut response = (status, body).into_response();
        response.extensions_mut().insert(message);
        response
    }
}

impl From<LeagueError> for ApiError {
    fn from(err: LeagueError) -> Self {
        let message = ErrorMessage::new(err.message_key(), err.to_string());

        match err {
            LeagueError::NotFound { .. } => ApiError::NotFound(message),
            LeagueError::RoleCannotHaveTeam
            | LeagueError::ManagerWithoutTeam
            | LeagueError::Validation(_)
            | LeagueError::Bracket(_) => ApiError::BadRequest(message),
            LeagueError::Locked(_) => ApiError::Conflict(message),
            LeagueError::Forbidden => ApiError::Forbidden(message),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::internal(format!("IO error: {}", err))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::internal(format!("JSON error: {}", err))
    }
}

/// Helper type for handler results
pub type ApiResult<T> = Result<T, ApiError>;
