use crate::ApiError;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};

/// JSON 404 for unknown routes
pub async fn default_handler(uri: Uri) -> Response {
    ApiError::not_found(format!("no route for {}", uri.path())).into_response()
}
