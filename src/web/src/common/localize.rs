use crate::i18n::{detect_language, DEFAULT_LANGUAGE};
use crate::{ErrorMessage, LeagueAppData};
use axum::extract::{Request, State};
use axum::http::header::ACCEPT_LANGUAGE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Rewrites error bodies into the caller's language.
pub async fn localize_errors(State(state): State<LeagueAppData>, request: Request, next: Next) -> Response {
    let lang = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok())
        .map(detect_language)
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    let response = next.run(request).await;

    let Some(message) = response.extensions().get::<ErrorMessage>().cloned() else {
        return response;
    };

    let i18n = state.i18n.for_lang(&lang);

    let body = Json(json!({
        "error": i18n.t(message.key),
        "detail": message.detail,
    }));

    (response.status(), body).into_response()
}
