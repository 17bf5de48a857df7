use crate::{ApiError, ApiResult, Caller, LeagueAppData};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use chrono::Local;
use league_core::notification::{visible_notifications, Notification, NotificationDraft};

pub fn notification_routes() -> Router<LeagueAppData> {
    Router::new()
        .route(
            "/api/notifications",
            get(notification_list_action).post(notification_create_action),
        )
        .route("/api/notifications/{notification_id}", delete(notification_delete_action))
}

pub async fn notification_list_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
) -> Json<Vec<Notification>> {
    let data = state.data.read().await;
    let now = Local::now().naive_local();

    Json(
        visible_notifications(&data.notifications, caller.user.as_ref(), now)
            .into_iter()
            .cloned()
            .collect(),
    )
}

pub async fn notification_create_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Json(draft): Json<NotificationDraft>,
) -> ApiResult<impl IntoResponse> {
    caller.require_admin()?;

    if draft.title.trim().is_empty() {
        return Err(ApiError::bad_request("notification title must not be empty"));
    }
    if draft.ends_at.is_some_and(|end| end <= draft.starts_at) {
        return Err(ApiError::bad_request("notification must end after it starts"));
    }

    let mut data = state.write_as(&caller).await?;

    let notification = draft.into_notification(data.allocate_id());
    data.notifications.push(notification.clone());
    state.persist(&data);

    Ok((StatusCode::CREATED, Json(notification)))
}

pub async fn notification_delete_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(notification_id): Path<u32>,
) -> ApiResult<StatusCode> {
    caller.require_admin()?;

    let mut data = state.write_as(&caller).await?;

    let before = data.notifications.len();
    data.notifications.retain(|n| n.id != notification_id);

    if data.notifications.len() == before {
        return Err(ApiError::not_found(format!(
            "notification {} not found",
            notification_id
        )));
    }
    state.persist(&data);

    Ok(StatusCode::NO_CONTENT)
}
