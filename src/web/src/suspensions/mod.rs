use crate::{ApiError, ApiResult, Caller, LeagueAppData};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{delete, get};
use axum::{Json, Router};
use league_core::suspension::{SuspensionDraft, SuspensionStatus};
use serde::Deserialize;

pub fn suspension_routes() -> Router<LeagueAppData> {
    Router::new()
        .route(
            "/api/suspensions",
            get(suspension_list_action).post(suspension_create_action),
        )
        .route("/api/suspensions/{suspension_id}", delete(suspension_delete_action))
}

#[derive(Deserialize, Default)]
pub struct SuspensionQuery {
    pub team_id: Option<u32>,
    /// `true` keeps only suspensions still in force.
    pub active: Option<bool>,
}

pub async fn suspension_list_action(
    State(state): State<LeagueAppData>,
    Query(query): Query<SuspensionQuery>,
) -> Json<Vec<SuspensionStatus>> {
    let data = state.data.read().await;

    let mut list: Vec<SuspensionStatus> = data
        .suspensions
        .iter()
        .filter(|s| query.team_id.is_none_or(|id| s.team_id == id))
        .map(|s| SuspensionStatus::of(s, &data.matches))
        .filter(|status| query.active.is_none_or(|active| status.in_force == active))
        .collect();

    list.sort_by(|a, b| b.suspension.start_date.cmp(&a.suspension.start_date));

    Json(list)
}

pub async fn suspension_create_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Json(draft): Json<SuspensionDraft>,
) -> ApiResult<impl IntoResponse> {
    caller.require_admin()?;

    if draft.player_name.trim().is_empty() {
        return Err(ApiError::bad_request("player name must not be empty"));
    }
    if draft.matches_count == 0 {
        return Err(ApiError::bad_request("a suspension covers at least one match"));
    }

    let mut data = state.write_as(&caller).await?;
    data.require_team(draft.team_id)?;

    let suspension = draft.into_suspension(data.allocate_id());
    data.suspensions.push(suspension.clone());

    let status = SuspensionStatus::of(&suspension, &data.matches);
    state.persist(&data);

    Ok((StatusCode::CREATED, Json(status)))
}

pub async fn suspension_delete_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(suspension_id): Path<u32>,
) -> ApiResult<StatusCode> {
    caller.require_admin()?;

    let mut data = state.write_as(&caller).await?;

    let before = data.suspensions.len();
    data.suspensions.retain(|s| s.id != suspension_id);

    if data.suspensions.len() == before {
        return Err(ApiError::not_found(format!("suspension {} not found", suspension_id)));
    }
    state.persist(&data);

    Ok(StatusCode::NO_CONTENT)
}
