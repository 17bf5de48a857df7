pub mod routes;

use crate::{ApiError, ApiResult, Caller, LeagueAppData};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use league_core::team::{Team, TeamColors, TeamContact, TeamUpdate};
use log::info;
use serde::Deserialize;

pub fn team_routes() -> Router<LeagueAppData> {
    routes::routes()
}

#[derive(Deserialize)]
pub struct TeamCreateRequest {
    pub name: String,
    #[serde(default)]
    pub contact: TeamContact,
    #[serde(default)]
    pub colors: TeamColors,
}

pub async fn team_list_action(State(state): State<LeagueAppData>) -> impl IntoResponse {
    let data = state.data.read().await;

    let mut teams: Vec<Team> = data.teams.clone();
    teams.sort_by(|a, b| a.name.cmp(&b.name));

    Json(teams)
}

pub async fn team_get_action(
    State(state): State<LeagueAppData>,
    Path(team_id): Path<u32>,
) -> ApiResult<Json<Team>> {
    let data = state.data.read().await;

    Ok(Json(data.require_team(team_id)?.clone()))
}

pub async fn team_create_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Json(request): Json<TeamCreateRequest>,
) -> ApiResult<impl IntoResponse> {
    caller.require_admin()?;

    let name = request.name.trim().to_string();
    if name.is_empty() {
        return Err(ApiError::bad_request("team name must not be empty"));
    }

    let mut data = state.write_as(&caller).await?;

    if data.teams.iter().any(|t| t.name.eq_ignore_ascii_case(&name)) {
        return Err(ApiError::conflict(format!("team '{}' already exists", name)));
    }

    let mut team = Team::new(data.allocate_id(), name);
    team.contact = request.contact;
    team.colors = request.colors;

    data.teams.push(team.clone());
    state.persist(&data);

    info!("team created: {} ({})", team.name, team.id);

    Ok((StatusCode::CREATED, Json(team)))
}

pub async fn team_update_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(team_id): Path<u32>,
    Json(update): Json<TeamUpdate>,
) -> ApiResult<Json<Team>> {
    let scope = caller.scope();
    caller.require(scope.is_admin() || (update.is_manager_editable() && scope.can_manage_team(team_id)))?;

    let mut data = state.write_as(&caller).await?;

    let team = data
        .team_mut(team_id)
        .ok_or_else(|| ApiError::not_found(format!("team {} not found", team_id)))?;

    update.apply(team);
    let team = team.clone();

    state.persist(&data);

    Ok(Json(team))
}

pub async fn team_delete_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(team_id): Path<u32>,
) -> ApiResult<StatusCode> {
    caller.require_admin()?;

    let mut data = state.write_as(&caller).await?;

    let team = data.remove_team(team_id)?;
    state.persist(&data);

    info!("team deleted: {} ({})", team.name, team.id);

    Ok(StatusCode::NO_CONTENT)
}
