pub mod routes;

use crate::{ApiError, ApiResult, Caller, LeagueAppData};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use league_core::user::{User, UserDraft};
use league_core::{LeagueData, LeagueResult};
use log::info;
use serde::Serialize;

pub fn user_routes() -> Router<LeagueAppData> {
    routes::routes()
}

#[derive(Serialize)]
pub struct MeDto {
    #[serde(flatten)]
    pub user: User,
    pub teams: Vec<MeTeamDto>,
}

#[derive(Serialize)]
pub struct MeTeamDto {
    pub id: u32,
    pub name: String,
}

fn validate_user(data: &LeagueData, user: &User) -> LeagueResult<()> {
    user.validate()?;

    for team_id in &user.team_ids {
        data.require_team(*team_id)?;
    }

    Ok(())
}

pub async fn me_action(State(state): State<LeagueAppData>, caller: Caller) -> ApiResult<Json<MeDto>> {
    let user = caller.require_user()?.clone();
    let data = state.data.read().await;

    let teams = user
        .team_ids
        .iter()
        .filter_map(|id| data.team(*id))
        .map(|t| MeTeamDto {
            id: t.id,
            name: t.name.clone(),
        })
        .collect();

    Ok(Json(MeDto { user, teams }))
}

pub async fn user_list_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
) -> ApiResult<Json<Vec<User>>> {
    caller.require_admin()?;

    let data = state.data.read().await;

    let mut users = data.users.clone();
    users.sort_by(|a, b| a.username.cmp(&b.username));

    Ok(Json(users))
}

pub async fn user_create_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Json(draft): Json<UserDraft>,
) -> ApiResult<impl IntoResponse> {
    caller.require_admin()?;

    let mut data = state.write_as(&caller).await?;

    if data.users.iter().any(|u| u.username == draft.username) {
        return Err(ApiError::conflict(format!("username '{}' is taken", draft.username)));
    }

    let mut user = draft.into_user(0);
    validate_user(&data, &user)?;

    user.id = data.allocate_id();
    data.users.push(user.clone());
    state.persist(&data);

    info!("user created: {} as {}", user.username, user.role);

    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn user_update_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(user_id): Path<u32>,
    Json(draft): Json<UserDraft>,
) -> ApiResult<Json<User>> {
    caller.require_admin()?;

    let mut data = state.write_as(&caller).await?;

    if data.user(user_id).is_none() {
        return Err(ApiError::not_found(format!("user {} not found", user_id)));
    }
    if data.users.iter().any(|u| u.id != user_id && u.username == draft.username) {
        return Err(ApiError::conflict(format!("username '{}' is taken", draft.username)));
    }

    let user = draft.into_user(user_id);
    validate_user(&data, &user)?;

    if let Some(existing) = data.user_mut(user_id) {
        *existing = user.clone();
    }
    state.persist(&data);

    Ok(Json(user))
}

pub async fn user_delete_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(user_id): Path<u32>,
) -> ApiResult<StatusCode> {
    caller.require_admin()?;

    if caller.scope().user_id() == Some(user_id) {
        return Err(ApiError::bad_request("you cannot delete your own account"));
    }

    let mut data = state.write_as(&caller).await?;

    let index = data
        .users
        .iter()
        .position(|u| u.id == user_id)
        .ok_or_else(|| ApiError::not_found(format!("user {} not found", user_id)))?;

    let user = data.users.remove(index);

    for fixture in data.matches.iter_mut().filter(|m| m.referee_id == Some(user_id)) {
        fixture.referee_id = None;
    }
    state.persist(&data);

    info!("user deleted: {}", user.username);

    Ok(StatusCode::NO_CONTENT)
}
