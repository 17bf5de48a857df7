pub mod routes;

use crate::{ApiError, ApiResult, Caller, LeagueAppData};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use league_core::r#match::{Match, MatchDraft, MatchKind, MatchUpdate};
use league_core::user::UserRole;
use league_core::{LeagueData, LeagueError, LeagueResult};
use chrono::Datelike;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

pub fn match_routes() -> Router<LeagueAppData> {
    routes::routes()
}

#[derive(Deserialize, Default)]
pub struct MatchListQuery {
    pub team_id: Option<u32>,
    pub kind: Option<MatchKind>,
    pub referee_id: Option<u32>,
}

#[derive(Deserialize)]
pub struct ScoreRequest {
    pub home_score: u8,
    pub away_score: u8,
}

#[derive(Serialize)]
pub struct MatchDto {
    #[serde(flatten)]
    pub fixture: Match,
    pub home_team_name: String,
    pub away_team_name: String,
    pub venue_name: Option<String>,
}

impl MatchDto {
    fn of(data: &LeagueData, fixture: &Match) -> Self {
        MatchDto {
            home_team_name: data.team_name(fixture.home_team_id),
            away_team_name: data.team_name(fixture.away_team_id),
            venue_name: fixture
                .venue_id
                .and_then(|id| data.venue(id))
                .map(|v| v.name.clone()),
            fixture: fixture.clone(),
        }
    }
}

fn check_references(data: &LeagueData, venue_id: Option<u32>, referee_id: Option<u32>) -> LeagueResult<()> {
    if let Some(venue_id) = venue_id {
        data.venue(venue_id)
            .ok_or_else(|| LeagueError::not_found("venue", venue_id))?;
    }

    if let Some(referee_id) = referee_id {
        let referee = data
            .user(referee_id)
            .ok_or_else(|| LeagueError::not_found("user", referee_id))?;
        if referee.role != UserRole::Referee {
            return Err(LeagueError::validation(format!(
                "{} is not a referee",
                referee.username
            )));
        }
    }

    Ok(())
}

fn warn_outside_timeslots(data: &LeagueData, fixture: &Match) {
    let Some(venue_id) = fixture.venue_id else {
        return;
    };

    let mut slots = data.timeslots.iter().filter(|t| t.venue_id == venue_id).peekable();
    if slots.peek().is_none() {
        return;
    }

    if !slots.any(|t| t.covers(fixture.date.weekday(), fixture.time)) {
        warn!(
            "match {}: kick-off {} {} is outside the timeslots of venue {}",
            fixture.id, fixture.date, fixture.time, venue_id
        );
    }
}

pub async fn match_list_action(
    State(state): State<LeagueAppData>,
    Query(query): Query<MatchListQuery>,
) -> impl IntoResponse {
    let data = state.data.read().await;

    let mut matches: Vec<MatchDto> = data
        .matches
        .iter()
        .filter(|m| query.team_id.is_none_or(|id| m.involves(id)))
        .filter(|m| query.kind.is_none_or(|kind| m.kind == kind))
        .filter(|m| query.referee_id.is_none_or(|id| m.referee_id == Some(id)))
        .map(|m| MatchDto::of(&data, m))
        .collect();

    matches.sort_by(|a, b| {
        a.fixture
            .date
            .cmp(&b.fixture.date)
            .then(a.fixture.time.cmp(&b.fixture.time))
    });

    Json(matches)
}

pub async fn match_get_action(
    State(state): State<LeagueAppData>,
    Path(match_id): Path<u32>,
) -> ApiResult<Json<MatchDto>> {
    let data = state.data.read().await;

    let fixture = data.require_fixture(match_id)?;

    Ok(Json(MatchDto::of(&data, fixture)))
}

pub async fn match_create_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Json(draft): Json<MatchDraft>,
) -> ApiResult<impl IntoResponse> {
    caller.require_admin()?;
    draft.validate()?;

    let mut data = state.write_as(&caller).await?;

    data.require_team(draft.home_team_id)?;
    data.require_team(draft.away_team_id)?;
    check_references(&data, draft.venue_id, draft.referee_id)?;

    let fixture = draft.into_match(data.allocate_id());
    warn_outside_timeslots(&data, &fixture);
    data.matches.push(fixture.clone());

    let dto = MatchDto::of(&data, &fixture);
    state.persist(&data);

    info!(
        "match created: {} vs {} on {}",
        dto.home_team_name, dto.away_team_name, fixture.date
    );

    Ok((StatusCode::CREATED, Json(dto)))
}

pub async fn match_update_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(match_id): Path<u32>,
    Json(update): Json<MatchUpdate>,
) -> ApiResult<Json<MatchDto>> {
    caller.require_user()?;

    let mut data = state.write_as(&caller).await?;

    let scope = caller.scope();
    let current = data.require_fixture(match_id)?;
    caller.require(scope.can_edit_match(current))?;

    // non-admin editors may only move the kick-off
    if !scope.is_admin() && (update.venue_id.is_some() || update.referee_id.is_some() || update.matchday.is_some()) {
        return Err(ApiError::forbidden());
    }

    check_references(&data, update.venue_id, update.referee_id)?;

    let fixture = data
        .fixture_mut(match_id)
        .ok_or_else(|| ApiError::not_found(format!("match {} not found", match_id)))?;
    update.apply(fixture);
    let fixture = fixture.clone();
    warn_outside_timeslots(&data, &fixture);

    let dto = MatchDto::of(&data, &fixture);
    state.persist(&data);

    Ok(Json(dto))
}

pub async fn match_score_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(match_id): Path<u32>,
    Json(score): Json<ScoreRequest>,
) -> ApiResult<Json<MatchDto>> {
    let mut data = state.write_as(&caller).await?;

    let current = data.require_fixture(match_id)?;
    caller.require(caller.scope().can_submit_score(current))?;

    let is_admin = caller.scope().is_admin();

    let fixture = data
        .fixture_mut(match_id)
        .ok_or_else(|| ApiError::not_found(format!("match {} not found", match_id)))?;

    if fixture.is_locked && is_admin {
        fixture.home_score = Some(score.home_score);
        fixture.away_score = Some(score.away_score);
        fixture.is_submitted = true;
    } else {
        fixture.submit_score(score.home_score, score.away_score)?;
    }
    let fixture = fixture.clone();

    debug!(
        "match {}: score {}-{} submitted by user {:?}",
        match_id,
        score.home_score,
        score.away_score,
        caller.scope().user_id()
    );

    let dto = MatchDto::of(&data, &fixture);
    state.persist(&data);

    Ok(Json(dto))
}

async fn set_lock(state: &LeagueAppData, caller: &Caller, match_id: u32, locked: bool) -> ApiResult<Json<MatchDto>> {
    caller.require_admin()?;

    let mut data = state.write_as(caller).await?;

    let fixture = data
        .fixture_mut(match_id)
        .ok_or_else(|| ApiError::not_found(format!("match {} not found", match_id)))?;
    fixture.is_locked = locked;
    let fixture = fixture.clone();

    let dto = MatchDto::of(&data, &fixture);
    state.persist(&data);

    Ok(Json(dto))
}

pub async fn match_lock_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(match_id): Path<u32>,
) -> ApiResult<Json<MatchDto>> {
    set_lock(&state, &caller, match_id, true).await
}

pub async fn match_unlock_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(match_id): Path<u32>,
) -> ApiResult<Json<MatchDto>> {
    set_lock(&state, &caller, match_id, false).await
}

pub async fn match_delete_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(match_id): Path<u32>,
) -> ApiResult<StatusCode> {
    caller.require_admin()?;

    let mut data = state.write_as(&caller).await?;

    let fixture = data.remove_match(match_id)?;
    state.persist(&data);

    info!("match deleted: {}", fixture.id);

    Ok(StatusCode::NO_CONTENT)
}
