pub mod routes;

use crate::{ApiError, ApiResult, Caller, LeagueAppData};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use chrono::{NaiveDate, NaiveTime};
use league_core::r#match::{Match, MatchKind};
use league_core::schedule::{Advancement, Bracket, CupBracket};
use serde::{Deserialize, Serialize};

pub fn cup_routes() -> Router<LeagueAppData> {
    routes::routes()
}

#[derive(Deserialize)]
pub struct BracketQuery {
    #[serde(default = "default_kind")]
    pub kind: MatchKind,
}

fn default_kind() -> MatchKind {
    MatchKind::Cup
}

#[derive(Deserialize)]
pub struct SeedRequest {
    #[serde(default = "default_kind")]
    pub kind: MatchKind,
    pub team_ids: Vec<u32>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub venue_id: Option<u32>,
}

#[derive(Deserialize)]
pub struct AdvanceRequest {
    pub winner_team_id: u32,
    #[serde(default)]
    pub next_date: Option<NaiveDate>,
    #[serde(default)]
    pub next_time: Option<NaiveTime>,
}

#[derive(Serialize)]
pub struct BracketDto {
    #[serde(flatten)]
    pub bracket: CupBracket,
    pub matches: Vec<Match>,
}

pub async fn bracket_get_action(
    State(state): State<LeagueAppData>,
    Query(query): Query<BracketQuery>,
) -> ApiResult<Json<BracketDto>> {
    let data = state.data.read().await;

    let bracket = data
        .brackets
        .iter()
        .find(|b| b.kind == query.kind)
        .cloned()
        .ok_or_else(|| ApiError::not_found(format!("no {:?} bracket", query.kind)))?;

    let mut matches: Vec<Match> = data
        .matches
        .iter()
        .filter(|m| m.kind == query.kind && m.bracket.is_some())
        .cloned()
        .collect();
    matches.sort_by_key(|m| m.bracket.map(|s| (s.round, s.position)));

    Ok(Json(BracketDto { bracket, matches }))
}

pub async fn bracket_seed_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Json(request): Json<SeedRequest>,
) -> ApiResult<impl IntoResponse> {
    caller.require_admin()?;

    let mut data = state.write_as(&caller).await?;

    let created = Bracket::seed(
        &mut data,
        request.kind,
        &request.team_ids,
        request.date,
        request.time,
        request.venue_id,
    )?;
    state.persist(&data);

    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn bracket_advance_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(match_id): Path<u32>,
    Json(request): Json<AdvanceRequest>,
) -> ApiResult<Json<Advancement>> {
    caller.require_admin()?;

    let next_kickoff = match (request.next_date, request.next_time) {
        (Some(date), Some(time)) => Some((date, time)),
        (None, None) => None,
        _ => {
            return Err(ApiError::bad_request(
                "next_date and next_time must be given together",
            ));
        }
    };

    let mut data = state.write_as(&caller).await?;

    let advancement = Bracket::advance_winner(&mut data, match_id, request.winner_team_id, next_kickoff)?;
    state.persist(&data);

    Ok(Json(advancement))
}
