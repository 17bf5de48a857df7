pub mod routes;

use crate::{ApiResult, Caller, LeagueAppData};
use axum::extract::{Query, State};
use axum::{Json, Router};
use league_core::finance::{MatchCostSync, SyncReport};
use league_core::schedule::{generate_schedule, GeneratedSchedule, ScheduleImport, ScheduleRequest};
use league_core::utils::TimeEstimation;
use log::info;
use serde::{Deserialize, Serialize};

pub fn function_routes() -> Router<LeagueAppData> {
    routes::routes()
}

#[derive(Deserialize, Default)]
pub struct GenerateQuery {
    #[serde(default)]
    pub persist: bool,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    #[serde(flatten)]
    pub schedule: GeneratedSchedule,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub persisted_match_ids: Vec<u32>,
}

pub async fn generate_schedule_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Query(query): Query<GenerateQuery>,
    Json(mut request): Json<ScheduleRequest>,
) -> ApiResult<Json<GenerateResponse>> {
    caller.require_admin()?;

    if request.vacation_periods.is_empty() {
        let data = state.data.read().await;
        request.vacation_periods = data.vacation_periods.clone();
    }

    // no lock is held while the assistant runs
    let schedule = generate_schedule(&request, state.assistant.as_ref()).await;

    info!(
        "schedule: {} matches for {}, confidence {}",
        schedule.matches.len(),
        request.config.competition_name,
        schedule.confidence_score
    );

    let mut persisted_match_ids = Vec::new();

    if query.persist && !schedule.matches.is_empty() {
        let mut data = state.write_as(&caller).await?;

        let created = ScheduleImport::persist(&mut data, &request, &schedule)?;
        persisted_match_ids = created.iter().map(|m| m.id).collect();

        state.persist(&data);
    }

    Ok(Json(GenerateResponse {
        schedule,
        persisted_match_ids,
    }))
}

pub async fn sync_match_costs_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
) -> ApiResult<Json<SyncReport>> {
    caller.require_admin()?;

    let mut data = state.write_as(&caller).await?;

    let (report, elapsed) = TimeEstimation::estimate(|| MatchCostSync::run(&mut data));
    let report = report?;

    state.persist(&data);

    info!("cost sync finished in {} ms", elapsed);

    Ok(Json(report))
}
