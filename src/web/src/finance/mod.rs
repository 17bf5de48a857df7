pub mod routes;

use crate::{ApiError, ApiResult, Caller, LeagueAppData};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use league_core::finance::{
    CostSetting, CostSettingDraft, Ledger, MonthlyReport, MonthlyReportBucket, ReportFilter,
    TeamFinancialSummary, TeamTransaction, TransactionDraft,
};
use log::info;

pub fn finance_routes() -> Router<LeagueAppData> {
    routes::routes()
}

pub async fn cost_setting_list_action(State(state): State<LeagueAppData>) -> Json<Vec<CostSetting>> {
    let data = state.data.read().await;

    Json(data.cost_settings.clone())
}

pub async fn cost_setting_create_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Json(draft): Json<CostSettingDraft>,
) -> ApiResult<impl IntoResponse> {
    caller.require_admin()?;
    draft.validate()?;

    let mut data = state.write_as(&caller).await?;

    let setting = draft.into_setting(data.allocate_id());
    data.cost_settings.push(setting.clone());
    state.persist(&data);

    info!("cost setting created: {} {}", setting.name, setting.amount);

    Ok((StatusCode::CREATED, Json(setting)))
}

/// Tariff changes reach existing ledger rows on the next cost sync.
pub async fn cost_setting_update_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(setting_id): Path<u32>,
    Json(draft): Json<CostSettingDraft>,
) -> ApiResult<Json<CostSetting>> {
    caller.require_admin()?;
    draft.validate()?;

    let mut data = state.write_as(&caller).await?;

    let setting = data
        .cost_settings
        .iter_mut()
        .find(|c| c.id == setting_id)
        .ok_or_else(|| ApiError::not_found(format!("cost setting {} not found", setting_id)))?;

    *setting = draft.into_setting(setting_id);
    let setting = setting.clone();

    state.persist(&data);

    Ok(Json(setting))
}

pub async fn cost_setting_delete_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(setting_id): Path<u32>,
) -> ApiResult<StatusCode> {
    caller.require_admin()?;

    let mut data = state.write_as(&caller).await?;

    if data.transactions.iter().any(|t| t.cost_setting_id == Some(setting_id)) {
        return Err(ApiError::conflict(
            "cost setting is used by transactions, deactivate it instead",
        ));
    }

    let index = data
        .cost_settings
        .iter()
        .position(|c| c.id == setting_id)
        .ok_or_else(|| ApiError::not_found(format!("cost setting {} not found", setting_id)))?;

    data.cost_settings.remove(index);
    state.persist(&data);

    Ok(StatusCode::NO_CONTENT)
}

pub async fn transaction_create_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Json(draft): Json<TransactionDraft>,
) -> ApiResult<impl IntoResponse> {
    caller.require_admin()?;

    let mut data = state.write_as(&caller).await?;

    let transaction = Ledger::record(&mut data, draft)?;
    state.persist(&data);

    Ok((StatusCode::CREATED, Json(transaction)))
}

pub async fn transaction_delete_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(transaction_id): Path<u32>,
) -> ApiResult<StatusCode> {
    caller.require_admin()?;

    let mut data = state.write_as(&caller).await?;

    let transaction = Ledger::delete(&mut data, transaction_id)?;
    state.persist(&data);

    info!(
        "transaction {} removed from team {}",
        transaction.id, transaction.team_id
    );

    Ok(StatusCode::NO_CONTENT)
}

pub async fn team_transactions_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(team_id): Path<u32>,
) -> ApiResult<Json<Vec<TeamTransaction>>> {
    caller.require(caller.scope().can_view_team_finances(team_id))?;

    let data = state.data.read().await;
    data.require_team(team_id)?;

    let mut transactions: Vec<TeamTransaction> =
        data.team_transactions(team_id).into_iter().cloned().collect();
    transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));

    Ok(Json(transactions))
}

pub async fn team_finances_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(team_id): Path<u32>,
) -> ApiResult<Json<TeamFinancialSummary>> {
    caller.require(caller.scope().can_view_team_finances(team_id))?;

    let data = state.data.read().await;
    let team = data.require_team(team_id)?;

    Ok(Json(TeamFinancialSummary::build(
        team,
        &data.transactions,
        &data.cost_settings,
    )))
}

pub async fn monthly_report_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Query(filter): Query<ReportFilter>,
) -> ApiResult<Json<Vec<MonthlyReportBucket>>> {
    caller.require_admin()?;

    let data = state.data.read().await;

    Ok(Json(MonthlyReport::build(
        &data.transactions,
        &data.cost_settings,
        &filter,
    )))
}
