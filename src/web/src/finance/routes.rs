use crate::LeagueAppData;
use axum::routing::{delete, get, post, put};
use axum::Router;

pub fn routes() -> Router<LeagueAppData> {
    Router::new()
        .route(
            "/api/cost-settings",
            get(super::cost_setting_list_action).post(super::cost_setting_create_action),
        )
        .route(
            "/api/cost-settings/{setting_id}",
            put(super::cost_setting_update_action).delete(super::cost_setting_delete_action),
        )
        .route("/api/transactions", post(super::transaction_create_action))
        .route("/api/transactions/{transaction_id}", delete(super::transaction_delete_action))
        .route("/api/teams/{team_id}/transactions", get(super::team_transactions_action))
        .route("/api/teams/{team_id}/finances", get(super::team_finances_action))
        .route("/api/reports/monthly", get(super::monthly_report_action))
}
