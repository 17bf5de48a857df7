use crate::LeagueAppData;
use axum::routing::post;
use axum::Router;

pub fn routes() -> Router<LeagueAppData> {
    Router::new()
        .route(
            "/functions/generate-competition-schedule",
            post(super::generate_schedule_action),
        )
        .route("/functions/sync-all-match-costs", post(super::sync_match_costs_action))
}
