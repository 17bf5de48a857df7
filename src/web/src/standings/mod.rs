use crate::LeagueAppData;
use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use league_core::standings::{LeagueTable, LeagueTableRow};

pub fn standings_routes() -> Router<LeagueAppData> {
    Router::new().route("/api/standings", get(standings_action))
}

pub async fn standings_action(State(state): State<LeagueAppData>) -> Json<Vec<LeagueTableRow>> {
    let data = state.data.read().await;

    Json(LeagueTable::build(&data.teams, &data.matches))
}
