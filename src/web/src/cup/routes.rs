use crate::LeagueAppData;
use axum::routing::{get, post};
use axum::Router;

pub fn routes() -> Router<LeagueAppData> {
    Router::new()
        .route("/api/cup/bracket", get(super::bracket_get_action))
        .route("/api/cup/seed", post(super::bracket_seed_action))
        .route("/api/cup/matches/{match_id}/advance", post(super::bracket_advance_action))
}
