use crate::LeagueAppData;
use axum::routing::{get, post};
use axum::Router;

pub fn routes() -> Router<LeagueAppData> {
    Router::new()
        .route(
            "/api/matches",
            get(super::match_list_action).post(super::match_create_action),
        )
        .route(
            "/api/matches/{match_id}",
            get(super::match_get_action)
                .put(super::match_update_action)
                .delete(super::match_delete_action),
        )
        .route("/api/matches/{match_id}/score", post(super::match_score_action))
        .route("/api/matches/{match_id}/lock", post(super::match_lock_action))
        .route("/api/matches/{match_id}/unlock", post(super::match_unlock_action))
}
