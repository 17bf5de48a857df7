use crate::LeagueAppData;
use axum::routing::{get, put};
use axum::Router;

pub fn routes() -> Router<LeagueAppData> {
    Router::new()
        .route("/api/me", get(super::me_action))
        .route(
            "/api/users",
            get(super::user_list_action).post(super::user_create_action),
        )
        .route(
            "/api/users/{user_id}",
            put(super::user_update_action).delete(super::user_delete_action),
        )
}
