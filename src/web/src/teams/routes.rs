use crate::LeagueAppData;
use axum::routing::get;
use axum::Router;

pub fn routes() -> Router<LeagueAppData> {
    Router::new()
        .route(
            "/api/teams",
            get(super::team_list_action).post(super::team_create_action),
        )
        .route(
            "/api/teams/{team_id}",
            get(super::team_get_action)
                .put(super::team_update_action)
                .delete(super::team_delete_action),
        )
}
