use crate::common::default_handler::default_handler;
use crate::common::localize::localize_errors;
use crate::cup::cup_routes;
use crate::finance::finance_routes;
use crate::functions::function_routes;
use crate::notifications::notification_routes;
use crate::r#match::match_routes;
use crate::standings::standings_routes;
use crate::suspensions::suspension_routes;
use crate::teams::team_routes;
use crate::users::user_routes;
use crate::venues::venue_routes;
use crate::LeagueAppData;
use axum::extract::State;
use axum::middleware;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

async fn health_action(State(state): State<LeagueAppData>) -> impl IntoResponse {
    let data = state.data.read().await;

    Json(json!({
        "status": "ok",
        "teams": data.teams.len(),
        "matches": data.matches.len(),
    }))
}

pub struct ServerRoutes;

impl ServerRoutes {
    pub fn create(state: LeagueAppData) -> Router {
        Router::<LeagueAppData>::new()
            .route("/health", get(health_action))
            .merge(function_routes())
            .merge(team_routes())
            .merge(user_routes())
            .merge(match_routes())
            .merge(standings_routes())
            .merge(cup_routes())
            .merge(finance_routes())
            .merge(notification_routes())
            .merge(suspension_routes())
            .merge(venue_routes())
            .fallback(default_handler)
            .layer(middleware::from_fn_with_state(state.clone(), localize_errors))
            .with_state(state)
    }
}
