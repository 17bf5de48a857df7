use crate::LeagueAppData;
use axum::routing::get;
use axum::Router;

pub fn routes() -> Router<LeagueAppData> {
    Router::new()
        .route(
            "/api/venues",
            get(super::venue_list_action).post(super::venue_create_action),
        )
        .route(
            "/api/venues/{venue_id}/timeslots",
            get(super::timeslot_list_action).post(super::timeslot_create_action),
        )
        .route(
            "/api/vacation-periods",
            get(super::vacation_list_action).post(super::vacation_create_action),
        )
}
