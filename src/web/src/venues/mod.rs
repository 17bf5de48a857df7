pub mod routes;

use crate::{ApiError, ApiResult, Caller, LeagueAppData};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Json, Router};
use chrono::{NaiveDate, NaiveTime, Weekday};
use league_core::venue::{VacationPeriod, Venue, VenueTimeslot};
use serde::Deserialize;

pub fn venue_routes() -> Router<LeagueAppData> {
    routes::routes()
}

#[derive(Deserialize)]
pub struct VenueCreateRequest {
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Deserialize)]
pub struct TimeslotCreateRequest {
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub priority: u8,
}

#[derive(Deserialize)]
pub struct VacationCreateRequest {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub async fn venue_list_action(State(state): State<LeagueAppData>) -> Json<Vec<Venue>> {
    let data = state.data.read().await;

    Json(data.venues.clone())
}

pub async fn venue_create_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Json(request): Json<VenueCreateRequest>,
) -> ApiResult<impl IntoResponse> {
    caller.require_admin()?;

    if request.name.trim().is_empty() {
        return Err(ApiError::bad_request("venue name must not be empty"));
    }

    let mut data = state.write_as(&caller).await?;

    let venue = Venue {
        id: data.allocate_id(),
        name: request.name.trim().to_string(),
        address: request.address,
    };
    data.venues.push(venue.clone());
    state.persist(&data);

    Ok((StatusCode::CREATED, Json(venue)))
}

pub async fn timeslot_list_action(
    State(state): State<LeagueAppData>,
    Path(venue_id): Path<u32>,
) -> ApiResult<Json<Vec<VenueTimeslot>>> {
    let data = state.data.read().await;

    if data.venue(venue_id).is_none() {
        return Err(ApiError::not_found(format!("venue {} not found", venue_id)));
    }

    let mut slots: Vec<VenueTimeslot> = data
        .timeslots
        .iter()
        .filter(|t| t.venue_id == venue_id)
        .cloned()
        .collect();
    slots.sort_by_key(|t| (t.day_of_week.num_days_from_monday(), t.start_time, t.priority));

    Ok(Json(slots))
}

pub async fn timeslot_create_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Path(venue_id): Path<u32>,
    Json(request): Json<TimeslotCreateRequest>,
) -> ApiResult<impl IntoResponse> {
    caller.require_admin()?;

    if request.end_time <= request.start_time {
        return Err(ApiError::bad_request("timeslot must end after it starts"));
    }

    let mut data = state.write_as(&caller).await?;

    if data.venue(venue_id).is_none() {
        return Err(ApiError::not_found(format!("venue {} not found", venue_id)));
    }

    let overlaps = data.timeslots.iter().any(|t| {
        t.venue_id == venue_id
            && t.day_of_week == request.day_of_week
            && t.start_time < request.end_time
            && request.start_time < t.end_time
    });
    if overlaps {
        return Err(ApiError::conflict("timeslot overlaps an existing timeslot"));
    }

    let slot = VenueTimeslot {
        id: data.allocate_id(),
        venue_id,
        day_of_week: request.day_of_week,
        start_time: request.start_time,
        end_time: request.end_time,
        priority: request.priority,
    };
    data.timeslots.push(slot.clone());
    state.persist(&data);

    Ok((StatusCode::CREATED, Json(slot)))
}

pub async fn vacation_list_action(State(state): State<LeagueAppData>) -> Json<Vec<VacationPeriod>> {
    let data = state.data.read().await;

    let mut periods = data.vacation_periods.clone();
    periods.sort_by_key(|p| p.start_date);

    Json(periods)
}

pub async fn vacation_create_action(
    State(state): State<LeagueAppData>,
    caller: Caller,
    Json(request): Json<VacationCreateRequest>,
) -> ApiResult<impl IntoResponse> {
    caller.require_admin()?;

    if request.end_date < request.start_date {
        return Err(ApiError::bad_request("vacation period ends before it starts"));
    }

    let mut data = state.write_as(&caller).await?;

    let period = VacationPeriod {
        id: data.allocate_id(),
        name: request.name,
        start_date: request.start_date,
        end_date: request.end_date,
        is_active: true,
    };
    data.vacation_periods.push(period.clone());
    state.persist(&data);

    Ok((StatusCode::CREATED, Json(period)))
}
