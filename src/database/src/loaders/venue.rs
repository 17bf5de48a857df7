use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::Deserialize;

const STATIC_VENUES_JSON: &str = include_str!("../data/venues.json");
const STATIC_VACATIONS_JSON: &str = include_str!("../data/vacation_periods.json");

#[derive(Debug, Deserialize)]
pub struct VenueEntity {
    pub id: u32,
    pub name: String,
    pub address: Option<String>,
    #[serde(default)]
    pub timeslots: Vec<TimeslotEntity>,
}

#[derive(Debug, Deserialize)]
pub struct TimeslotEntity {
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub priority: u8,
}

#[derive(Debug, Deserialize)]
pub struct VacationPeriodEntity {
    pub id: u32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

pub struct VenueLoader;

impl VenueLoader {
    pub fn load() -> Result<Vec<VenueEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_VENUES_JSON)
    }

    pub fn load_vacation_periods() -> Result<Vec<VacationPeriodEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_VACATIONS_JSON)
    }
}
