use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueTimeslot {
    pub id: u32,
    pub venue_id: u32,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default)]
    pub priority: u8,
}

impl VenueTimeslot {
    pub fn covers(&self, day: Weekday, time: NaiveTime) -> bool {
        self.day_of_week == day && self.start_time <= time && time < self.end_time
    }
}
