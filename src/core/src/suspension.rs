use crate::r#match::Match;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suspension {
    pub id: u32,
    pub player_name: String,
    pub team_id: u32,
    pub reason: String,
    pub matches_count: u8,
    pub start_date: NaiveDate,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Suspension {
    /// Completed team matches on or after the start date count as served.
    pub fn served_matches<'a, I>(&self, matches: I) -> usize
    where
        I: IntoIterator<Item = &'a Match>,
    {
        matches
            .into_iter()
            .filter(|m| m.is_completed() && m.involves(self.team_id) && m.date >= self.start_date)
            .count()
    }

    pub fn remaining_matches<'a, I>(&self, matches: I) -> u8
    where
        I: IntoIterator<Item = &'a Match>,
    {
        let served = self.served_matches(matches).min(u8::MAX as usize) as u8;
        self.matches_count.saturating_sub(served)
    }

    pub fn is_in_force<'a, I>(&self, matches: I) -> bool
    where
        I: IntoIterator<Item = &'a Match>,
    {
        self.is_active && self.remaining_matches(matches) > 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuspensionStatus {
    #[serde(flatten)]
    pub suspension: Suspension,
    pub remaining_matches: u8,
    pub in_force: bool,
}

impl SuspensionStatus {
    pub fn of(suspension: &Suspension, matches: &[Match]) -> Self {
        let remaining_matches = suspension.remaining_matches(matches);

        SuspensionStatus {
            suspension: suspension.clone(),
            remaining_matches,
            in_force: suspension.is_active && remaining_matches > 0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SuspensionDraft {
    pub player_name: String,
    pub team_id: u32,
    pub reason: String,
    pub matches_count: u8,
    pub start_date: NaiveDate,
}

impl SuspensionDraft {
    pub fn into_suspension(self, id: u32) -> Suspension {
        Suspension {
            id,
            player_name: self.player_name,
            team_id: self.team_id,
            reason: self.reason,
            matches_count: self.matches_count,
            start_date: self.start_date,
            is_active: true,
        }
    }
}
