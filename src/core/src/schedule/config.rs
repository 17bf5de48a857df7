use crate::r#match::{BracketSlot, MatchKind};
use crate::venue::VacationPeriod;
use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionType {
    #[default]
    League,
    Playoff,
    Cup,
}

impl CompetitionType {
    pub fn match_kind(&self) -> MatchKind {
        match self {
            CompetitionType::League => MatchKind::League,
            CompetitionType::Playoff => MatchKind::Playoff,
            CompetitionType::Cup => MatchKind::Cup,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiProvider {
    #[default]
    Local,
    Ollama,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleVenue {
    pub venue_id: u32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub competition_name: String,
    #[serde(default)]
    pub competition_type: CompetitionType,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub match_days: Vec<Weekday>,
    #[serde(default)]
    pub time_slots: Vec<NaiveTime>,
    #[serde(default)]
    pub venues: Vec<ScheduleVenue>,
    #[serde(default)]
    pub double_round: bool,
    /// Upper bound on matches per date; the slot count applies when absent.
    #[serde(default)]
    pub matches_per_matchday: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleTeam {
    pub team_id: u32,
    pub team_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamPreference {
    pub team_id: u32,
    #[serde(default)]
    pub preferred_day: Option<Weekday>,
    #[serde(default)]
    pub preferred_time: Option<NaiveTime>,
    #[serde(default)]
    pub preferred_venue_id: Option<u32>,
    #[serde(default)]
    pub unavailable_dates: Vec<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    pub config: ScheduleConfig,
    pub teams: Vec<ScheduleTeam>,
    #[serde(default)]
    pub team_preferences: Vec<TeamPreference>,
    #[serde(default)]
    pub vacation_periods: Vec<VacationPeriod>,
    #[serde(default)]
    pub ai_provider: AiProvider,
}

impl ScheduleRequest {
    pub fn team_ids(&self) -> Vec<u32> {
        self.teams.iter().map(|t| t.team_id).collect()
    }

    pub fn team_name(&self, team_id: u32) -> String {
        self.teams
            .iter()
            .find(|t| t.team_id == team_id)
            .map(|t| t.team_name.clone())
            .unwrap_or_else(|| format!("#{}", team_id))
    }

    pub fn preference(&self, team_id: u32) -> Option<&TeamPreference> {
        self.team_preferences.iter().find(|p| p.team_id == team_id)
    }

    pub fn venue_name(&self, venue_id: u32) -> Option<String> {
        self.config
            .venues
            .iter()
            .find(|v| v.venue_id == venue_id)
            .map(|v| v.name.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledMatch {
    pub home_team_id: u32,
    pub away_team_id: u32,
    #[serde(default)]
    pub home_team_name: String,
    #[serde(default)]
    pub away_team_name: String,
    pub match_date: NaiveDate,
    pub match_time: NaiveTime,
    #[serde(default)]
    pub venue_id: Option<u32>,
    #[serde(default)]
    pub venue_name: Option<String>,
    pub matchday: u16,
    #[serde(default)]
    pub bracket: Option<BracketSlot>,
}

impl ScheduledMatch {
    pub fn teams(&self) -> [u32; 2] {
        [self.home_team_id, self.away_team_id]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matchday {
    pub matchday: u16,
    pub date: NaiveDate,
    pub match_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSchedule {
    pub matches: Vec<ScheduledMatch>,
    #[serde(default)]
    pub matchdays: Vec<Matchday>,
    #[serde(default)]
    pub validation_notes: Vec<String>,
    #[serde(default)]
    pub confidence_score: u8,
}

impl GeneratedSchedule {
    pub fn rejected(notes: Vec<String>) -> Self {
        GeneratedSchedule {
            matches: Vec::new(),
            matchdays: Vec::new(),
            validation_notes: notes,
            confidence_score: 0,
        }
    }
}
