use crate::error::{LeagueError, LeagueResult};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    #[default]
    League,
    Playoff,
    Cup,
}

impl MatchKind {
    pub fn is_knockout(&self) -> bool {
        matches!(self, MatchKind::Playoff | MatchKind::Cup)
    }
}

/// Position of a knockout match inside its bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BracketSlot {
    pub round: u8,
    pub position: u16,
}

impl BracketSlot {
    pub fn new(round: u8, position: u16) -> Self {
        BracketSlot { round, position }
    }

    pub fn next(&self) -> BracketSlot {
        BracketSlot {
            round: self.round + 1,
            position: self.position / 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: u32,
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub home_score: Option<u8>,
    pub away_score: Option<u8>,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub venue_id: Option<u32>,
    pub referee_id: Option<u32>,
    pub matchday: Option<u16>,
    #[serde(default)]
    pub kind: MatchKind,
    #[serde(default)]
    pub is_submitted: bool,
    #[serde(default)]
    pub is_locked: bool,
    #[serde(default)]
    pub bracket: Option<BracketSlot>,
}

impl Match {
    pub fn new(
        id: u32,
        home_team_id: u32,
        away_team_id: u32,
        date: NaiveDate,
        time: NaiveTime,
    ) -> Self {
        Match {
            id,
            home_team_id,
            away_team_id,
            home_score: None,
            away_score: None,
            date,
            time,
            venue_id: None,
            referee_id: None,
            matchday: None,
            kind: MatchKind::League,
            is_submitted: false,
            is_locked: false,
            bracket: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.is_submitted && self.home_score.is_some() && self.away_score.is_some()
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub fn teams(&self) -> [u32; 2] {
        [self.home_team_id, self.away_team_id]
    }

    /// Winner by score. `None` for draws and unplayed matches.
    pub fn winner(&self) -> Option<u32> {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) if home > away => Some(self.home_team_id),
            (Some(home), Some(away)) if away > home => Some(self.away_team_id),
            _ => None,
        }
    }

    pub fn submit_score(&mut self, home_score: u8, away_score: u8) -> LeagueResult<()> {
        if self.is_locked {
            return Err(LeagueError::Locked(self.id));
        }

        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self.is_submitted = true;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchDraft {
    pub home_team_id: u32,
    pub away_team_id: u32,
    pub date: NaiveDate,
    pub time: NaiveTime,
    #[serde(default)]
    pub venue_id: Option<u32>,
    #[serde(default)]
    pub referee_id: Option<u32>,
    #[serde(default)]
    pub matchday: Option<u16>,
    #[serde(default)]
    pub kind: MatchKind,
}

impl MatchDraft {
    pub fn validate(&self) -> LeagueResult<()> {
        if self.home_team_id == self.away_team_id {
            return Err(LeagueError::validation("a team cannot play against itself"));
        }
        Ok(())
    }

    pub fn into_match(self, id: u32) -> Match {
        Match {
            venue_id: self.venue_id,
            referee_id: self.referee_id,
            matchday: self.matchday,
            kind: self.kind,
            ..Match::new(id, self.home_team_id, self.away_team_id, self.date, self.time)
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchUpdate {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub venue_id: Option<u32>,
    pub referee_id: Option<u32>,
    pub matchday: Option<u16>,
}

impl MatchUpdate {
    pub fn apply(self, m: &mut Match) {
        if let Some(date) = self.date {
            m.date = date;
        }
        if let Some(time) = self.time {
            m.time = time;
        }
        if let Some(venue_id) = self.venue_id {
            m.venue_id = Some(venue_id);
        }
        if let Some(referee_id) = self.referee_id {
            m.referee_id = Some(referee_id);
        }
        if let Some(matchday) = self.matchday {
            m.matchday = Some(matchday);
        }
    }
}
