use crate::r#match::{Match, MatchKind};
use crate::team::Team;
use itertools::Itertools;
use serde::Serialize;
use std::collections::HashMap;

const POINTS_WIN: u16 = 3;
const POINTS_DRAW: u16 = 1;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueTableRow {
    pub team_id: u32,
    pub team_name: String,
    pub played: u16,
    pub won: u16,
    pub drawn: u16,
    pub lost: u16,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u16,
}

impl LeagueTableRow {
    fn new(team: &Team) -> Self {
        LeagueTableRow {
            team_id: team.id,
            team_name: team.name.clone(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            points: 0,
        }
    }

    pub fn goal_difference(&self) -> i64 {
        self.goals_for as i64 - self.goals_against as i64
    }

    fn record(&mut self, scored: u8, conceded: u8) {
        self.played += 1;
        self.goals_for += scored as u32;
        self.goals_against += conceded as u32;

        if scored > conceded {
            self.won += 1;
            self.points += POINTS_WIN;
        } else if scored == conceded {
            self.drawn += 1;
            self.points += POINTS_DRAW;
        } else {
            self.lost += 1;
        }
    }
}

pub struct LeagueTable;

impl LeagueTable {
    /// Rows for every active team, ranked on points, goal difference, goals scored and name.
    pub fn build(teams: &[Team], matches: &[Match]) -> Vec<LeagueTableRow> {
        let mut rows: HashMap<u32, LeagueTableRow> = teams
            .iter()
            .filter(|t| t.is_active)
            .map(|t| (t.id, LeagueTableRow::new(t)))
            .collect();

        for m in matches
            .iter()
            .filter(|m| m.kind == MatchKind::League && m.is_completed())
        {
            let (Some(home), Some(away)) = (m.home_score, m.away_score) else {
                continue;
            };

            if let Some(row) = rows.get_mut(&m.home_team_id) {
                row.record(home, away);
            }
            if let Some(row) = rows.get_mut(&m.away_team_id) {
                row.record(away, home);
            }
        }

        rows.into_values()
            .sorted_by(|a, b| {
                b.points
                    .cmp(&a.points)
                    .then_with(|| b.goal_difference().cmp(&a.goal_difference()))
                    .then_with(|| b.goals_for.cmp(&a.goals_for))
                    .then_with(|| a.team_name.cmp(&b.team_name))
            })
            .collect()
    }
}
