use crate::data::LeagueData;
use crate::error::{LeagueError, LeagueResult};
use crate::r#match::{BracketSlot, Match, MatchKind};
use chrono::{Duration, NaiveDate, NaiveTime};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const DAYS_BETWEEN_ROUNDS: i64 = 7;

/// A team that reached `round` at team position `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketEntry {
    pub round: u8,
    pub position: u16,
    pub team_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CupBracket {
    pub kind: MatchKind,
    pub size: u16,
    pub rounds: u8,
    pub entries: Vec<BracketEntry>,
    pub champion: Option<u32>,
}

impl CupBracket {
    pub fn entry(&self, round: u8, position: u16) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.round == round && e.position == position)
            .map(|e| e.team_id)
    }

    pub fn is_final(&self, slot: BracketSlot) -> bool {
        slot.round == self.rounds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BracketPairing {
    pub slot: BracketSlot,
    pub home: u32,
    /// `None` is a bye: the home team goes through to round two.
    pub away: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketPlan {
    pub size: u16,
    pub rounds: u8,
    pub pairings: Vec<BracketPairing>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Advancement {
    NextMatch { fixture: Match },
    Waiting { round: u8, position: u16 },
    Champion { team_id: u32 },
}

/// Single elimination. Teams are seeded in the order given; the top seeds get the byes.
pub struct Bracket;

impl Bracket {
    /// Seed numbers (1-based) in bracket order, so seeds 1 and 2 can only meet in the final.
    pub fn seeding_order(size: usize) -> Vec<usize> {
        let mut order = vec![1];

        while order.len() < size {
            let next_len = order.len() * 2;
            order = order
                .iter()
                .flat_map(|&seed| [seed, next_len + 1 - seed])
                .collect();
        }

        order
    }

    pub fn plan(team_ids: &[u32]) -> LeagueResult<BracketPlan> {
        if team_ids.len() < 2 {
            return Err(LeagueError::Bracket(String::from("at least two teams are required")));
        }

        let distinct: HashSet<&u32> = team_ids.iter().collect();
        if distinct.len() != team_ids.len() {
            return Err(LeagueError::Bracket(String::from("a team is seeded twice")));
        }

        let size = team_ids.len().next_power_of_two();
        let rounds = size.trailing_zeros() as u8;
        let order = Self::seeding_order(size);

        let pairings = order
            .chunks(2)
            .enumerate()
            .map(|(position, seeds)| BracketPairing {
                slot: BracketSlot::new(1, position as u16),
                home: team_ids[seeds[0] - 1],
                away: team_ids.get(seeds[1] - 1).copied(),
            })
            .collect();

        Ok(BracketPlan {
            size: size as u16,
            rounds,
            pairings,
        })
    }

    pub fn seed(
        data: &mut LeagueData,
        kind: MatchKind,
        team_ids: &[u32],
        date: NaiveDate,
        time: NaiveTime,
        venue_id: Option<u32>,
    ) -> LeagueResult<Vec<Match>> {
        if !kind.is_knockout() {
            return Err(LeagueError::Bracket(String::from("league matches have no bracket")));
        }
        if data.brackets.iter().any(|b| b.kind == kind) {
            return Err(LeagueError::Bracket(format!("a {:?} bracket already exists", kind)));
        }
        for team_id in team_ids {
            data.require_team(*team_id)?;
        }

        let plan = Self::plan(team_ids)?;

        let mut bracket = CupBracket {
            kind,
            size: plan.size,
            rounds: plan.rounds,
            entries: Vec::new(),
            champion: None,
        };

        let mut created = Vec::new();

        for pairing in &plan.pairings {
            match pairing.away {
                Some(away) => {
                    let mut fixture = Match::new(data.allocate_id(), pairing.home, away, date, time);
                    fixture.kind = kind;
                    fixture.venue_id = venue_id;
                    fixture.matchday = Some(1);
                    fixture.bracket = Some(pairing.slot);
                    created.push(fixture);
                }
                None => {
                    debug!("bracket: team {} has a bye", pairing.home);
                    bracket.entries.push(BracketEntry {
                        round: 2,
                        position: pairing.slot.position,
                        team_id: pairing.home,
                    });
                }
            }
        }

        data.matches.extend(created.iter().cloned());
        data.brackets.push(bracket);
        let index = data.brackets.len() - 1;

        let second_round_date = date + Duration::days(DAYS_BETWEEN_ROUNDS);
        for position in 0..plan.size / 4 {
            if let Some(fixture) =
                Self::create_ready_match(data, index, 2, position, second_round_date, time, venue_id)
            {
                created.push(fixture);
            }
        }

        info!(
            "bracket: seeded {:?} with {} teams, {} rounds, {} matches",
            kind,
            team_ids.len(),
            plan.rounds,
            created.len()
        );

        Ok(created)
    }

    /// Admin picks the winner; the score only has to agree when it is decisive.
    pub fn advance_winner(
        data: &mut LeagueData,
        match_id: u32,
        winner_team_id: u32,
        next_kickoff: Option<(NaiveDate, NaiveTime)>,
    ) -> LeagueResult<Advancement> {
        let fixture = data.require_fixture(match_id)?.clone();

        if !fixture.kind.is_knockout() {
            return Err(LeagueError::Bracket(String::from("not a knockout match")));
        }
        let slot = fixture
            .bracket
            .ok_or_else(|| LeagueError::Bracket(String::from("match has no bracket slot")))?;

        if !fixture.involves(winner_team_id) {
            return Err(LeagueError::validation("winner must be one of the two teams"));
        }
        if fixture.winner().is_some_and(|by_score| by_score != winner_team_id) {
            return Err(LeagueError::validation("winner contradicts the submitted score"));
        }

        let index = data
            .brackets
            .iter()
            .position(|b| b.kind == fixture.kind)
            .ok_or_else(|| LeagueError::Bracket(String::from("bracket not found")))?;

        let bracket = &mut data.brackets[index];
        let is_final = bracket.is_final(slot);

        let already_advanced = if is_final {
            bracket.champion.is_some()
        } else {
            bracket.entry(slot.round + 1, slot.position).is_some()
        };
        if already_advanced {
            return Err(LeagueError::Bracket(String::from("winner already advanced")));
        }

        if is_final {
            bracket.champion = Some(winner_team_id);
        } else {
            bracket.entries.push(BracketEntry {
                round: slot.round + 1,
                position: slot.position,
                team_id: winner_team_id,
            });
        }

        if let Some(m) = data.fixture_mut(match_id) {
            m.is_locked = true;
        }

        if is_final {
            info!("bracket: {:?} won by team {}", fixture.kind, winner_team_id);
            return Ok(Advancement::Champion {
                team_id: winner_team_id,
            });
        }

        let next = slot.next();
        let (date, time) = next_kickoff
            .unwrap_or((fixture.date + Duration::days(DAYS_BETWEEN_ROUNDS), fixture.time));

        Ok(
            match Self::create_ready_match(data, index, next.round, next.position, date, time, fixture.venue_id) {
                Some(next_fixture) => Advancement::NextMatch {
                    fixture: next_fixture,
                },
                None => Advancement::Waiting {
                    round: next.round,
                    position: next.position,
                },
            },
        )
    }

    /// Creates the match at `(round, position)` once both feeding teams are known.
    fn create_ready_match(
        data: &mut LeagueData,
        bracket_index: usize,
        round: u8,
        position: u16,
        date: NaiveDate,
        time: NaiveTime,
        venue_id: Option<u32>,
    ) -> Option<Match> {
        let bracket = &data.brackets[bracket_index];
        let kind = bracket.kind;
        let slot = BracketSlot::new(round, position);

        let home = bracket.entry(round, position * 2)?;
        let away = bracket.entry(round, position * 2 + 1)?;

        if data
            .matches
            .iter()
            .any(|m| m.kind == kind && m.bracket == Some(slot))
        {
            return None;
        }

        let mut fixture = Match::new(data.allocate_id(), home, away, date, time);
        fixture.kind = kind;
        fixture.venue_id = venue_id;
        fixture.matchday = Some(round as u16);
        fixture.bracket = Some(slot);

        debug!("bracket: round {} match {} created: {} vs {}", round, position, home, away);

        data.matches.push(fixture.clone());

        Some(fixture)
    }
}
