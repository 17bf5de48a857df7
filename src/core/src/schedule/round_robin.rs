use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Pairing {
    pub home: u32,
    pub away: u32,
}

impl Pairing {
    pub fn reversed(&self) -> Pairing {
        Pairing {
            home: self.away,
            away: self.home,
        }
    }

    pub fn contains(&self, team_id: u32) -> bool {
        self.home == team_id || self.away == team_id
    }

    /// Order-independent key: (lower id, higher id).
    pub fn key(&self) -> (u32, u32) {
        (self.home.min(self.away), self.home.max(self.away))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    pub number: u16,
    pub pairings: Vec<Pairing>,
    pub bye: Option<u32>,
}

/// Circle-method round robin. The first team stays fixed while the rest rotate.
pub struct RoundRobin;

impl RoundRobin {
    pub fn rounds(team_ids: &[u32], double_round: bool) -> Vec<Round> {
        if double_round {
            Self::double(team_ids)
        } else {
            Self::single(team_ids)
        }
    }

    pub fn single(team_ids: &[u32]) -> Vec<Round> {
        if team_ids.len() < 2 {
            return Vec::new();
        }

        let mut slots: Vec<Option<u32>> = team_ids.iter().copied().map(Some).collect();
        if slots.len() % 2 == 1 {
            slots.push(None);
        }

        let size = slots.len();
        let mut rounds = Vec::with_capacity(size - 1);

        for round in 0..size - 1 {
            let mut pairings = Vec::with_capacity(size / 2);
            let mut bye = None;

            for i in 0..size / 2 {
                match (slots[i], slots[size - 1 - i]) {
                    (Some(a), Some(b)) => {
                        let a_at_home = if i == 0 { round % 2 == 0 } else { i % 2 == 1 };
                        pairings.push(if a_at_home {
                            Pairing { home: a, away: b }
                        } else {
                            Pairing { home: b, away: a }
                        });
                    }
                    (Some(team), None) | (None, Some(team)) => bye = Some(team),
                    (None, None) => {}
                }
            }

            rounds.push(Round {
                number: round as u16 + 1,
                pairings,
                bye,
            });

            if let Some(last) = slots.pop() {
                slots.insert(1, last);
            }
        }

        rounds
    }

    /// Single round robin followed by its mirror with home and away swapped.
    pub fn double(team_ids: &[u32]) -> Vec<Round> {
        let first = Self::single(team_ids);
        let offset = first.len() as u16;

        let second: Vec<Round> = first
            .iter()
            .map(|round| Round {
                number: round.number + offset,
                pairings: round.pairings.iter().map(Pairing::reversed).collect(),
                bye: round.bye,
            })
            .collect();

        first.into_iter().chain(second).collect()
    }
}
