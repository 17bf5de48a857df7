use crate::access::UserContext;
use crate::error::{LeagueError, LeagueResult};
use crate::finance::{CostSetting, TeamTransaction};
use crate::notification::Notification;
use crate::r#match::Match;
use crate::schedule::CupBracket;
use crate::suspension::Suspension;
use crate::team::Team;
use crate::user::{User, UserRole};
use crate::venue::{VacationPeriod, Venue, VenueTimeslot};
use serde::{Deserialize, Serialize};

/// Whole league state. Every entity lives in one vector, ids come from one counter.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LeagueData {
    pub teams: Vec<Team>,
    pub users: Vec<User>,
    pub matches: Vec<Match>,
    pub cost_settings: Vec<CostSetting>,
    pub transactions: Vec<TeamTransaction>,
    pub notifications: Vec<Notification>,
    pub suspensions: Vec<Suspension>,
    pub venues: Vec<Venue>,
    pub timeslots: Vec<VenueTimeslot>,
    pub vacation_periods: Vec<VacationPeriod>,
    #[serde(default)]
    pub brackets: Vec<CupBracket>,

    #[serde(default)]
    next_id: u32,

    #[serde(skip)]
    session: Option<UserContext>,
}

impl LeagueData {
    pub fn new() -> Self {
        LeagueData {
            next_id: 1,
            ..Default::default()
        }
    }

    /// Moves the id counter past every stored id. Call after bulk loading.
    pub fn reindex(&mut self) {
        let max_id = self
            .teams
            .iter()
            .map(|t| t.id)
            .chain(self.users.iter().map(|u| u.id))
            .chain(self.matches.iter().map(|m| m.id))
            .chain(self.cost_settings.iter().map(|c| c.id))
            .chain(self.transactions.iter().map(|t| t.id))
            .chain(self.notifications.iter().map(|n| n.id))
            .chain(self.suspensions.iter().map(|s| s.id))
            .chain(self.venues.iter().map(|v| v.id))
            .chain(self.timeslots.iter().map(|t| t.id))
            .chain(self.vacation_periods.iter().map(|v| v.id))
            .max()
            .unwrap_or(0);

        self.next_id = self.next_id.max(max_id + 1);
    }

    pub fn allocate_id(&mut self) -> u32 {
        if self.next_id == 0 {
            self.reindex();
        }
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // ─── Session context ─────────────────────────────────────────────

    pub fn set_session(&mut self, context: Option<UserContext>) {
        self.session = context;
    }

    pub fn session(&self) -> Option<&UserContext> {
        self.session.as_ref()
    }

    pub fn session_user_id(&self) -> Option<u32> {
        self.session.as_ref().map(|s| s.user_id)
    }

    // ─── Lookups ─────────────────────────────────────────────────────

    pub fn team(&self, id: u32) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn team_mut(&mut self, id: u32) -> Option<&mut Team> {
        self.teams.iter_mut().find(|t| t.id == id)
    }

    pub fn require_team(&self, id: u32) -> LeagueResult<&Team> {
        self.team(id).ok_or_else(|| LeagueError::not_found("team", id))
    }

    pub fn user(&self, id: u32) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_mut(&mut self, id: u32) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub fn fixture(&self, id: u32) -> Option<&Match> {
        self.matches.iter().find(|m| m.id == id)
    }

    pub fn fixture_mut(&mut self, id: u32) -> Option<&mut Match> {
        self.matches.iter_mut().find(|m| m.id == id)
    }

    pub fn require_fixture(&self, id: u32) -> LeagueResult<&Match> {
        self.fixture(id).ok_or_else(|| LeagueError::not_found("match", id))
    }

    pub fn cost_setting(&self, id: u32) -> Option<&CostSetting> {
        self.cost_settings.iter().find(|c| c.id == id)
    }

    pub fn transaction(&self, id: u32) -> Option<&TeamTransaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn venue(&self, id: u32) -> Option<&Venue> {
        self.venues.iter().find(|v| v.id == id)
    }

    pub fn team_name(&self, id: u32) -> String {
        self.team(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| format!("#{}", id))
    }

    pub fn team_transactions(&self, team_id: u32) -> Vec<&TeamTransaction> {
        self.transactions
            .iter()
            .filter(|t| t.team_id == team_id)
            .collect()
    }

    // ─── Removal ─────────────────────────────────────────────────────

    /// Teams with fixtures or ledger rows are deactivated by the caller instead.
    pub fn remove_team(&mut self, id: u32) -> LeagueResult<Team> {
        self.require_team(id)?;

        if self.matches.iter().any(|m| m.involves(id)) {
            return Err(LeagueError::validation("team still has matches"));
        }
        if self.transactions.iter().any(|t| t.team_id == id) {
            return Err(LeagueError::validation("team still has transactions"));
        }
        if self
            .users
            .iter()
            .any(|u| u.role == UserRole::PlayerManager && u.team_ids.contains(&id) && u.team_ids.iter().all(|t| *t == id))
        {
            return Err(LeagueError::ManagerWithoutTeam);
        }

        for user in self.users.iter_mut() {
            user.team_ids.retain(|t| *t != id);
        }

        let index = self
            .teams
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LeagueError::not_found("team", id))?;

        Ok(self.teams.remove(index))
    }

    pub fn remove_match(&mut self, id: u32) -> LeagueResult<Match> {
        let fixture = self.require_fixture(id)?;
        if fixture.is_locked {
            return Err(LeagueError::Locked(id));
        }

        let index = self
            .matches
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| LeagueError::not_found("match", id))?;

        Ok(self.matches.remove(index))
    }
}
