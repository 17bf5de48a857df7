use crate::r#match::Match;
use crate::user::{User, UserRole};
use serde::{Deserialize, Serialize};

/// Caller identity pushed to the data layer before each operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserContext {
    pub user_id: u32,
    pub role: UserRole,
    pub team_ids: Vec<u32>,
}

impl UserContext {
    pub fn from_user(user: &User) -> Self {
        let mut team_ids = user.team_ids.clone();
        team_ids.sort_unstable();
        team_ids.dedup();

        UserContext {
            user_id: user.id,
            role: user.role,
            team_ids,
        }
    }
}

/// Permission checks for an optional caller. `None` is a public visitor.
#[derive(Debug, Clone, Copy)]
pub struct AccessScope<'a> {
    context: Option<&'a UserContext>,
}

impl<'a> AccessScope<'a> {
    pub fn new(context: Option<&'a UserContext>) -> Self {
        AccessScope { context }
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(UserRole::Admin)
    }

    fn has_role(&self, role: UserRole) -> bool {
        self.context.is_some_and(|c| c.role == role)
    }

    pub fn user_id(&self) -> Option<u32> {
        self.context.map(|c| c.user_id)
    }

    pub fn can_manage_team(&self, team_id: u32) -> bool {
        match self.context {
            Some(c) if c.role == UserRole::Admin => true,
            Some(c) if c.role == UserRole::PlayerManager => c.team_ids.contains(&team_id),
            _ => false,
        }
    }

    pub fn can_view_team_finances(&self, team_id: u32) -> bool {
        self.can_manage_team(team_id)
    }

    /// Admins always; the assigned referee and either team's manager until the match is locked.
    pub fn can_submit_score(&self, fixture: &Match) -> bool {
        let Some(context) = self.context else {
            return false;
        };

        match context.role {
            UserRole::Admin => true,
            _ if fixture.is_locked => false,
            UserRole::Referee => fixture.referee_id == Some(context.user_id),
            UserRole::PlayerManager => fixture
                .teams()
                .iter()
                .any(|team_id| context.team_ids.contains(team_id)),
        }
    }

    pub fn can_edit_match(&self, fixture: &Match) -> bool {
        self.is_admin() || (!fixture.is_locked && self.can_submit_score(fixture))
    }
}
