use crate::error::{LeagueError, LeagueResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Referee,
    PlayerManager,
}

impl UserRole {
    pub fn can_have_team(&self) -> bool {
        matches!(self, UserRole::PlayerManager)
    }
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            UserRole::Admin => "admin",
            UserRole::Referee => "referee",
            UserRole::PlayerManager => "player_manager",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub team_ids: Vec<u32>,
}

impl User {
    pub fn new(id: u32, username: String, role: UserRole, team_ids: Vec<u32>) -> Self {
        User {
            id,
            username,
            email: None,
            role,
            team_ids,
        }
    }

    pub fn validate(&self) -> LeagueResult<()> {
        if self.username.trim().is_empty() {
            return Err(LeagueError::validation("username must not be empty"));
        }

        match self.role {
            UserRole::Admin | UserRole::Referee if !self.team_ids.is_empty() => {
                Err(LeagueError::RoleCannotHaveTeam)
            }
            UserRole::PlayerManager if self.team_ids.is_empty() => {
                Err(LeagueError::ManagerWithoutTeam)
            }
            _ => Ok(()),
        }
    }

    pub fn manages_team(&self, team_id: u32) -> bool {
        self.role == UserRole::PlayerManager && self.team_ids.contains(&team_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserDraft {
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub team_ids: Vec<u32>,
}

impl UserDraft {
    pub fn into_user(self, id: u32) -> User {
        User {
            id,
            username: self.username,
            email: self.email,
            role: self.role,
            team_ids: self.team_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_with_team_is_rejected() {
        let user = User::new(1, String::from("jan"), UserRole::Admin, vec![3]);
        assert_eq!(user.validate(), Err(LeagueError::RoleCannotHaveTeam));
    }

    #[test]
    fn test_referee_with_team_is_rejected() {
        let user = User::new(1, String::from("piet"), UserRole::Referee, vec![3]);
        assert_eq!(user.validate(), Err(LeagueError::RoleCannotHaveTeam));
    }

    #[test]
    fn test_manager_requires_team() {
        let user = User::new(1, String::from("kees"), UserRole::PlayerManager, Vec::new());
        assert_eq!(user.validate(), Err(LeagueError::ManagerWithoutTeam));

        let user = User::new(1, String::from("kees"), UserRole::PlayerManager, vec![2]);
        assert!(user.validate().is_ok());
        assert!(user.manages_team(2));
        assert!(!user.manages_team(5));
    }

    #[test]
    fn test_role_serde_names() {
        let role: UserRole = serde_json::from_str("\"player_manager\"").unwrap();
        assert_eq!(role, UserRole::PlayerManager);
        assert_eq!(serde_json::to_string(&UserRole::Referee).unwrap(), "\"referee\"");
    }
}
