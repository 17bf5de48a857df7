use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeagueError {
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    #[error("admin and referee accounts cannot be linked to a team")]
    RoleCannotHaveTeam,

    #[error("a team manager must be linked to at least one team")]
    ManagerWithoutTeam,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("match {0} is locked")]
    Locked(u32),

    #[error("operation not permitted for this user")]
    Forbidden,

    #[error("bracket error: {0}")]
    Bracket(String),
}

impl LeagueError {
    pub fn not_found(entity: &'static str, id: u32) -> Self {
        LeagueError::NotFound { entity, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        LeagueError::Validation(message.into())
    }

    /// Stable key used to look up a translated message.
    pub fn message_key(&self) -> &'static str {
        match self {
            LeagueError::NotFound { .. } => "error.not_found",
            LeagueError::RoleCannotHaveTeam => "error.role_cannot_have_team",
            LeagueError::ManagerWithoutTeam => "error.manager_without_team",
            LeagueError::Validation(_) => "error.validation",
            LeagueError::Locked(_) => "error.match_locked",
            LeagueError::Forbidden => "error.forbidden",
            LeagueError::Bracket(_) => "error.bracket",
        }
    }
}

pub type LeagueResult<T> = Result<T, LeagueError>;
