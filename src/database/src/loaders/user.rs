use league_core::user::UserRole;
use serde::Deserialize;

const STATIC_USERS_JSON: &str = include_str!("../data/users.json");

#[derive(Debug, Deserialize)]
pub struct UserEntity {
    pub id: u32,
    pub username: String,
    pub email: Option<String>,
    pub role: UserRole,
    #[serde(default)]
    pub team_ids: Vec<u32>,
}

pub struct UserLoader;

impl UserLoader {
    pub fn load() -> Result<Vec<UserEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_USERS_JSON)
    }
}
