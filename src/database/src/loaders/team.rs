use serde::Deserialize;

const STATIC_TEAMS_JSON: &str = include_str!("../data/teams.json");

#[derive(Debug, Deserialize)]
pub struct TeamEntity {
    pub id: u32,
    pub name: String,
    pub contact_person: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
    #[serde(default)]
    pub opening_balance_cents: i64,
}

pub struct TeamLoader;

impl TeamLoader {
    pub fn load() -> Result<Vec<TeamEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_TEAMS_JSON)
    }
}
