use league_core::finance::CostCategory;
use serde::Deserialize;

const STATIC_COST_SETTINGS_JSON: &str = include_str!("../data/cost_settings.json");

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct CostSettingEntity {
    pub id: u32,
    pub name: String,
    pub amount_cents: i64,
    pub category: CostCategory,
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

pub struct CostSettingLoader;

impl CostSettingLoader {
    pub fn load() -> Result<Vec<CostSettingEntity>, serde_json::Error> {
        serde_json::from_str(STATIC_COST_SETTINGS_JSON)
    }
}
