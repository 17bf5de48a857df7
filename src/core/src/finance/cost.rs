use crate::error::{LeagueError, LeagueResult};
use crate::shared::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    MatchCost,
    Penalty,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSetting {
    pub id: u32,
    pub name: String,
    #[serde(rename = "amount_cents")]
    pub amount: Money,
    pub category: CostCategory,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl CostSetting {
    /// Active match costs are charged to both teams of every completed match.
    pub fn is_charged_per_match(&self) -> bool {
        self.is_active && self.category == CostCategory::MatchCost
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CostSettingDraft {
    pub name: String,
    #[serde(rename = "amount_cents")]
    pub amount: Money,
    pub category: CostCategory,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl CostSettingDraft {
    pub fn validate(&self) -> LeagueResult<()> {
        if self.name.trim().is_empty() {
            return Err(LeagueError::validation("cost setting name must not be empty"));
        }
        if self.amount.is_negative() {
            return Err(LeagueError::validation("cost setting amount must not be negative"));
        }
        Ok(())
    }

    pub fn into_setting(self, id: u32) -> CostSetting {
        CostSetting {
            id,
            name: self.name,
            amount: self.amount,
            category: self.category,
            description: self.description,
            is_active: self.is_active,
        }
    }
}
