use crate::shared::Money;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: u32,
    pub name: String,
    #[serde(rename = "balance_cents")]
    pub balance: Money,
    #[serde(default)]
    pub contact: TeamContact,
    #[serde(default)]
    pub colors: TeamColors,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Team {
    pub fn new(id: u32, name: String) -> Self {
        Team {
            id,
            name,
            balance: Money::ZERO,
            contact: TeamContact::default(),
            colors: TeamColors::default(),
            is_active: true,
        }
    }

    pub fn is_in_debt(&self) -> bool {
        self.balance.is_negative()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeamContact {
    pub person: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamColors {
    pub primary: String,
    pub secondary: String,
}

impl Default for TeamColors {
    fn default() -> Self {
        TeamColors {
            primary: String::from("#1f2937"),
            secondary: String::from("#ffffff"),
        }
    }
}

/// Fields a manager or admin may change on an existing team.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamUpdate {
    pub name: Option<String>,
    pub contact: Option<TeamContact>,
    pub colors: Option<TeamColors>,
    pub is_active: Option<bool>,
}

impl TeamUpdate {
    /// Only contact details and colors; name and status are admin fields.
    pub fn is_manager_editable(&self) -> bool {
        self.name.is_none() && self.is_active.is_none()
    }

    pub fn apply(self, team: &mut Team) {
        if let Some(name) = self.name {
            team.name = name;
        }
        if let Some(contact) = self.contact {
            team.contact = contact;
        }
        if let Some(colors) = self.colors {
            team.colors = colors;
        }
        if let Some(is_active) = self.is_active {
            team.is_active = is_active;
        }
    }
}
