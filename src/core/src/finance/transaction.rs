use crate::error::{LeagueError, LeagueResult};
use crate::shared::Money;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Deposit,
    MatchCost,
    Penalty,
    Adjustment,
}

impl TransactionType {
    pub fn is_credit(&self) -> bool {
        matches!(self, TransactionType::Deposit)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamTransaction {
    pub id: u32,
    pub team_id: u32,
    #[serde(rename = "transaction_type")]
    pub kind: TransactionType,
    #[serde(rename = "amount_cents")]
    pub amount: Money,
    pub description: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub cost_setting_id: Option<u32>,
    #[serde(default)]
    pub match_id: Option<u32>,
    #[serde(default)]
    pub recorded_by: Option<u32>,
}

impl TeamTransaction {
    /// Effect on the team balance: deposits add, everything else subtracts.
    pub fn signed_amount(&self) -> Money {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }

    pub fn is_for(&self, team_id: u32, match_id: u32, cost_setting_id: u32) -> bool {
        self.team_id == team_id
            && self.match_id == Some(match_id)
            && self.cost_setting_id == Some(cost_setting_id)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TransactionDraft {
    pub team_id: u32,
    #[serde(rename = "transaction_type")]
    pub kind: TransactionType,
    #[serde(rename = "amount_cents", default)]
    pub amount: Option<Money>,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub cost_setting_id: Option<u32>,
    #[serde(default)]
    pub match_id: Option<u32>,
}

impl TransactionDraft {
    pub fn validate(&self) -> LeagueResult<()> {
        if self.amount.is_none() && self.cost_setting_id.is_none() {
            return Err(LeagueError::validation(
                "either an amount or a cost setting is required",
            ));
        }
        if self.amount.is_some_and(|a| a.is_negative()) {
            return Err(LeagueError::validation("amount must not be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_amount() {
        let mut tx = TeamTransaction {
            id: 1,
            team_id: 1,
            kind: TransactionType::Deposit,
            amount: Money::from_cents(5000),
            description: String::from("Storting"),
            date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            cost_setting_id: None,
            match_id: None,
            recorded_by: None,
        };
        assert_eq!(tx.signed_amount(), Money::from_cents(5000));

        tx.kind = TransactionType::Penalty;
        assert_eq!(tx.signed_amount(), Money::from_cents(-5000));
    }

    #[test]
    fn test_draft_needs_amount_or_setting() {
        let draft = TransactionDraft {
            team_id: 1,
            kind: TransactionType::Adjustment,
            amount: None,
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 10, 1).unwrap(),
            cost_setting_id: None,
            match_id: None,
        };

        assert!(draft.validate().is_err());
    }
}
