use crate::finance::{CostSetting, ReportCategory, TeamTransaction};
use crate::shared::Money;
use crate::team::Team;
use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamFinancialSummary {
    pub team_id: u32,
    pub team_name: String,
    #[serde(rename = "balance_cents")]
    pub balance: Money,
    pub in_debt: bool,
    #[serde(rename = "total_deposits_cents")]
    pub total_deposits: Money,
    #[serde(rename = "total_costs_cents")]
    pub total_costs: Money,
    #[serde(rename = "costs_by_category_cents")]
    pub costs_by_category: BTreeMap<ReportCategory, Money>,
    pub transaction_count: usize,
    pub last_transaction_date: Option<NaiveDate>,
}

impl TeamFinancialSummary {
    pub fn build<'a, I>(team: &Team, transactions: I, settings: &[CostSetting]) -> Self
    where
        I: IntoIterator<Item = &'a TeamTransaction>,
    {
        let own: Vec<&TeamTransaction> = transactions
            .into_iter()
            .filter(|t| t.team_id == team.id)
            .collect();

        let (credits, debits): (Vec<&TeamTransaction>, Vec<&TeamTransaction>) =
            own.iter().copied().partition(|t| t.kind.is_credit());

        let costs_by_category = debits
            .iter()
            .map(|t| (ReportCategory::of(t, settings), t.amount))
            .into_grouping_map()
            .sum();

        TeamFinancialSummary {
            team_id: team.id,
            team_name: team.name.clone(),
            balance: team.balance,
            in_debt: team.is_in_debt(),
            total_deposits: credits.iter().map(|t| t.amount).sum(),
            total_costs: debits.iter().map(|t| t.amount).sum(),
            costs_by_category: costs_by_category.into_iter().collect(),
            transaction_count: own.len(),
            last_transaction_date: own.iter().map(|t| t.date).max(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::TransactionType;

    fn tx(id: u32, team_id: u32, kind: TransactionType, cents: i64, day: u32) -> TeamTransaction {
        TeamTransaction {
            id,
            team_id,
            kind,
            amount: Money::from_cents(cents),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(2024, 9, day).unwrap(),
            cost_setting_id: None,
            match_id: None,
            recorded_by: None,
        }
    }

    #[test]
    fn test_summary_splits_credits_and_debits() {
        let mut team = Team::new(1, String::from("VV Noord"));
        team.balance = Money::from_cents(4000);

        let transactions = vec![
            tx(1, 1, TransactionType::Deposit, 10000, 1),
            tx(2, 1, TransactionType::MatchCost, 4500, 7),
            tx(3, 1, TransactionType::Penalty, 1500, 21),
            tx(4, 2, TransactionType::Penalty, 9900, 28),
        ];

        let summary = TeamFinancialSummary::build(&team, &transactions, &[]);

        assert_eq!(summary.total_deposits, Money::from_cents(10000));
        assert_eq!(summary.total_costs, Money::from_cents(6000));
        assert_eq!(summary.transaction_count, 3);
        assert_eq!(summary.last_transaction_date, NaiveDate::from_ymd_opt(2024, 9, 21));
        assert_eq!(summary.costs_by_category[&ReportCategory::Penalties], Money::from_cents(1500));
        assert!(!summary.costs_by_category.contains_key(&ReportCategory::Deposits));
    }
}
