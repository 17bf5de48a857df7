use crate::finance::{CostCategory, CostSetting, TeamTransaction, TransactionType};
use crate::shared::{Money, YearMonth};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportCategory {
    Deposits,
    MatchCosts,
    Penalties,
    Other,
}

impl ReportCategory {
    pub fn of(transaction: &TeamTransaction, settings: &[CostSetting]) -> Self {
        match transaction.kind {
            TransactionType::Deposit => ReportCategory::Deposits,
            TransactionType::MatchCost => ReportCategory::MatchCosts,
            TransactionType::Penalty => ReportCategory::Penalties,
            TransactionType::Adjustment => {
                let category = transaction
                    .cost_setting_id
                    .and_then(|id| settings.iter().find(|s| s.id == id))
                    .map(|s| s.category);

                match category {
                    Some(CostCategory::MatchCost) => ReportCategory::MatchCosts,
                    Some(CostCategory::Penalty) => ReportCategory::Penalties,
                    _ => ReportCategory::Other,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportFilter {
    pub team_id: Option<u32>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ReportFilter {
    pub fn matches(&self, transaction: &TeamTransaction) -> bool {
        self.team_id.is_none_or(|id| transaction.team_id == id)
            && self.from.is_none_or(|from| transaction.date >= from)
            && self.to.is_none_or(|to| transaction.date <= to)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReportBucket {
    pub month: YearMonth,
    #[serde(rename = "categories_cents")]
    pub categories: BTreeMap<ReportCategory, Money>,
    /// Sum of the member amounts, regardless of direction.
    #[serde(rename = "total_cents")]
    pub total: Money,
    /// Credits minus debits.
    #[serde(rename = "net_cents")]
    pub net: Money,
    pub transaction_count: usize,
}

impl MonthlyReportBucket {
    fn new(month: YearMonth) -> Self {
        MonthlyReportBucket {
            month,
            categories: BTreeMap::new(),
            total: Money::ZERO,
            net: Money::ZERO,
            transaction_count: 0,
        }
    }

    fn push(&mut self, category: ReportCategory, transaction: &TeamTransaction) {
        *self.categories.entry(category).or_insert(Money::ZERO) += transaction.amount;
        self.total += transaction.amount;
        self.net += transaction.signed_amount();
        self.transaction_count += 1;
    }
}

pub struct MonthlyReport;

impl MonthlyReport {
    /// One bucket per calendar month that has at least one transaction, oldest first.
    pub fn build<'a, I>(transactions: I, settings: &[CostSetting], filter: &ReportFilter) -> Vec<MonthlyReportBucket>
    where
        I: IntoIterator<Item = &'a TeamTransaction>,
    {
        let mut buckets: BTreeMap<YearMonth, MonthlyReportBucket> = BTreeMap::new();

        for transaction in transactions.into_iter().filter(|t| filter.matches(t)) {
            let month = YearMonth::of(transaction.date);
            let category = ReportCategory::of(transaction, settings);

            buckets
                .entry(month)
                .or_insert_with(|| MonthlyReportBucket::new(month))
                .push(category, transaction);
        }

        buckets.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: u32, team_id: u32, kind: TransactionType, cents: i64, date: (i32, u32, u32)) -> TeamTransaction {
        TeamTransaction {
            id,
            team_id,
            kind,
            amount: Money::from_cents(cents),
            description: String::new(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            cost_setting_id: None,
            match_id: None,
            recorded_by: None,
        }
    }

    fn sample() -> Vec<TeamTransaction> {
        vec![
            tx(1, 1, TransactionType::Deposit, 10000, (2024, 9, 2)),
            tx(2, 1, TransactionType::MatchCost, 4500, (2024, 9, 14)),
            tx(3, 2, TransactionType::MatchCost, 4500, (2024, 9, 14)),
            tx(4, 2, TransactionType::Penalty, 1500, (2024, 10, 5)),
            tx(5, 1, TransactionType::Adjustment, 250, (2025, 1, 3)),
        ]
    }

    #[test]
    fn test_one_bucket_per_month() {
        let transactions = sample();
        let report = MonthlyReport::build(&transactions, &[], &ReportFilter::default());

        let months: Vec<String> = report.iter().map(|b| b.month.to_string()).collect();
        assert_eq!(months, vec!["2024-09", "2024-10", "2025-01"]);
    }

    #[test]
    fn test_bucket_total_is_sum_of_members() {
        let transactions = sample();
        let report = MonthlyReport::build(&transactions, &[], &ReportFilter::default());

        for bucket in &report {
            let expected: Money = transactions
                .iter()
                .filter(|t| bucket.month.contains(t.date))
                .map(|t| t.amount)
                .sum();

            assert_eq!(bucket.total, expected);
            assert_eq!(bucket.categories.values().copied().sum::<Money>(), bucket.total);
        }

        let september = &report[0];
        assert_eq!(september.transaction_count, 3);
        assert_eq!(september.net, Money::from_cents(1000));
        assert_eq!(september.categories[&ReportCategory::MatchCosts], Money::from_cents(9000));
    }

    #[test]
    fn test_filter_by_team_and_range() {
        let transactions = sample();
        let filter = ReportFilter {
            team_id: Some(2),
            from: NaiveDate::from_ymd_opt(2024, 10, 1),
            to: None,
        };

        let report = MonthlyReport::build(&transactions, &[], &filter);

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].categories[&ReportCategory::Penalties], Money::from_cents(1500));
    }

    #[test]
    fn test_adjustment_follows_linked_setting() {
        let setting = CostSetting {
            id: 9,
            name: String::from("Boete"),
            amount: Money::from_cents(500),
            category: CostCategory::Penalty,
            description: None,
            is_active: true,
        };
        let mut adjustment = tx(1, 1, TransactionType::Adjustment, 500, (2024, 9, 1));
        adjustment.cost_setting_id = Some(9);

        assert_eq!(ReportCategory::of(&adjustment, &[setting]), ReportCategory::Penalties);
    }
}
