use crate::data::LeagueData;
use crate::error::{LeagueError, LeagueResult};
use crate::finance::{TeamTransaction, TransactionDraft};
use crate::shared::Money;
use log::debug;
use std::collections::HashMap;

/// Ledger writes. Every change to a transaction is mirrored on the team balance.
pub struct Ledger;

impl Ledger {
    pub fn record(data: &mut LeagueData, draft: TransactionDraft) -> LeagueResult<TeamTransaction> {
        draft.validate()?;
        data.require_team(draft.team_id)?;

        let setting = match draft.cost_setting_id {
            Some(id) => Some(
                data.cost_setting(id)
                    .ok_or_else(|| LeagueError::not_found("cost setting", id))?
                    .clone(),
            ),
            None => None,
        };

        if let Some(match_id) = draft.match_id {
            data.require_fixture(match_id)?;
        }

        let amount = draft
            .amount
            .or_else(|| setting.as_ref().map(|s| s.amount))
            .unwrap_or(Money::ZERO);

        let description = draft
            .description
            .filter(|d| !d.trim().is_empty())
            .or_else(|| setting.as_ref().map(|s| s.name.clone()))
            .unwrap_or_default();

        let transaction = TeamTransaction {
            id: data.allocate_id(),
            team_id: draft.team_id,
            kind: draft.kind,
            amount,
            description,
            date: draft.date,
            cost_setting_id: draft.cost_setting_id,
            match_id: draft.match_id,
            recorded_by: data.session_user_id(),
        };

        Self::insert(data, transaction.clone())?;

        Ok(transaction)
    }

    /// Appends an already built row and applies it to the team balance.
    pub(crate) fn insert(data: &mut LeagueData, transaction: TeamTransaction) -> LeagueResult<()> {
        let team = data
            .team_mut(transaction.team_id)
            .ok_or_else(|| LeagueError::not_found("team", transaction.team_id))?;

        team.balance += transaction.signed_amount();

        debug!(
            "team: {}, ledger: {:?} {}, balance = {}",
            team.name, transaction.kind, transaction.amount, team.balance
        );

        data.transactions.push(transaction);

        Ok(())
    }

    /// Returns the balance change caused by the new amount.
    pub fn update_amount(data: &mut LeagueData, id: u32, amount: Money) -> LeagueResult<Money> {
        if amount.is_negative() {
            return Err(LeagueError::validation("amount must not be negative"));
        }

        let transaction = data
            .transactions
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| LeagueError::not_found("transaction", id))?;

        let before = transaction.signed_amount();
        transaction.amount = amount;
        let delta = transaction.signed_amount() - before;
        let team_id = transaction.team_id;

        if let Some(team) = data.team_mut(team_id) {
            team.balance += delta;
        }

        Ok(delta)
    }

    pub fn delete(data: &mut LeagueData, id: u32) -> LeagueResult<TeamTransaction> {
        let index = data
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| LeagueError::not_found("transaction", id))?;

        let transaction = data.transactions.remove(index);

        if let Some(team) = data.team_mut(transaction.team_id) {
            team.balance -= transaction.signed_amount();
        }

        Ok(transaction)
    }

    /// Sets every team balance to the sum of its signed ledger rows.
    pub fn recalculate_all(data: &mut LeagueData) {
        let mut balances: HashMap<u32, Money> = HashMap::new();
        for transaction in &data.transactions {
            *balances.entry(transaction.team_id).or_default() += transaction.signed_amount();
        }

        for team in data.teams.iter_mut() {
            team.balance = balances.get(&team.id).copied().unwrap_or_default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::{CostCategory, CostSetting, TransactionType};
    use crate::team::Team;
    use chrono::NaiveDate;

    fn data() -> LeagueData {
        let mut data = LeagueData::new();
        data.teams.push(Team::new(1, String::from("VV Noord")));
        data.cost_settings.push(CostSetting {
            id: 2,
            name: String::from("Gele kaart"),
            amount: Money::from_cents(1500),
            category: CostCategory::Penalty,
            description: None,
            is_active: true,
        });
        data.reindex();
        data
    }

    fn draft(kind: TransactionType, amount: Option<Money>, cost_setting_id: Option<u32>) -> TransactionDraft {
        TransactionDraft {
            team_id: 1,
            kind,
            amount,
            description: None,
            date: NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
            cost_setting_id,
            match_id: None,
        }
    }

    #[test]
    fn test_record_uses_cost_setting_defaults() {
        let mut data = data();

        let tx = Ledger::record(&mut data, draft(TransactionType::Penalty, None, Some(2))).unwrap();

        assert_eq!(tx.amount, Money::from_cents(1500));
        assert_eq!(tx.description, "Gele kaart");
        assert_eq!(data.team(1).unwrap().balance, Money::from_cents(-1500));
    }

    #[test]
    fn test_update_and_delete_keep_balance_consistent() {
        let mut data = data();

        Ledger::record(&mut data, draft(TransactionType::Deposit, Some(Money::from_cents(10000)), None)).unwrap();
        let penalty = Ledger::record(&mut data, draft(TransactionType::Penalty, None, Some(2))).unwrap();

        let delta = Ledger::update_amount(&mut data, penalty.id, Money::from_cents(2000)).unwrap();
        assert_eq!(delta, Money::from_cents(-500));
        assert_eq!(data.team(1).unwrap().balance, Money::from_cents(8000));

        Ledger::delete(&mut data, penalty.id).unwrap();
        assert_eq!(data.team(1).unwrap().balance, Money::from_cents(10000));

        data.team_mut(1).unwrap().balance = Money::ZERO;
        Ledger::recalculate_all(&mut data);
        assert_eq!(data.team(1).unwrap().balance, Money::from_cents(10000));
    }

    #[test]
    fn test_unknown_team_is_rejected() {
        let mut data = data();
        let mut d = draft(TransactionType::Deposit, Some(Money::from_cents(100)), None);
        d.team_id = 42;

        assert_eq!(
            Ledger::record(&mut data, d),
            Err(LeagueError::not_found("team", 42))
        );
    }
}
