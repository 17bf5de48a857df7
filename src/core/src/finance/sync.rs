use crate::data::LeagueData;
use crate::error::LeagueResult;
use crate::finance::{CostSetting, Ledger, TeamTransaction, TransactionType};
use crate::r#match::Match;
use log::{debug, info, warn};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub synced_count: usize,
    pub updated_count: usize,
    pub skipped_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchSyncOutcome {
    Synced,
    Updated,
    Skipped,
}

/// Makes sure every completed match has one ledger row per team and per active match cost.
pub struct MatchCostSync;

impl MatchCostSync {
    pub fn run(data: &mut LeagueData) -> LeagueResult<SyncReport> {
        let settings: Vec<CostSetting> = data
            .cost_settings
            .iter()
            .filter(|s| s.is_charged_per_match())
            .cloned()
            .collect();

        let completed: Vec<Match> = data
            .matches
            .iter()
            .filter(|m| m.is_completed())
            .cloned()
            .collect();

        let mut report = SyncReport::default();

        for fixture in &completed {
            match Self::sync_match(data, fixture, &settings)? {
                MatchSyncOutcome::Synced => report.synced_count += 1,
                MatchSyncOutcome::Updated => report.updated_count += 1,
                MatchSyncOutcome::Skipped => report.skipped_count += 1,
            }
        }

        info!(
            "match cost sync: {} matches, synced = {}, updated = {}, skipped = {}",
            completed.len(),
            report.synced_count,
            report.updated_count,
            report.skipped_count
        );

        Ok(report)
    }

    fn sync_match(
        data: &mut LeagueData,
        fixture: &Match,
        settings: &[CostSetting],
    ) -> LeagueResult<MatchSyncOutcome> {
        if fixture.teams().iter().any(|id| data.team(*id).is_none()) {
            warn!("match cost sync: match {} references a missing team, skipped", fixture.id);
            return Ok(MatchSyncOutcome::Skipped);
        }

        let description_suffix = format!(
            "{} vs {}",
            data.team_name(fixture.home_team_id),
            data.team_name(fixture.away_team_id)
        );

        let mut created = false;
        let mut updated = false;

        for team_id in fixture.teams() {
            for setting in settings {
                let existing = data
                    .transactions
                    .iter()
                    .find(|t| t.is_for(team_id, fixture.id, setting.id))
                    .map(|t| (t.id, t.amount));

                match existing {
                    Some((_, amount)) if amount == setting.amount => {}
                    Some((id, _)) => {
                        Ledger::update_amount(data, id, setting.amount)?;
                        updated = true;
                    }
                    None => {
                        let transaction = TeamTransaction {
                            id: data.allocate_id(),
                            team_id,
                            kind: TransactionType::MatchCost,
                            amount: setting.amount,
                            description: format!("{}: {}", setting.name, description_suffix),
                            date: fixture.date,
                            cost_setting_id: Some(setting.id),
                            match_id: Some(fixture.id),
                            recorded_by: data.session_user_id(),
                        };
                        Ledger::insert(data, transaction)?;
                        created = true;
                    }
                }
            }
        }

        let outcome = if created {
            MatchSyncOutcome::Synced
        } else if updated {
            MatchSyncOutcome::Updated
        } else {
            MatchSyncOutcome::Skipped
        };

        debug!("match cost sync: match {} -> {:?}", fixture.id, outcome);

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finance::CostCategory;
    use crate::shared::Money;
    use crate::team::Team;
    use chrono::{NaiveDate, NaiveTime};

    fn setting(id: u32, name: &str, cents: i64, category: CostCategory) -> CostSetting {
        CostSetting {
            id,
            name: String::from(name),
            amount: Money::from_cents(cents),
            category,
            description: None,
            is_active: true,
        }
    }

    fn played(id: u32, home: u32, away: u32) -> Match {
        let mut m = Match::new(
            id,
            home,
            away,
            NaiveDate::from_ymd_opt(2024, 9, 14).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        );
        m.submit_score(2, 1).unwrap();
        m
    }

    fn data() -> LeagueData {
        let mut data = LeagueData::new();
        data.teams.push(Team::new(1, String::from("VV Noord")));
        data.teams.push(Team::new(2, String::from("SC Zuid")));
        data.teams.push(Team::new(3, String::from("FC Oost")));
        data.cost_settings.push(setting(10, "Veldkosten", 4500, CostCategory::MatchCost));
        data.cost_settings.push(setting(11, "Scheidsrechterkosten", 2500, CostCategory::MatchCost));
        data.cost_settings.push(setting(12, "Gele kaart", 1500, CostCategory::Penalty));
        data.matches.push(played(20, 1, 2));
        data.matches.push(played(21, 2, 3));
        data.matches.push(Match::new(
            22,
            3,
            1,
            NaiveDate::from_ymd_opt(2024, 9, 21).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        ));
        data.reindex();
        data
    }

    #[test]
    fn test_first_run_creates_rows_per_team_and_cost() {
        let mut data = data();

        let report = MatchCostSync::run(&mut data).unwrap();

        assert_eq!(report, SyncReport { synced_count: 2, updated_count: 0, skipped_count: 0 });
        // 2 matches * 2 teams * 2 match costs
        assert_eq!(data.transactions.len(), 8);
        assert_eq!(data.team(2).unwrap().balance, Money::from_cents(-14000));
        assert_eq!(data.team(1).unwrap().balance, Money::from_cents(-7000));
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let mut data = data();

        MatchCostSync::run(&mut data).unwrap();
        let balances: Vec<Money> = data.teams.iter().map(|t| t.balance).collect();

        let report = MatchCostSync::run(&mut data).unwrap();

        assert_eq!(report, SyncReport { synced_count: 0, updated_count: 0, skipped_count: 2 });
        assert_eq!(data.transactions.len(), 8);
        assert_eq!(data.teams.iter().map(|t| t.balance).collect::<Vec<_>>(), balances);
    }

    #[test]
    fn test_changed_tariff_updates_existing_rows() {
        let mut data = data();
        MatchCostSync::run(&mut data).unwrap();

        data.cost_settings[0].amount = Money::from_cents(5000);
        let report = MatchCostSync::run(&mut data).unwrap();

        assert_eq!(report, SyncReport { synced_count: 0, updated_count: 2, skipped_count: 0 });
        assert_eq!(data.team(1).unwrap().balance, Money::from_cents(-7500));
    }

    #[test]
    fn test_new_cost_setting_counts_as_synced() {
        let mut data = data();
        MatchCostSync::run(&mut data).unwrap();

        data.cost_settings.push(setting(13, "Zaalhuur", 1000, CostCategory::MatchCost));
        let report = MatchCostSync::run(&mut data).unwrap();

        assert_eq!(report.synced_count, 2);
        assert_eq!(data.transactions.len(), 12);
    }
}
