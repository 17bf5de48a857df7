use crate::{DatabaseEntity, TeamEntity};
use chrono::NaiveDate;
use league_core::finance::{CostSetting, Ledger, TransactionDraft, TransactionType};
use league_core::team::{Team, TeamColors, TeamContact};
use league_core::user::User;
use league_core::venue::{VacationPeriod, Venue, VenueTimeslot};
use league_core::{LeagueData, Money};
use log::warn;

const OPENING_BALANCE_DESCRIPTION: &str = "Beginsaldo";

pub struct DatabaseGenerator;

impl DatabaseGenerator {
    /// Builds the live store from seed entities. Invalid seed rows are skipped with a warning.
    pub fn generate(data: &DatabaseEntity, opening_date: NaiveDate) -> LeagueData {
        let mut league = LeagueData::new();

        league.teams = data.teams.iter().map(Self::generate_team).collect();

        league.users = data
            .users
            .iter()
            .map(|u| User {
                id: u.id,
                username: u.username.clone(),
                email: u.email.clone(),
                role: u.role,
                team_ids: u.team_ids.clone(),
            })
            .filter(|user| match user.validate() {
                Ok(_) => true,
                Err(e) => {
                    warn!("seed user {} skipped: {}", user.username, e);
                    false
                }
            })
            .collect();

        league.venues = data
            .venues
            .iter()
            .map(|v| Venue {
                id: v.id,
                name: v.name.clone(),
                address: v.address.clone(),
            })
            .collect();

        league.cost_settings = data
            .cost_settings
            .iter()
            .map(|c| CostSetting {
                id: c.id,
                name: c.name.clone(),
                amount: Money::from_cents(c.amount_cents),
                category: c.category,
                description: c.description.clone(),
                is_active: c.is_active,
            })
            .collect();

        league.vacation_periods = data
            .vacation_periods
            .iter()
            .map(|v| VacationPeriod {
                id: v.id,
                name: v.name.clone(),
                start_date: v.start_date,
                end_date: v.end_date,
                is_active: true,
            })
            .collect();

        league.reindex();

        for venue in &data.venues {
            for slot in &venue.timeslots {
                let id = league.allocate_id();
                league.timeslots.push(VenueTimeslot {
                    id,
                    venue_id: venue.id,
                    day_of_week: slot.day_of_week,
                    start_time: slot.start_time,
                    end_time: slot.end_time,
                    priority: slot.priority,
                });
            }
        }

        for team in data.teams.iter().filter(|t| t.opening_balance_cents != 0) {
            let draft = TransactionDraft {
                team_id: team.id,
                kind: if team.opening_balance_cents > 0 {
                    TransactionType::Deposit
                } else {
                    TransactionType::Adjustment
                },
                amount: Some(Money::from_cents(team.opening_balance_cents.abs())),
                description: Some(String::from(OPENING_BALANCE_DESCRIPTION)),
                date: opening_date,
                cost_setting_id: None,
                match_id: None,
            };

            if let Err(e) = Ledger::record(&mut league, draft) {
                warn!("opening balance for team {} skipped: {}", team.id, e);
            }
        }

        league
    }

    fn generate_team(team: &TeamEntity) -> Team {
        Team {
            id: team.id,
            name: team.name.clone(),
            balance: Money::ZERO,
            contact: TeamContact {
                person: team.contact_person.clone(),
                email: team.contact_email.clone(),
                phone: team.contact_phone.clone(),
            },
            colors: TeamColors {
                primary: team.primary_color.clone(),
                secondary: team.secondary_color.clone(),
            },
            is_active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DatabaseLoader;

    fn opening_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
    }

    #[test]
    fn test_seed_data_loads() {
        let entity = DatabaseLoader::load().unwrap();

        assert!(!entity.teams.is_empty());
        assert!(!entity.cost_settings.is_empty());
    }

    #[test]
    fn test_generate_applies_opening_balances() {
        let entity = DatabaseLoader::load().unwrap();
        let data = DatabaseGenerator::generate(&entity, opening_date());

        let eendracht = data.team(1).unwrap();
        assert_eq!(eendracht.balance, Money::from_cents(25000));
        assert_eq!(data.team_transactions(1).len(), 1);

        let polder = data.team(3).unwrap();
        assert_eq!(polder.balance, Money::ZERO);
    }

    #[test]
    fn test_generated_ids_do_not_collide() {
        let entity = DatabaseLoader::load().unwrap();
        let mut data = DatabaseGenerator::generate(&entity, opening_date());

        let next = data.allocate_id();
        assert!(data.teams.iter().all(|t| t.id < next));
        assert!(data.timeslots.iter().all(|t| t.id < next));
        assert_eq!(data.timeslots.len(), 4);
    }

    #[test]
    fn test_every_seed_user_is_valid() {
        let entity = DatabaseLoader::load().unwrap();
        let data = DatabaseGenerator::generate(&entity, opening_date());

        assert_eq!(data.users.len(), entity.users.len());
    }
}
