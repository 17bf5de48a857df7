mod generators;
mod loaders;

pub use generators::*;
pub use loaders::*;

use log::info;

pub struct DatabaseEntity {
    pub teams: Vec<TeamEntity>,
    pub users: Vec<UserEntity>,
    pub venues: Vec<VenueEntity>,
    pub cost_settings: Vec<CostSettingEntity>,
    pub vacation_periods: Vec<VacationPeriodEntity>,
}

pub struct DatabaseLoader;

impl DatabaseLoader {
    pub fn load() -> Result<DatabaseEntity, serde_json::Error> {
        let entity = DatabaseEntity {
            teams: TeamLoader::load()?,
            users: UserLoader::load()?,
            venues: VenueLoader::load()?,
            cost_settings: CostSettingLoader::load()?,
            vacation_periods: VenueLoader::load_vacation_periods()?,
        };

        info!(
            "seed data: {} teams, {} users, {} venues, {} cost settings",
            entity.teams.len(),
            entity.users.len(),
            entity.venues.len(),
            entity.cost_settings.len()
        );

        Ok(entity)
    }
}
