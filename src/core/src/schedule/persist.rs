use crate::data::LeagueData;
use crate::error::{LeagueError, LeagueResult};
use crate::r#match::Match;
use crate::schedule::{Bracket, GeneratedSchedule, ScheduleRequest};
use log::info;

pub struct ScheduleImport;

impl ScheduleImport {
    /// Stores a generated schedule as fixtures. Knockout competitions also register their bracket.
    pub fn persist(
        data: &mut LeagueData,
        request: &ScheduleRequest,
        schedule: &GeneratedSchedule,
    ) -> LeagueResult<Vec<Match>> {
        let Some(first) = schedule.matches.first() else {
            return Err(LeagueError::validation("schedule has no matches"));
        };

        for team_id in request.team_ids() {
            data.require_team(team_id)?;
        }

        let kind = request.config.competition_type.match_kind();

        let created = if kind.is_knockout() {
            let mut created = Bracket::seed(
                data,
                kind,
                &request.team_ids(),
                first.match_date,
                first.match_time,
                first.venue_id,
            )?;

            for fixture in created.iter_mut() {
                let scheduled = schedule
                    .matches
                    .iter()
                    .find(|m| m.bracket.is_some() && m.bracket == fixture.bracket);

                if let Some(scheduled) = scheduled {
                    fixture.date = scheduled.match_date;
                    fixture.time = scheduled.match_time;
                    fixture.venue_id = scheduled.venue_id;

                    if let Some(stored) = data.fixture_mut(fixture.id) {
                        stored.date = scheduled.match_date;
                        stored.time = scheduled.match_time;
                        stored.venue_id = scheduled.venue_id;
                    }
                }
            }

            created
        } else {
            let mut created = Vec::with_capacity(schedule.matches.len());

            for scheduled in &schedule.matches {
                let mut fixture = Match::new(
                    data.allocate_id(),
                    scheduled.home_team_id,
                    scheduled.away_team_id,
                    scheduled.match_date,
                    scheduled.match_time,
                );
                fixture.kind = kind;
                fixture.venue_id = scheduled.venue_id;
                fixture.matchday = Some(scheduled.matchday);
                created.push(fixture);
            }

            data.matches.extend(created.iter().cloned());
            created
        };

        info!(
            "schedule: {} stored with {} matches",
            request.config.competition_name,
            created.len()
        );

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{CompetitionType, ScheduleConfig, ScheduleGenerator, ScheduleTeam};
    use crate::team::Team;
    use chrono::{NaiveDate, NaiveTime, Weekday};

    fn setup(kind: CompetitionType, teams: u32) -> (LeagueData, ScheduleRequest) {
        let mut data = LeagueData::new();
        for id in 1..=teams {
            data.teams.push(Team::new(id, format!("Team {}", id)));
        }
        data.reindex();

        let request = ScheduleRequest {
            config: ScheduleConfig {
                competition_name: String::from("Najaar"),
                competition_type: kind,
                start_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
                end_date: None,
                match_days: vec![Weekday::Sat],
                time_slots: vec![
                    NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                    NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
                ],
                venues: Vec::new(),
                double_round: false,
                matches_per_matchday: None,
            },
            teams: (1..=teams)
                .map(|id| ScheduleTeam { team_id: id, team_name: format!("Team {}", id) })
                .collect(),
            team_preferences: Vec::new(),
            vacation_periods: Vec::new(),
            ai_provider: Default::default(),
        };

        (data, request)
    }

    #[test]
    fn test_league_schedule_is_stored() {
        let (mut data, request) = setup(CompetitionType::League, 4);
        let schedule = ScheduleGenerator::generate(&request);

        let created = ScheduleImport::persist(&mut data, &request, &schedule).unwrap();

        assert_eq!(created.len(), 6);
        assert_eq!(data.matches.len(), 6);
        assert!(data.matches.iter().all(|m| m.matchday.is_some()));
    }

    #[test]
    fn test_cup_schedule_registers_bracket() {
        let (mut data, request) = setup(CompetitionType::Cup, 4);
        let schedule = ScheduleGenerator::generate(&request);

        let created = ScheduleImport::persist(&mut data, &request, &schedule).unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(data.brackets.len(), 1);
        // two slots on the first Saturday: both semi-finals keep their generated kick-off
        let times: Vec<NaiveTime> = data.matches.iter().map(|m| m.time).collect();
        assert!(times.contains(&NaiveTime::from_hms_opt(12, 0, 0).unwrap()));
    }

    #[test]
    fn test_unknown_team_is_rejected() {
        let (mut data, mut request) = setup(CompetitionType::League, 2);
        request.teams.push(ScheduleTeam { team_id: 9, team_name: String::from("Ghost") });
        let schedule = ScheduleGenerator::generate(&request);

        assert!(ScheduleImport::persist(&mut data, &request, &schedule).is_err());
        assert!(data.matches.is_empty());
    }
}
