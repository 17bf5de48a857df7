use crate::schedule::{
    Bracket, CompetitionType, GeneratedSchedule, Matchday, Pairing, Round, RoundRobin,
    ScheduleRequest, ScheduledMatch,
};
use crate::r#match::BracketSlot;
use crate::venue::is_vacation_day;
use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use log::debug;
use std::collections::{HashMap, HashSet};

const DEFAULT_MATCH_DAY: Weekday = Weekday::Sat;
const MAX_SEARCH_DAYS: i64 = 730;

const PENALTY_UNMET_PREFERENCE: u8 = 5;
const PENALTY_OVERFLOW: u8 = 10;
const PENALTY_END_DATE: u8 = 15;

fn default_kickoff() -> NaiveTime {
    NaiveTime::from_hms_opt(10, 0, 0).unwrap_or_default()
}

type Slot = (Option<u32>, NaiveTime);

/// Local fixture generator: round robin for leagues, first bracket round for cups.
pub struct ScheduleGenerator<'a> {
    request: &'a ScheduleRequest,
    match_days: Vec<Weekday>,
    slots: Vec<Slot>,
    capacity: usize,
    used: HashSet<(NaiveDate, Option<u32>, NaiveTime)>,
    per_date: HashMap<NaiveDate, usize>,
    notes: Vec<String>,
    noted: HashSet<String>,
    cup_slots: HashMap<Pairing, BracketSlot>,
    unmet_teams: HashSet<u32>,
    overflows: usize,
}

impl<'a> ScheduleGenerator<'a> {
    pub fn generate(request: &'a ScheduleRequest) -> GeneratedSchedule {
        let team_ids = request.team_ids();

        if team_ids.len() < 2 {
            return GeneratedSchedule::rejected(vec![String::from(
                "at least two teams are required to generate a schedule",
            )]);
        }

        let distinct: HashSet<u32> = team_ids.iter().copied().collect();
        if distinct.len() != team_ids.len() {
            return GeneratedSchedule::rejected(vec![String::from(
                "the team list contains duplicate team ids",
            )]);
        }

        let mut generator = ScheduleGenerator::new(request);
        generator.check_inputs(&distinct);

        let rounds = match request.config.competition_type {
            CompetitionType::League => RoundRobin::rounds(&team_ids, request.config.double_round),
            CompetitionType::Cup | CompetitionType::Playoff => generator.first_bracket_round(&team_ids),
        };

        let matches = generator.place_rounds(&rounds);

        generator.finish(matches)
    }

    fn new(request: &'a ScheduleRequest) -> Self {
        let config = &request.config;
        let mut notes = Vec::new();

        let match_days = if config.match_days.is_empty() {
            notes.push(format!("no match days configured, using {}", DEFAULT_MATCH_DAY));
            vec![DEFAULT_MATCH_DAY]
        } else {
            config.match_days.clone()
        };

        let times = if config.time_slots.is_empty() {
            notes.push(format!(
                "no time slots configured, using {}",
                default_kickoff().format("%H:%M")
            ));
            vec![default_kickoff()]
        } else {
            config.time_slots.clone()
        };

        let venues: Vec<Option<u32>> = if config.venues.is_empty() {
            notes.push(String::from("no venues configured, matches have no venue"));
            vec![None]
        } else {
            config.venues.iter().map(|v| Some(v.venue_id)).collect()
        };

        let slots: Vec<Slot> = times
            .iter()
            .flat_map(|time| venues.iter().map(move |venue| (*venue, *time)))
            .collect();

        let capacity = config
            .matches_per_matchday
            .filter(|cap| *cap > 0)
            .map_or(slots.len(), |cap| cap.min(slots.len()));

        ScheduleGenerator {
            request,
            match_days,
            slots,
            capacity,
            used: HashSet::new(),
            per_date: HashMap::new(),
            noted: notes.iter().cloned().collect(),
            notes,
            cup_slots: HashMap::new(),
            unmet_teams: HashSet::new(),
            overflows: 0,
        }
    }

    fn note(&mut self, note: String) {
        if self.noted.insert(note.clone()) {
            self.notes.push(note);
        }
    }

    fn check_inputs(&mut self, team_ids: &HashSet<u32>) {
        for preference in &self.request.team_preferences {
            if !team_ids.contains(&preference.team_id) {
                self.note(format!(
                    "preference for unknown team {} ignored",
                    preference.team_id
                ));
            }
        }

        for period in &self.request.vacation_periods {
            if period.start_date > period.end_date {
                self.note(format!(
                    "vacation period '{}' ends before it starts and is ignored",
                    period.name
                ));
            }
        }
    }

    fn first_bracket_round(&mut self, team_ids: &[u32]) -> Vec<Round> {
        let plan = match Bracket::plan(team_ids) {
            Ok(plan) => plan,
            Err(e) => {
                self.note(e.to_string());
                return Vec::new();
            }
        };

        let mut pairings = Vec::new();
        for pairing in plan.pairings {
            match pairing.away {
                Some(away) => {
                    let fixture = Pairing {
                        home: pairing.home,
                        away,
                    };
                    self.cup_slots.insert(fixture, pairing.slot);
                    pairings.push(fixture);
                }
                None => self.note(format!(
                    "{} receives a bye to round 2",
                    self.request.team_name(pairing.home)
                )),
            }
        }

        vec![Round {
            number: 1,
            pairings,
            bye: None,
        }]
    }

    /// Next configured match day on or after `from` that is not in a vacation.
    fn next_date(&mut self, from: NaiveDate) -> Option<NaiveDate> {
        let request = self.request;

        for offset in 0..MAX_SEARCH_DAYS {
            let date = from + Duration::days(offset);

            if !self.match_days.contains(&date.weekday()) {
                continue;
            }

            if let Some(period) = is_vacation_day(&request.vacation_periods, date) {
                let note = format!(
                    "skipped vacation period '{}' ({} to {})",
                    period.name, period.start_date, period.end_date
                );
                self.note(note);
                continue;
            }

            return Some(date);
        }

        None
    }

    fn place_rounds(&mut self, rounds: &[Round]) -> Vec<ScheduledMatch> {
        let mut matches = Vec::new();
        let mut cursor = self.request.config.start_date;
        for round in rounds {
            let Some(first_date) = self.next_date(cursor) else {
                self.note(format!(
                    "no available date found for matchday {}, schedule is incomplete",
                    round.number
                ));
                break;
            };

            let mut date = first_date;
            let mut overflowed = false;
            let mut incomplete = false;

            for pairing in &round.pairings {
                let slot = loop {
                    if let Some(slot) = self.free_slot(date, pairing) {
                        break Some(slot);
                    }

                    overflowed = true;
                    match self.next_date(date + Duration::days(1)) {
                        Some(next) => date = next,
                        None => break None,
                    }
                };

                let Some((venue_id, time)) = slot else {
                    incomplete = true;
                    break;
                };

                self.used.insert((date, venue_id, time));
                *self.per_date.entry(date).or_default() += 1;

                self.check_preferences(pairing, date, venue_id, time);

                matches.push(ScheduledMatch {
                    home_team_id: pairing.home,
                    away_team_id: pairing.away,
                    home_team_name: self.request.team_name(pairing.home),
                    away_team_name: self.request.team_name(pairing.away),
                    match_date: date,
                    match_time: time,
                    venue_id,
                    venue_name: venue_id.and_then(|id| self.request.venue_name(id)),
                    matchday: round.number,
                    bracket: self.cup_slots.get(pairing).copied(),
                });
            }

            if overflowed {
                self.overflows += 1;
                self.note(format!(
                    "matchday {} did not fit on {} and continues until {}",
                    round.number, first_date, date
                ));
            }

            if incomplete {
                self.note(format!(
                    "no free slot left for matchday {}, schedule is incomplete",
                    round.number
                ));
                break;
            }

            debug!("schedule: matchday {} starts {}", round.number, first_date);

            cursor = date + Duration::days(1);
        }

        matches
    }

    /// Preferred venue and time of the home team first, then configuration order.
    fn free_slot(&self, date: NaiveDate, pairing: &Pairing) -> Option<Slot> {
        if self.per_date.get(&date).copied().unwrap_or(0) >= self.capacity {
            return None;
        }

        let preference = self.request.preference(pairing.home);
        let preferred_venue = preference.and_then(|p| p.preferred_venue_id);
        let preferred_time = preference.and_then(|p| p.preferred_time);

        let mut candidates: Vec<&Slot> = self.slots.iter().collect();
        candidates.sort_by_key(|(venue, time)| {
            let venue_miss = preferred_venue.is_some() && *venue != preferred_venue;
            let time_miss = preferred_time.is_some_and(|t| t != *time);
            venue_miss as u8 + time_miss as u8
        });

        candidates
            .into_iter()
            .find(|(venue, time)| !self.used.contains(&(date, *venue, *time)))
            .copied()
    }

    fn check_preferences(&mut self, pairing: &Pairing, date: NaiveDate, venue_id: Option<u32>, time: NaiveTime) {
        let mut misses: Vec<(u32, String)> = Vec::new();

        if let Some(preference) = self.request.preference(pairing.home) {
            let name = self.request.team_name(pairing.home);

            if preference.preferred_venue_id.is_some_and(|v| Some(v) != venue_id) {
                misses.push((pairing.home, format!("{}: preferred venue not available", name)));
            }
            if preference.preferred_time.is_some_and(|t| t != time) {
                misses.push((pairing.home, format!("{}: preferred kick-off time not available", name)));
            }
            if preference.preferred_day.is_some_and(|d| d != date.weekday()) {
                misses.push((pairing.home, format!("{}: preferred match day not available", name)));
            }
        }

        for team_id in [pairing.home, pairing.away] {
            if let Some(preference) = self.request.preference(team_id) {
                if preference.unavailable_dates.contains(&date) {
                    misses.push((
                        team_id,
                        format!("{} plays on unavailable date {}", self.request.team_name(team_id), date),
                    ));
                }
            }
        }

        for (team_id, note) in misses {
            self.unmet_teams.insert(team_id);
            self.note(note);
        }
    }

    fn finish(mut self, mut matches: Vec<ScheduledMatch>) -> GeneratedSchedule {
        matches.sort_by(|a, b| {
            a.match_date
                .cmp(&b.match_date)
                .then(a.match_time.cmp(&b.match_time))
                .then(a.venue_id.cmp(&b.venue_id))
        });

        let mut penalty: u32 = self.unmet_teams.len() as u32 * PENALTY_UNMET_PREFERENCE as u32
            + self.overflows as u32 * PENALTY_OVERFLOW as u32;

        if let (Some(end_date), Some(last)) = (
            self.request.config.end_date,
            matches.iter().map(|m| m.match_date).max(),
        ) {
            if last > end_date {
                self.note(format!("schedule runs until {}, after the end date {}", last, end_date));
                penalty += PENALTY_END_DATE as u32;
            }
        }

        let matchdays = Self::matchdays(&matches);

        let expected = Self::expected_match_count(self.request);
        if matches.len() < expected {
            self.note(format!("only {} of {} matches could be scheduled", matches.len(), expected));
            penalty = 100;
        }

        GeneratedSchedule {
            matches,
            matchdays,
            validation_notes: self.notes,
            confidence_score: 100u32.saturating_sub(penalty) as u8,
        }
    }

    pub(crate) fn matchdays(matches: &[ScheduledMatch]) -> Vec<Matchday> {
        let mut by_number: HashMap<u16, Matchday> = HashMap::new();

        for m in matches {
            let entry = by_number.entry(m.matchday).or_insert(Matchday {
                matchday: m.matchday,
                date: m.match_date,
                match_count: 0,
            });
            entry.match_count += 1;
            entry.date = entry.date.min(m.match_date);
        }

        let mut matchdays: Vec<Matchday> = by_number.into_values().collect();
        matchdays.sort_by_key(|m| m.matchday);
        matchdays
    }

    fn expected_match_count(request: &ScheduleRequest) -> usize {
        let n = request.teams.len();
        match request.config.competition_type {
            CompetitionType::League => {
                let single = n * n.saturating_sub(1) / 2;
                if request.config.double_round { single * 2 } else { single }
            }
            _ => n.saturating_sub(n.next_power_of_two() / 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{ScheduleConfig, ScheduleTeam, ScheduleVenue, TeamPreference};
    use crate::venue::VacationPeriod;

    fn time(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(teams: u32) -> ScheduleRequest {
        ScheduleRequest {
            config: ScheduleConfig {
                competition_name: String::from("Zaterdagcompetitie"),
                competition_type: CompetitionType::League,
                // Monday
                start_date: date(2024, 9, 2),
                end_date: None,
                match_days: vec![Weekday::Sat],
                time_slots: vec![time(10), time(12)],
                venues: vec![
                    ScheduleVenue { venue_id: 1, name: String::from("Sportpark Noord") },
                    ScheduleVenue { venue_id: 2, name: String::from("Sportpark Zuid") },
                ],
                double_round: false,
                matches_per_matchday: None,
            },
            teams: (1..=teams)
                .map(|id| ScheduleTeam { team_id: id, team_name: format!("Team {}", id) })
                .collect(),
            team_preferences: Vec::new(),
            vacation_periods: Vec::new(),
            ai_provider: Default::default(),
        }
    }

    #[test]
    fn test_league_schedule_is_complete_and_conflict_free() {
        let req = request(6);
        let schedule = ScheduleGenerator::generate(&req);

        assert_eq!(schedule.matches.len(), 15);
        assert_eq!(schedule.matchdays.len(), 5);
        assert_eq!(schedule.confidence_score, 100);

        let slots: HashSet<(NaiveDate, Option<u32>, NaiveTime)> = schedule
            .matches
            .iter()
            .map(|m| (m.match_date, m.venue_id, m.match_time))
            .collect();
        assert_eq!(slots.len(), schedule.matches.len());

        assert!(schedule.matches.iter().all(|m| m.match_date.weekday() == Weekday::Sat));
        assert_eq!(schedule.matchdays[0].date, date(2024, 9, 7));
        assert_eq!(schedule.matchdays[1].date, date(2024, 9, 14));
    }

    #[test]
    fn test_vacation_dates_are_skipped() {
        let mut req = request(4);
        req.vacation_periods.push(VacationPeriod {
            id: 1,
            name: String::from("Herfstvakantie"),
            start_date: date(2024, 9, 10),
            end_date: date(2024, 9, 22),
            is_active: true,
        });

        let schedule = ScheduleGenerator::generate(&req);

        let dates: Vec<NaiveDate> = schedule.matchdays.iter().map(|m| m.date).collect();
        assert_eq!(dates, vec![date(2024, 9, 7), date(2024, 9, 28), date(2024, 10, 5)]);
        assert!(schedule.validation_notes.iter().any(|n| n.contains("Herfstvakantie")));
    }

    #[test]
    fn test_overflow_rolls_to_next_match_day() {
        let mut req = request(6);
        req.config.venues.truncate(1);
        req.config.time_slots = vec![time(10), time(12)];

        let schedule = ScheduleGenerator::generate(&req);

        assert_eq!(schedule.matches.len(), 15);
        let first_day: Vec<&ScheduledMatch> = schedule.matches.iter().filter(|m| m.matchday == 1).collect();
        assert_eq!(first_day.len(), 3);
        assert_eq!(first_day.iter().filter(|m| m.match_date == date(2024, 9, 7)).count(), 2);
        assert_eq!(first_day.iter().filter(|m| m.match_date == date(2024, 9, 14)).count(), 1);
        assert!(schedule.confidence_score < 100);
    }

    #[test]
    fn test_home_preference_is_honoured() {
        let mut req = request(4);
        for team_id in 1..=4 {
            req.team_preferences.push(TeamPreference {
                team_id,
                preferred_venue_id: Some(2),
                preferred_time: Some(time(12)),
                ..Default::default()
            });
        }

        let schedule = ScheduleGenerator::generate(&req);

        // two matches per Saturday: one gets the preferred slot, the other does not
        let preferred = schedule
            .matches
            .iter()
            .filter(|m| m.venue_id == Some(2) && m.match_time == time(12))
            .count();
        assert_eq!(preferred, 3);
        assert!(schedule.confidence_score < 100);
    }

    #[test]
    fn test_end_date_overrun_is_reported() {
        let mut req = request(4);
        req.config.end_date = Some(date(2024, 9, 10));

        let schedule = ScheduleGenerator::generate(&req);

        assert_eq!(schedule.matches.len(), 6);
        assert!(schedule.validation_notes.iter().any(|n| n.contains("end date")));
        assert_eq!(schedule.confidence_score, 85);
    }

    #[test]
    fn test_too_few_teams_is_rejected() {
        let req = request(1);
        let schedule = ScheduleGenerator::generate(&req);

        assert!(schedule.matches.is_empty());
        assert_eq!(schedule.confidence_score, 0);
        assert_eq!(schedule.validation_notes.len(), 1);
    }

    #[test]
    fn test_cup_generates_first_round_with_byes() {
        let mut req = request(6);
        req.config.competition_type = CompetitionType::Cup;

        let schedule = ScheduleGenerator::generate(&req);

        assert_eq!(schedule.matches.len(), 2);
        assert!(schedule.matches.iter().all(|m| m.bracket.map(|s| s.round) == Some(1)));
        assert_eq!(schedule.validation_notes.iter().filter(|n| n.contains("bye")).count(), 2);
        assert_eq!(schedule.confidence_score, 100);
    }

    #[test]
    fn test_double_round_doubles_matches() {
        let mut req = request(4);
        req.config.double_round = true;

        let schedule = ScheduleGenerator::generate(&req);

        assert_eq!(schedule.matches.len(), 12);
        assert_eq!(schedule.matchdays.len(), 6);
    }
}
