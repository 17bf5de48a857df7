use crate::schedule::{
    AiProvider, GeneratedSchedule, ScheduleGenerator, ScheduleRequest,
};
use crate::venue::is_vacation_day;
use log::{info, warn};
use std::collections::HashSet;
use std::future::Future;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("assistant unavailable: {0}")]
    Unavailable(String),

    #[error("assistant response could not be parsed: {0}")]
    InvalidResponse(String),

    #[error("assistant schedule rejected: {0}")]
    Rejected(String),
}

/// Language model backend that turns a prompt into raw text.
pub trait ScheduleAssistant {
    fn complete(&self, prompt: String) -> impl Future<Output = Result<String, AssistantError>> + Send;
}

pub struct AiPrompt;

impl AiPrompt {
    pub fn build(request: &ScheduleRequest) -> String {
        let config = &request.config;
        let mut prompt = String::with_capacity(2048);

        prompt.push_str("You are planning fixtures for an amateur football competition.\n");
        prompt.push_str(&format!(
            "Competition: {} ({:?}), starting {}",
            config.competition_name, config.competition_type, config.start_date
        ));
        if let Some(end_date) = config.end_date {
            prompt.push_str(&format!(", ending {}", end_date));
        }
        prompt.push('\n');

        if config.double_round {
            prompt.push_str("Every pair of teams meets twice, once at each home ground.\n");
        }

        let days: Vec<String> = config.match_days.iter().map(|d| d.to_string()).collect();
        let times: Vec<String> = config
            .time_slots
            .iter()
            .map(|t| t.format("%H:%M").to_string())
            .collect();
        prompt.push_str(&format!("Match days: {}\n", days.join(", ")));
        prompt.push_str(&format!("Kick-off times: {}\n", times.join(", ")));

        prompt.push_str("Venues:\n");
        for venue in &config.venues {
            prompt.push_str(&format!("- {} (id {})\n", venue.name, venue.venue_id));
        }

        prompt.push_str("Teams:\n");
        for team in &request.teams {
            prompt.push_str(&format!("- {} (id {})", team.team_name, team.team_id));
            if let Some(preference) = request.preference(team.team_id) {
                if let Some(day) = preference.preferred_day {
                    prompt.push_str(&format!(", prefers {}", day));
                }
                if let Some(time) = preference.preferred_time {
                    prompt.push_str(&format!(", prefers {}", time.format("%H:%M")));
                }
                if let Some(venue_id) = preference.preferred_venue_id {
                    prompt.push_str(&format!(", prefers venue {}", venue_id));
                }
                if !preference.unavailable_dates.is_empty() {
                    let dates: Vec<String> = preference
                        .unavailable_dates
                        .iter()
                        .map(|d| d.to_string())
                        .collect();
                    prompt.push_str(&format!(", unavailable on {}", dates.join(", ")));
                }
            }
            prompt.push('\n');
        }

        let vacations: Vec<String> = request
            .vacation_periods
            .iter()
            .filter(|p| p.is_active)
            .map(|p| format!("{} ({} to {})", p.name, p.start_date, p.end_date))
            .collect();
        if !vacations.is_empty() {
            prompt.push_str(&format!("No matches during: {}\n", vacations.join("; ")));
        }

        prompt.push_str(
            "Answer with JSON only: {\"matches\": [{\"home_team_id\", \"away_team_id\", \
             \"match_date\": \"YYYY-MM-DD\", \"match_time\": \"HH:MM:SS\", \"venue_id\", \
             \"matchday\"}], \"validation_notes\": [], \"confidence_score\": 0-100}\n",
        );

        prompt
    }
}

/// Extracts the first JSON object from a model answer; text after it is ignored.
pub fn parse_ai_schedule(response: &str) -> Result<GeneratedSchedule, AssistantError> {
    let Some(start) = response.find('{') else {
        return Err(AssistantError::InvalidResponse(String::from("no JSON object found")));
    };

    serde_json::Deserializer::from_str(&response[start..])
        .into_iter::<GeneratedSchedule>()
        .next()
        .ok_or_else(|| AssistantError::InvalidResponse(String::from("no JSON object found")))?
        .map_err(|e| AssistantError::InvalidResponse(e.to_string()))
}

/// Checks a model-produced schedule against the request and fills in names.
pub fn validate_ai_schedule(
    request: &ScheduleRequest,
    mut schedule: GeneratedSchedule,
) -> Result<GeneratedSchedule, AssistantError> {
    if schedule.matches.is_empty() {
        return Err(AssistantError::Rejected(String::from("no matches")));
    }

    let team_ids: HashSet<u32> = request.team_ids().into_iter().collect();
    let mut slots = HashSet::new();

    for m in schedule.matches.iter_mut() {
        if m.home_team_id == m.away_team_id {
            return Err(AssistantError::Rejected(format!(
                "team {} plays itself",
                m.home_team_id
            )));
        }

        if let Some(unknown) = m.teams().into_iter().find(|id| !team_ids.contains(id)) {
            return Err(AssistantError::Rejected(format!("unknown team {}", unknown)));
        }

        if let Some(period) = is_vacation_day(&request.vacation_periods, m.match_date) {
            return Err(AssistantError::Rejected(format!(
                "match on {} falls in {}",
                m.match_date, period.name
            )));
        }

        if !slots.insert((m.match_date, m.venue_id, m.match_time)) {
            return Err(AssistantError::Rejected(format!(
                "slot {} {} used twice",
                m.match_date, m.match_time
            )));
        }

        m.home_team_name = request.team_name(m.home_team_id);
        m.away_team_name = request.team_name(m.away_team_id);
        m.venue_name = m.venue_id.and_then(|id| request.venue_name(id));
    }

    schedule.matches.sort_by(|a, b| {
        a.match_date
            .cmp(&b.match_date)
            .then(a.match_time.cmp(&b.match_time))
    });
    schedule.matchdays = ScheduleGenerator::matchdays(&schedule.matches);
    schedule.confidence_score = schedule.confidence_score.min(100);

    Ok(schedule)
}

/// Uses the assistant when requested; any failure falls back to the local generator.
pub async fn generate_schedule<A: ScheduleAssistant>(
    request: &ScheduleRequest,
    assistant: &A,
) -> GeneratedSchedule {
    if request.ai_provider == AiProvider::Local {
        return ScheduleGenerator::generate(request);
    }

    let prompt = AiPrompt::build(request);

    let result = match assistant.complete(prompt).await {
        Ok(response) => parse_ai_schedule(&response).and_then(|s| validate_ai_schedule(request, s)),
        Err(e) => Err(e),
    };

    match result {
        Ok(schedule) => {
            info!(
                "schedule: assistant produced {} matches for {}",
                schedule.matches.len(),
                request.config.competition_name
            );
            schedule
        }
        Err(e) => {
            warn!("schedule: {}, using local generator", e);

            let mut schedule = ScheduleGenerator::generate(request);
            schedule
                .validation_notes
                .insert(0, format!("AI scheduling failed ({}), local generator used", e));
            schedule
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{ScheduleConfig, ScheduleTeam};
    use chrono::NaiveDate;

    struct FixedAssistant(Result<String, ()>);

    impl ScheduleAssistant for FixedAssistant {
        async fn complete(&self, _prompt: String) -> Result<String, AssistantError> {
            self.0
                .clone()
                .map_err(|_| AssistantError::Unavailable(String::from("offline")))
        }
    }

    fn request(provider: AiProvider) -> ScheduleRequest {
        ScheduleRequest {
            config: ScheduleConfig {
                competition_name: String::from("Beker"),
                competition_type: Default::default(),
                start_date: NaiveDate::from_ymd_opt(2024, 9, 2).unwrap(),
                end_date: None,
                match_days: vec![chrono::Weekday::Sat],
                time_slots: vec![chrono::NaiveTime::from_hms_opt(10, 0, 0).unwrap()],
                venues: Vec::new(),
                double_round: false,
                matches_per_matchday: None,
            },
            teams: vec![
                ScheduleTeam { team_id: 1, team_name: String::from("Noord") },
                ScheduleTeam { team_id: 2, team_name: String::from("Zuid") },
            ],
            team_preferences: Vec::new(),
            vacation_periods: Vec::new(),
            ai_provider: provider,
        }
    }

    const ANSWER: &str = r#"Here is the schedule:
        {"matches": [{"home_team_id": 1, "away_team_id": 2, "match_date": "2024-09-07",
          "match_time": "10:00:00", "matchday": 1}], "validation_notes": [], "confidence_score": 90}
        Good luck!"#;

    #[test]
    fn test_parse_extracts_embedded_json() {
        let schedule = parse_ai_schedule(ANSWER).unwrap();

        assert_eq!(schedule.matches.len(), 1);
        assert_eq!(schedule.confidence_score, 90);
        assert!(parse_ai_schedule("no json here").is_err());
    }

    #[test]
    fn test_parse_ignores_braces_after_first_object() {
        let answer = format!("{} Note: shape was {{\"matches\": []}}", ANSWER.trim());
        let schedule = parse_ai_schedule(&answer).unwrap();

        assert_eq!(schedule.matches.len(), 1);
        assert_eq!(schedule.confidence_score, 90);
    }

    #[test]
    fn test_validate_rejects_unknown_team() {
        let req = request(AiProvider::Ollama);
        let mut schedule = parse_ai_schedule(ANSWER).unwrap();
        schedule.matches[0].away_team_id = 9;

        assert!(validate_ai_schedule(&req, schedule).is_err());
    }

    #[tokio::test]
    async fn test_assistant_schedule_is_used() {
        let req = request(AiProvider::Ollama);
        let schedule = generate_schedule(&req, &FixedAssistant(Ok(ANSWER.to_string()))).await;

        assert_eq!(schedule.confidence_score, 90);
        assert_eq!(schedule.matches[0].home_team_name, "Noord");
        assert_eq!(schedule.matchdays.len(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_assistant_falls_back() {
        let req = request(AiProvider::Ollama);
        let schedule = generate_schedule(&req, &FixedAssistant(Err(()))).await;

        assert_eq!(schedule.matches.len(), 1);
        assert!(schedule.validation_notes[0].contains("local generator"));
    }

    #[test]
    fn test_prompt_lists_teams() {
        let prompt = AiPrompt::build(&request(AiProvider::Ollama));

        assert!(prompt.contains("Noord (id 1)"));
        assert!(prompt.contains("JSON"));
    }
}
