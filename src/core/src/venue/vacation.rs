use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacationPeriod {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl VacationPeriod {
    /// Both ends are inclusive.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.is_active && self.start_date <= date && date <= self.end_date
    }
}

pub fn is_vacation_day(periods: &[VacationPeriod], date: NaiveDate) -> Option<&VacationPeriod> {
    periods.iter().find(|p| p.contains(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(is_active: bool) -> VacationPeriod {
        VacationPeriod {
            id: 1,
            name: String::from("Kerstvakantie"),
            start_date: NaiveDate::from_ymd_opt(2024, 12, 21).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 5).unwrap(),
            is_active,
        }
    }

    #[test]
    fn test_contains_is_inclusive() {
        let p = period(true);

        assert!(p.contains(NaiveDate::from_ymd_opt(2024, 12, 21).unwrap()));
        assert!(p.contains(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()));
        assert!(!p.contains(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap()));
    }

    #[test]
    fn test_inactive_period_never_matches() {
        let periods = vec![period(false)];
        assert!(is_vacation_day(&periods, NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()).is_none());
    }
}
