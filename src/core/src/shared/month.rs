use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Calendar month used as a grouping key in financial reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        YearMonth { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_follows_calendar() {
        let dec = YearMonth::new(2024, 12);
        let jan = YearMonth::new(2025, 1);

        assert!(dec < jan);
        assert_eq!(jan.to_string(), "2025-01");
    }

    #[test]
    fn test_of_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let month = YearMonth::of(date);

        assert_eq!(month, YearMonth::new(2024, 3));
        assert!(month.contains(date));
    }
}
