//! Weekday model

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Day of the week, ordered Monday first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

/// Monday through Friday
pub const WEEKDAYS: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

/// The full week, Monday through Sunday
pub const ALL_DAYS: [Day; 7] = [
    Day::Mon,
    Day::Tue,
    Day::Wed,
    Day::Thu,
    Day::Fri,
    Day::Sat,
    Day::Sun,
];

impl Day {
    pub fn short_name(&self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self, Day::Sat | Day::Sun)
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

impl FromStr for Day {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ALL_DAYS
            .iter()
            .copied()
            .find(|d| d.short_name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::Validation(format!("Unknown day '{}'", s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_parse() {
        assert_eq!("Mon".parse::<Day>().unwrap(), Day::Mon);
        assert_eq!(" sun ".parse::<Day>().unwrap(), Day::Sun);
        assert!("Funday".parse::<Day>().is_err());
    }

    #[test]
    fn test_day_order() {
        let mut days = vec![Day::Sun, Day::Wed, Day::Mon];
        days.sort();
        assert_eq!(days, vec![Day::Mon, Day::Wed, Day::Sun]);
        assert!(Day::Sat.is_weekend());
        assert!(!Day::Fri.is_weekend());
    }
}
