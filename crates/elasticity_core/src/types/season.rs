//! Calendar seasons.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::DataError;

/// Meteorological season of the northern hemisphere.
///
/// Seasonal demand factors are computed per season from historical sales.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use elasticity_core::types::Season;
///
/// let date = NaiveDate::from_ymd_opt(2024, 12, 24).unwrap();
/// assert_eq!(Season::from_date(date), Season::Winter);
/// assert_eq!("summer".parse::<Season>().unwrap(), Season::Summer);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    /// December, January, February
    Winter,
    /// March, April, May
    Spring,
    /// June, July, August
    Summer,
    /// September, October, November
    Fall,
}

impl Season {
    /// All seasons in calendar order starting from winter.
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    /// Season a calendar date falls in.
    pub fn from_date(date: NaiveDate) -> Self {
        match date.month() {
            12 | 1 | 2 => Season::Winter,
            3..=5 => Season::Spring,
            6..=8 => Season::Summer,
            _ => Season::Fall,
        }
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Season {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "spring" => Ok(Season::Spring),
            "summer" => Ok(Season::Summer),
            "fall" | "autumn" => Ok(Season::Fall),
            _ => Err(DataError::unknown_variant("season", s)),
        }
    }
}
