//! Proleptic Gregorian ("civil") calendar

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{parse_ymd, CalendarDate, Jdn};
use crate::core::error::TaqwimError;

/// A proleptic Gregorian calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CivilDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CivilDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn is_leap_year(year: i32) -> bool {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    }

    pub fn days_in_month(year: i32, month: u32) -> u32 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            _ => 28,
        }
    }
}

impl CalendarDate for CivilDate {
    fn year(&self) -> i32 {
        self.year
    }

    fn month(&self) -> u32 {
        self.month
    }

    fn day_of_month(&self) -> u32 {
        self.day
    }

    fn to_jdn(&self) -> Jdn {
        let a = i64::from(14 - self.month as i32) / 12;
        let y = i64::from(self.year) + 4800 - a;
        let m = i64::from(self.month) + 12 * a - 3;
        Jdn(i64::from(self.day) + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045)
    }

    fn from_jdn(jdn: Jdn) -> Self {
        let a = jdn.0 + 32044;
        let b = (4 * a + 3) / 146097;
        let c = a - 146097 * b / 4;
        let d = (4 * c + 3) / 1461;
        let e = c - 1461 * d / 4;
        let m = (5 * e + 2) / 153;
        Self {
            day: (e - (153 * m + 2) / 5 + 1) as u32,
            month: (m + 3 - 12 * (m / 10)) as u32,
            year: (100 * b + d - 4800 + m / 10) as i32,
        }
    }
}

impl fmt::Display for CivilDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CivilDate {
    type Err = TaqwimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_ymd(s)?;
        if day > Self::days_in_month(year, month) {
            return Err(TaqwimError::InvalidDate(s.to_string()));
        }
        Ok(Self::new(year, month, day))
    }
}
