//! Islamic (Hijri) calendar, tabular civil-epoch variant
//!
//! Arithmetic scheme: 12 alternating 30/29-day months with 11 leap days
//! per 30-year cycle, counted from the civil epoch (1 Muharram 1 AH =
//! JDN 1948440). Observation-based calendars can differ from this by a
//! day or two.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{parse_ymd, CalendarDate, Jdn};
use crate::core::error::TaqwimError;

/// 1 Muharram 1 AH in the civil reckoning.
const ISLAMIC_EPOCH_JDN: i64 = 1_948_440;

/// A tabular Islamic calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct IslamicDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl IslamicDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn is_leap_year(year: i32) -> bool {
        (i64::from(year) * 11 + 14).rem_euclid(30) < 11
    }

    pub fn days_in_month(year: i32, month: u32) -> u32 {
        match month {
            12 if Self::is_leap_year(year) => 30,
            m if m % 2 == 1 => 30,
            _ => 29,
        }
    }
}

impl CalendarDate for IslamicDate {
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
        let y = i64::from(self.year);
        let m = i64::from(self.month);
        // (59(m-1)+1)/2 is ceil(29.5 * (m-1)): months alternate 30/29 days
        Jdn(i64::from(self.day)
            + (59 * (m - 1) + 1) / 2
            + 354 * (y - 1)
            + (3 + 11 * y).div_euclid(30)
            + ISLAMIC_EPOCH_JDN
            - 1)
    }

    fn from_jdn(jdn: Jdn) -> Self {
        let year = (30 * (jdn.0 - ISLAMIC_EPOCH_JDN) + 10_646).div_euclid(10_631) as i32;
        let past_first_month = jdn.0 - 29 - Self::new(year, 1, 1).to_jdn().0;
        let month = (((past_first_month as f64 / 29.5).ceil() as i64) + 1).clamp(1, 12) as u32;
        let day = (jdn.0 - Self::new(year, month, 1).to_jdn().0 + 1) as u32;
        Self::new(year, month, day)
    }
}

impl fmt::Display for IslamicDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for IslamicDate {
    type Err = TaqwimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_ymd(s)?;
        if day > Self::days_in_month(year, month) {
            return Err(TaqwimError::InvalidDate(s.to_string()));
        }
        Ok(Self::new(year, month, day))
    }
}
