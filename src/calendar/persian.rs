//! Persian (Jalali) calendar
//!
//! Uses the Borkowski break-year algorithm: leap years follow 33-year
//! sub-cycles whose boundaries are taken from a table of break years, which
//! keeps the arithmetic calendar in agreement with the astronomical one for
//! the whole supported range (years -61 to 3177 AP).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{parse_ymd, CalendarDate, CivilDate, Jdn};
use crate::core::error::TaqwimError;

/// Years in which the 33-year leap sub-cycle is re-anchored.
const BREAK_YEARS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

/// A Persian (Jalali) calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PersianDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Leap status and Farvardin 1 location for one Persian year.
struct YearAnchor {
    /// Number of years since the last leap year (0 = this year is leap)
    leap: i32,
    /// Gregorian year containing Farvardin 1
    gregorian_year: i32,
    /// Day of March on which Farvardin 1 falls
    march_day: i32,
}

/// Locate a Persian year inside its 33-year sub-cycle.
fn year_anchor(jy: i32) -> YearAnchor {
    let gy = jy + 621;
    let mut leap_j: i64 = -14;
    let mut jp = BREAK_YEARS[0];
    let mut jump = 0;
    for &jm in &BREAK_YEARS[1..] {
        jump = jm - jp;
        if jy < jm {
            break;
        }
        leap_j += i64::from(jump / 33) * 8 + i64::from((jump % 33) / 4);
        jp = jm;
    }
    let mut n = jy - jp;
    leap_j += i64::from(n / 33) * 8 + i64::from((n % 33 + 3) / 4);
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }
    let leap_g = i64::from(gy) / 4 - (i64::from(gy) / 100 + 1) * 3 / 4 - 150;
    let march_day = (20 + leap_j - leap_g) as i32;
    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }
    YearAnchor {
        leap,
        gregorian_year: gy,
        march_day,
    }
}

impl PersianDate {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    pub fn is_leap_year(year: i32) -> bool {
        year_anchor(year).leap == 0
    }

    pub fn days_in_month(year: i32, month: u32) -> u32 {
        match month {
            1..=6 => 31,
            7..=11 => 30,
            12 if Self::is_leap_year(year) => 30,
            _ => 29,
        }
    }
}

impl CalendarDate for PersianDate {
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
        let anchor = year_anchor(self.year);
        let farvardin1 =
            CivilDate::new(anchor.gregorian_year, 3, anchor.march_day as u32).to_jdn();
        let m = i64::from(self.month);
        Jdn(farvardin1.0 + (m - 1) * 31 - m / 7 * (m - 7) + i64::from(self.day) - 1)
    }

    fn from_jdn(jdn: Jdn) -> Self {
        let gy = CivilDate::from_jdn(jdn).year;
        let mut jy = gy - 621;
        let anchor = year_anchor(jy);
        let farvardin1 = CivilDate::new(anchor.gregorian_year, 3, anchor.march_day as u32).to_jdn();
        let mut k = jdn.0 - farvardin1.0;
        if k >= 0 {
            if k <= 185 {
                return Self::new(jy, 1 + (k / 31) as u32, (k % 31 + 1) as u32);
            }
            k -= 186;
        } else {
            jy -= 1;
            k += 179;
            if anchor.leap == 1 {
                k += 1;
            }
        }
        Self::new(jy, 7 + (k / 30) as u32, (k % 30 + 1) as u32)
    }
}

impl fmt::Display for PersianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for PersianDate {
    type Err = TaqwimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month, day) = parse_ymd(s)?;
        if day > Self::days_in_month(year, month) {
            return Err(TaqwimError::InvalidDate(s.to_string()));
        }
        Ok(Self::new(year, month, day))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nowruz_anchors() {
        // Farvardin 1 of recent years against the published calendar
        assert_eq!(
            PersianDate::new(1400, 1, 1).to_jdn(),
            CivilDate::new(2021, 3, 21).to_jdn()
        );
        assert_eq!(
            PersianDate::new(1403, 1, 1).to_jdn(),
            CivilDate::new(2024, 3, 20).to_jdn()
        );
        assert_eq!(
            PersianDate::new(1404, 1, 1).to_jdn(),
            CivilDate::new(2025, 3, 21).to_jdn()
        );
    }

    #[test]
    fn leap_years_follow_33_year_cycle() {
        assert!(PersianDate::is_leap_year(1399));
        assert!(PersianDate::is_leap_year(1403));
        assert!(!PersianDate::is_leap_year(1400));
        assert!(!PersianDate::is_leap_year(1404));
        assert_eq!(PersianDate::days_in_month(1403, 12), 30);
        assert_eq!(PersianDate::days_in_month(1404, 12), 29);
    }

    #[test]
    fn jdn_inverse_across_year_boundary() {
        for &(y, m, d) in &[
            (1403, 1, 1),
            (1403, 6, 31),
            (1403, 7, 1),
            (1403, 12, 30),
            (1404, 1, 1),
            (1380, 11, 15),
        ] {
            let date = PersianDate::new(y, m, d);
            assert_eq!(PersianDate::from_jdn(date.to_jdn()), date, "{date}");
        }
    }

    #[test]
    fn month_arithmetic() {
        // Month 7 starts 186 days into the year
        let first = PersianDate::new(1402, 1, 1).to_jdn();
        let mehr = PersianDate::new(1402, 7, 1).to_jdn();
        assert_eq!(mehr.0 - first.0, 186);
    }
}
