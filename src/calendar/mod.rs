//! Calendar systems and date conversion
//!
//! All conversions go through the Julian Day Number, a continuous day
//! count shared by every calendar system. Each date type converts to and
//! from [`Jdn`] exactly, so cross-calendar conversion is two hops.

pub mod civil;
pub mod islamic;
pub mod persian;

pub use civil::CivilDate;
pub use islamic::IslamicDate;
pub use persian::PersianDate;

use crate::core::error::{Result, TaqwimError};

/// Julian Day Number: the calendar-agnostic day key
///
/// Integer day count where day boundaries fall at noon UT; JDN 2451545
/// is 2000-01-01 (Gregorian).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Jdn(pub i64);

impl Jdn {
    /// Day of week, 0 = Saturday through 6 = Friday (Persian week order).
    pub fn weekday(&self) -> u32 {
        ((self.0 + 2).rem_euclid(7)) as u32
    }
}

/// A date in some calendar system
///
/// Year may be the sentinel `-1` on event dates, meaning "recurs every
/// year"; conversion methods are only defined for real years.
pub trait CalendarDate: Sized {
    fn year(&self) -> i32;
    fn month(&self) -> u32;
    fn day_of_month(&self) -> u32;

    fn to_jdn(&self) -> Jdn;
    fn from_jdn(jdn: Jdn) -> Self;

    /// Composite (month, day) key used by the event index.
    ///
    /// Deliberately excludes the year: events on the same month/day of
    /// different years share a key and are filtered at lookup time.
    fn month_day_key(&self) -> u32 {
        self.month() * 100 + self.day_of_month()
    }
}

/// Parse a `year-month-day` string, e.g. `1403-1-1` or `2024-03-20`.
pub(crate) fn parse_ymd(input: &str) -> Result<(i32, u32, u32)> {
    // A leading '-' belongs to a negative year
    let text = input.strip_prefix('-').unwrap_or(input);
    let mut fields = text.splitn(3, '-').map(str::trim);
    let year_text = fields
        .next()
        .ok_or_else(|| TaqwimError::InvalidDate(input.to_string()))?;
    let year: i32 = year_text
        .parse()
        .map_err(|_| TaqwimError::InvalidDate(input.to_string()))?;
    let year = if input.starts_with('-') { -year } else { year };
    let month: u32 = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| TaqwimError::InvalidDate(input.to_string()))?;
    let day: u32 = fields
        .next()
        .and_then(|f| f.parse().ok())
        .ok_or_else(|| TaqwimError::InvalidDate(input.to_string()))?;
    if month == 0 || month > 12 || day == 0 || day > 31 {
        return Err(TaqwimError::InvalidDate(input.to_string()));
    }
    Ok((year, month, day))
}
