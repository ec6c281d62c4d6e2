//! Core value types used throughout the codebase

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::calendar::{CalendarDate, CivilDate, Jdn};

/// Unix epoch (1970-01-01) as a Julian Day Number.
const UNIX_EPOCH_JDN: i64 = 2_440_588;

/// Geographic coordinates of an observer or grid cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
    /// Elevation above sea level in meters
    pub elevation: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64, elevation: f64) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
        }
    }
}

/// A civil date paired with a UTC time of day
///
/// The fractional hour is kept separate from the date so per-longitude
/// local mean time can be derived without timezone tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Moment {
    /// UTC calendar date
    pub date: CivilDate,
    /// UTC time of day as a fractional hour in [0, 24)
    pub utc_hour: f64,
}

impl Moment {
    pub fn new(date: CivilDate, utc_hour: f64) -> Self {
        Self {
            date,
            utc_hour: utc_hour.rem_euclid(24.0),
        }
    }

    /// Current moment from the system clock.
    pub fn from_system_time(now: SystemTime) -> Self {
        let secs = now
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0);
        let days = secs.div_euclid(86_400);
        let day_secs = secs.rem_euclid(86_400);
        Self {
            date: CivilDate::from_jdn(Jdn(UNIX_EPOCH_JDN + days)),
            utc_hour: day_secs as f64 / 3_600.0,
        }
    }

    /// Local mean solar hour at the given longitude, in [0, 24).
    ///
    /// One hour per 15 degrees of longitude, positive east.
    pub fn local_mean_hour(&self, longitude: f64) -> f64 {
        (self.utc_hour + longitude / 15.0).rem_euclid(24.0)
    }

    /// The date as a fractional Julian day, at this moment's UTC hour.
    pub fn julian_day(&self) -> f64 {
        self.date.to_jdn().0 as f64 + (self.utc_hour - 12.0) / 24.0
    }
}
