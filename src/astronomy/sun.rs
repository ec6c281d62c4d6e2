//! Solar position and prayer-time computation
//!
//! Uses the standard low-precision solar ephemeris (declination and
//! equation of time from the day number) and the spherical hour-angle
//! formula for the time at which the Sun reaches a given depression angle.
//! Accuracy is a couple of minutes, well inside the one-degree grid used
//! by the night mask.
//!
//! All returned times are fractional hours of local mean solar time, so
//! no timezone tables are involved; see [`crate::core::types::Moment`] for
//! the matching hour-of-day frame.

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarDate, CivilDate};
use crate::core::types::Coordinates;

/// Depression angle for sunrise/sunset: refraction plus solar semidiameter.
const HORIZON_DEPRESSION_DEG: f64 = 0.833;

/// Prayer-time calculation method, selecting twilight depression angles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationMethod {
    /// Institute of Geophysics, University of Tehran (fajr 17.7, maghrib 4.5)
    Tehran,
    /// Muslim World League (fajr 18.0, maghrib at sunset)
    MuslimWorldLeague,
}

impl CalculationMethod {
    fn fajr_angle(&self) -> f64 {
        match self {
            CalculationMethod::Tehran => 17.7,
            CalculationMethod::MuslimWorldLeague => 18.0,
        }
    }

    fn maghrib_angle(&self) -> f64 {
        match self {
            CalculationMethod::Tehran => 4.5,
            CalculationMethod::MuslimWorldLeague => HORIZON_DEPRESSION_DEG,
        }
    }
}

impl Default for CalculationMethod {
    fn default() -> Self {
        CalculationMethod::Tehran
    }
}

/// Sun state for one day, from the low-precision ephemeris.
struct SolarBasis {
    declination_rad: f64,
    equation_of_time_h: f64,
}

fn solar_basis(jd: f64) -> SolarBasis {
    let d = jd - 2_451_545.0;
    let g = (357.529 + 0.985_600_28 * d).to_radians();
    let q = 280.459 + 0.985_647_36 * d;
    let l = (q + 1.915 * g.sin() + 0.020 * (2.0 * g).sin()).to_radians();
    let e = (23.439 - 0.000_000_36 * d).to_radians();
    let ra_h = (e.cos() * l.sin()).atan2(l.cos()).to_degrees() / 15.0;
    let mut eqt = (q / 15.0).rem_euclid(24.0) - ra_h.rem_euclid(24.0);
    if eqt > 12.0 {
        eqt -= 24.0;
    } else if eqt < -12.0 {
        eqt += 24.0;
    }
    SolarBasis {
        declination_rad: (e.sin() * l.sin()).asin(),
        equation_of_time_h: eqt,
    }
}

/// When (if ever) the Sun crosses a given depression angle.
enum Crossing {
    /// Hours between solar noon and the crossing
    At(f64),
    /// The Sun never climbs above the angle (polar night for that angle)
    AlwaysBelow,
    /// The Sun never sinks below the angle (polar day for that angle)
    AlwaysAbove,
}

fn depression_crossing(latitude_deg: f64, declination_rad: f64, angle_deg: f64) -> Crossing {
    let lat = latitude_deg.to_radians();
    let angle = angle_deg.to_radians();
    let cos_h = (-angle.sin() - lat.sin() * declination_rad.sin())
        / (lat.cos() * declination_rad.cos());
    if cos_h > 1.0 {
        Crossing::AlwaysBelow
    } else if cos_h < -1.0 {
        Crossing::AlwaysAbove
    } else {
        Crossing::At(cos_h.acos().to_degrees() / 15.0)
    }
}

/// Daylight window for one coordinate and date
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolarWindow {
    /// Day runs from fajr (inclusive) to maghrib (exclusive),
    /// in local mean solar hours
    Window { fajr: f64, maghrib: f64 },
    /// The Sun never clears the maghrib angle: night all day
    PolarNight,
    /// The Sun never sets below the maghrib angle: day all day
    PolarDay,
}

impl SolarWindow {
    /// Night test over the half-open interval `[fajr, maghrib)`:
    /// an hour equal to fajr is day, an hour equal to maghrib is night.
    pub fn is_night(&self, hour: f64) -> bool {
        match *self {
            SolarWindow::Window { fajr, maghrib } => !(hour >= fajr && hour < maghrib),
            SolarWindow::PolarNight => true,
            SolarWindow::PolarDay => false,
        }
    }
}

/// Compute the day/night boundary window for a coordinate and date.
pub fn day_window(date: CivilDate, coords: &Coordinates, method: CalculationMethod) -> SolarWindow {
    let basis = solar_basis(date.to_jdn().0 as f64);
    let midday = 12.0 - basis.equation_of_time_h;
    match depression_crossing(coords.latitude, basis.declination_rad, method.maghrib_angle()) {
        Crossing::AlwaysBelow => SolarWindow::PolarNight,
        Crossing::AlwaysAbove => SolarWindow::PolarDay,
        Crossing::At(dusk) => {
            let fajr = match depression_crossing(
                coords.latitude,
                basis.declination_rad,
                method.fajr_angle(),
            ) {
                Crossing::At(dawn) => midday - dawn,
                // twilight never fully darkens: dawn at local midnight
                _ => midday - 12.0,
            };
            SolarWindow::Window {
                fajr: fajr.max(0.0),
                maghrib: (midday + dusk).min(24.0),
            }
        }
    }
}

/// Prayer times for one coordinate and date, in local mean solar hours
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrayerTimes {
    pub fajr: f64,
    pub sunrise: f64,
    pub dhuhr: f64,
    pub sunset: f64,
    pub maghrib: f64,
}

/// Compute prayer times; `None` at latitudes where the Sun does not cross
/// the required angles on that date.
pub fn prayer_times(
    date: CivilDate,
    coords: &Coordinates,
    method: CalculationMethod,
) -> Option<PrayerTimes> {
    let basis = solar_basis(date.to_jdn().0 as f64);
    let midday = 12.0 - basis.equation_of_time_h;
    let offset = |angle_deg: f64| match depression_crossing(
        coords.latitude,
        basis.declination_rad,
        angle_deg,
    ) {
        Crossing::At(h) => Some(h),
        _ => None,
    };
    let dawn = offset(method.fajr_angle())?;
    let rise = offset(HORIZON_DEPRESSION_DEG)?;
    let dusk = offset(method.maghrib_angle())?;
    Some(PrayerTimes {
        fajr: midday - dawn,
        sunrise: midday - rise,
        dhuhr: midday,
        sunset: midday + rise,
        maghrib: midday + dusk,
    })
}
