//! Solar and lunar computations
//!
//! Low-precision formulas sufficient for prayer times and day/night
//! classification at one-degree granularity.

pub mod moon;
pub mod sun;

pub use moon::{draw_moon, moon_phase, MoonSilhouette};
pub use sun::{day_window, prayer_times, CalculationMethod, PrayerTimes, SolarWindow};
