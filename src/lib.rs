//! Taqwim - Persian calendar computational core
//!
//! Date conversion between calendar systems, a per-date calendar event
//! index, prayer-time astronomy, and day/night world map rendering.

pub mod astronomy;
pub mod calendar;
pub mod core;
pub mod events;
pub mod map;
