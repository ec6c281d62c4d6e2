//! Calendar event index
//!
//! Events are grouped once, at construction, by their (month, day) key and
//! never mutated afterwards, so a built store can be read from any number
//! of threads without synchronization. The year is left out of the key on
//! purpose: yearly-recurring events carry the sentinel year `-1` and are
//! filtered at lookup time instead of index-build time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::calendar::CalendarDate;
use crate::core::error::Result;

/// Sentinel year on an event date meaning "recurs every year".
pub const EVERY_YEAR: i32 = -1;

/// A single calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent<D> {
    /// Event date; `date.year() == EVERY_YEAR` matches any year
    pub date: D,
    /// Event title
    pub title: String,
    /// Whether the day is a holiday
    #[serde(default)]
    pub holiday: bool,
}

impl<D: CalendarDate> CalendarEvent<D> {
    pub fn new(date: D, title: impl Into<String>, holiday: bool) -> Self {
        Self {
            date,
            title: title.into(),
            holiday,
        }
    }

    /// Does this event occur on the given date?
    fn occurs_on(&self, date: &D) -> bool {
        // month and day already matched through the store key
        self.date.year() == date.year() || self.date.year() == EVERY_YEAR
    }
}

/// Immutable per-date event index
///
/// Group lookup is O(1) on the composite `month * 100 + day` key;
/// insertion order is preserved inside each group.
#[derive(Debug, Clone)]
pub struct EventsStore<D> {
    store: HashMap<u32, Vec<CalendarEvent<D>>>,
}

impl<D: CalendarDate> EventsStore<D> {
    pub fn new(events: impl IntoIterator<Item = CalendarEvent<D>>) -> Self {
        let mut store: HashMap<u32, Vec<CalendarEvent<D>>> = HashMap::new();
        for event in events {
            store.entry(event.date.month_day_key()).or_default().push(event);
        }
        Self { store }
    }

    /// Placeholder store for uninitialized state.
    pub fn empty() -> Self {
        Self {
            store: HashMap::new(),
        }
    }

    /// All events occurring on the given date, in insertion order.
    ///
    /// A date with no events yields an empty vector, never an error.
    pub fn events_for(&self, date: &D) -> Vec<&CalendarEvent<D>> {
        self.store
            .get(&date.month_day_key())
            .map(|group| group.iter().filter(|e| e.occurs_on(date)).collect())
            .unwrap_or_default()
    }

    /// Events for a date merged with a device-sourced store.
    ///
    /// Device events come first; each source keeps its own insertion order.
    pub fn events_with_device<'a>(
        &'a self,
        date: &D,
        device_events: &'a EventsStore<D>,
    ) -> Vec<&'a CalendarEvent<D>> {
        let mut merged = device_events.events_for(date);
        merged.extend(self.events_for(date));
        merged
    }

    pub fn len(&self) -> usize {
        self.store.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

/// Load events from a JSON file (an array of [`CalendarEvent`] objects).
pub fn load_events<D>(path: &Path) -> Result<Vec<CalendarEvent<D>>>
where
    D: CalendarDate + for<'de> Deserialize<'de>,
{
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}
