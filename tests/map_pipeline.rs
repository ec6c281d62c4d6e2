//! End-to-end tests for the world map pipeline

use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use taqwim::astronomy::CalculationMethod;
use taqwim::calendar::CivilDate;
use taqwim::core::types::Moment;
use taqwim::core::RenderConfig;
use taqwim::events::{load_events, CalendarEvent, EventsStore};
use taqwim::map::{render_in_background, MapRenderer, NightMask};

fn gzip(text: &str) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(text.as_bytes()).unwrap();
    encoder.finish().unwrap()
}

/// Two rectangles standing in for continents, in a 36x18 coordinate space.
const CONTINENTS: &str = "M2 2L16 2 16 8 2 8ZM20 10L34 10 34 16 20 16Z";

#[test]
fn full_render_produces_base_and_composite() {
    let renderer = MapRenderer::new(
        RenderConfig::with_base_size(36, 18),
        CalculationMethod::Tehran,
    );
    let moment = Moment::new(CivilDate::new(2024, 6, 21), 12.0);
    let rendered = renderer.render(&gzip(CONTINENTS), Some(&moment)).unwrap();

    let base = &rendered.base;
    assert_eq!(base.get_pixel(8, 5).0, [0xBC, 0xBC, 0xBC, 0xFF]);
    assert_eq!(base.get_pixel(27, 13).0, [0xBC, 0xBC, 0xBC, 0xFF]);
    assert_eq!(base.get_pixel(18, 9).0[3], 0, "ocean stays transparent");

    let composite = rendered.day_night.unwrap();
    assert_eq!(composite.dimensions(), base.dimensions());
    // the overlay only darkens pixels, never brightens
    for (b, c) in base.pixels().zip(composite.pixels()) {
        assert!(c.0[0] <= b.0[0]);
    }
}

#[test]
fn renders_are_independent() {
    let renderer = MapRenderer::new(
        RenderConfig::with_base_size(36, 18),
        CalculationMethod::Tehran,
    );
    let moment = Moment::new(CivilDate::new(2024, 6, 21), 0.0);
    let first = renderer.render(&gzip(CONTINENTS), Some(&moment)).unwrap();
    let second = renderer.render(&gzip(CONTINENTS), Some(&moment)).unwrap();
    assert_eq!(first.base.as_raw(), second.base.as_raw());
    assert_eq!(
        first.day_night.unwrap().as_raw(),
        second.day_night.unwrap().as_raw()
    );
}

#[test]
fn concurrent_background_renders() {
    let receivers: Vec<_> = (0..4)
        .map(|hour| {
            let renderer = MapRenderer::new(
                RenderConfig::with_base_size(36, 18),
                CalculationMethod::Tehran,
            );
            let moment = Moment::new(CivilDate::new(2024, 3, 20), f64::from(hour) * 6.0);
            render_in_background(renderer, gzip(CONTINENTS), Some(moment))
        })
        .collect();
    for rx in receivers {
        let rendered = rx.recv().unwrap().unwrap();
        assert!(rendered.day_night.is_some());
    }
}

#[test]
fn night_mask_terminator_moves_with_the_hour() {
    let config = RenderConfig::default();
    let morning = Moment::new(CivilDate::new(2024, 3, 20), 6.0);
    let evening = Moment::new(CivilDate::new(2024, 3, 20), 18.0);
    let mask_morning = NightMask::compute(&morning, CalculationMethod::Tehran, &config);
    let mask_evening = NightMask::compute(&evening, CalculationMethod::Tehran, &config);
    // at 06:00 UTC the sun stands over ~90E; at 18:00 over ~90W
    assert_eq!(mask_morning.is_night(0, 90), Some(false));
    assert_eq!(mask_morning.is_night(0, -90), Some(true));
    assert_eq!(mask_evening.is_night(0, 90), Some(true));
    assert_eq!(mask_evening.is_night(0, -90), Some(false));
}

#[test]
fn night_mask_roughly_splits_the_equator() {
    let moment = Moment::new(CivilDate::new(2024, 3, 20), 12.0);
    let mask = NightMask::compute(&moment, CalculationMethod::Tehran, &RenderConfig::default());
    let night_cells = (-180..180)
        .filter(|&lon| mask.is_night(0, lon) == Some(true))
        .count();
    // prayer-time twilight angles shrink the night side a bit below half
    assert!((120..=180).contains(&night_cells), "night cells: {night_cells}");
}

#[test]
fn event_file_roundtrip() {
    let events = vec![
        CalendarEvent::new(CivilDate::new(-1, 1, 1), "New Year", true),
        CalendarEvent::new(CivilDate::new(2024, 3, 20), "Equinox", false),
    ];
    let path = std::env::temp_dir().join("taqwim-events-test.json");
    std::fs::write(&path, serde_json::to_string(&events).unwrap()).unwrap();
    let loaded = load_events::<CivilDate>(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let store = EventsStore::new(loaded);
    let on_equinox = store.events_for(&CivilDate::new(2024, 3, 20));
    assert_eq!(on_equinox.len(), 1);
    assert_eq!(on_equinox[0].title, "Equinox");
    let on_new_year = store.events_for(&CivilDate::new(2031, 1, 1));
    assert_eq!(on_new_year.len(), 1);
    assert!(on_new_year[0].holiday);
}
