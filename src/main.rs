//! Taqwim - Entry Point
//!
//! Command-line front end for the calendar core: date conversion,
//! event lookup, prayer times, and world map rendering.

use std::path::PathBuf;
use std::time::SystemTime;

use clap::{Parser, Subcommand, ValueEnum};

use taqwim::astronomy::{moon_phase, prayer_times, CalculationMethod};
use taqwim::calendar::{CalendarDate, CivilDate, IslamicDate, Jdn, PersianDate};
use taqwim::core::error::{Result, TaqwimError};
use taqwim::core::types::{Coordinates, Moment};
use taqwim::core::RenderConfig;
use taqwim::events::{load_events, CalendarEvent, EventsStore};
use taqwim::map::MapRenderer;

#[derive(Parser)]
#[command(name = "taqwim", about = "Persian calendar toolbox", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CalendarKind {
    Civil,
    Persian,
    Islamic,
}

#[derive(Subcommand)]
enum Command {
    /// Render the world map to a PNG file
    Map {
        /// Gzipped path-data asset
        input: PathBuf,
        /// Output PNG path
        output: PathBuf,
        /// Skip the day/night overlay
        #[arg(long)]
        plain: bool,
        /// Civil date for the overlay, defaults to today (UTC)
        #[arg(long)]
        date: Option<String>,
        /// UTC hour for the overlay, defaults to now
        #[arg(long)]
        hour: Option<f64>,
    },
    /// Convert a date between calendar systems
    Convert {
        /// Date as year-month-day
        date: String,
        #[arg(long, value_enum, default_value = "civil")]
        from: CalendarKind,
        #[arg(long, value_enum, default_value = "persian")]
        to: CalendarKind,
    },
    /// List calendar events for a date
    Events {
        /// Date as year-month-day, in the events file's calendar
        date: String,
        /// JSON events file
        #[arg(long)]
        file: PathBuf,
        /// Optional device events file, listed first
        #[arg(long)]
        device_file: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "persian")]
        calendar: CalendarKind,
    },
    /// Print prayer times for a location and civil date
    Sun {
        /// Date as year-month-day
        date: String,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("taqwim=info")
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Map {
            input,
            output,
            plain,
            date,
            hour,
        } => render_map(&input, &output, plain, date.as_deref(), hour),
        Command::Convert { date, from, to } => convert(&date, from, to),
        Command::Events {
            date,
            file,
            device_file,
            calendar,
        } => match calendar {
            CalendarKind::Civil => list_events::<CivilDate>(&date, &file, device_file.as_deref()),
            CalendarKind::Persian => {
                list_events::<PersianDate>(&date, &file, device_file.as_deref())
            }
            CalendarKind::Islamic => {
                list_events::<IslamicDate>(&date, &file, device_file.as_deref())
            }
        },
        Command::Sun { date, lat, lon } => sun(&date, lat, lon),
    }
}

fn moment_for(date: Option<&str>, hour: Option<f64>) -> Result<Moment> {
    let now = Moment::from_system_time(SystemTime::now());
    let date = match date {
        Some(text) => text.parse::<CivilDate>()?,
        None => now.date,
    };
    Ok(Moment::new(date, hour.unwrap_or(now.utc_hour)))
}

fn render_map(
    input: &std::path::Path,
    output: &std::path::Path,
    plain: bool,
    date: Option<&str>,
    hour: Option<f64>,
) -> Result<()> {
    let compressed = std::fs::read(input)?;
    let renderer = MapRenderer::new(RenderConfig::default(), CalculationMethod::default());
    let moment = if plain {
        None
    } else {
        Some(moment_for(date, hour)?)
    };

    tracing::info!("rendering {}x{} map", renderer.config.base_width, renderer.config.base_height);
    let rendered = renderer.render(&compressed, moment.as_ref())?;
    let img = rendered.day_night.unwrap_or(rendered.base);
    img.save(output)
        .map_err(|e| TaqwimError::Raster(e.to_string()))?;
    tracing::info!("wrote {}", output.display());
    Ok(())
}

fn convert(date: &str, from: CalendarKind, to: CalendarKind) -> Result<()> {
    let jdn = match from {
        CalendarKind::Civil => date.parse::<CivilDate>()?.to_jdn(),
        CalendarKind::Persian => date.parse::<PersianDate>()?.to_jdn(),
        CalendarKind::Islamic => date.parse::<IslamicDate>()?.to_jdn(),
    };
    match to {
        CalendarKind::Civil => println!("{}", CivilDate::from_jdn(jdn)),
        CalendarKind::Persian => println!("{}", PersianDate::from_jdn(jdn)),
        CalendarKind::Islamic => println!("{}", IslamicDate::from_jdn(jdn)),
    }
    Ok(())
}

fn list_events<D>(
    date: &str,
    file: &std::path::Path,
    device_file: Option<&std::path::Path>,
) -> Result<()>
where
    D: CalendarDate + std::str::FromStr<Err = TaqwimError> + for<'de> serde::Deserialize<'de>,
{
    let date: D = date.parse()?;
    let store = EventsStore::new(load_events::<D>(file)?);
    let device_store = match device_file {
        Some(path) => EventsStore::new(load_events::<D>(path)?),
        None => EventsStore::empty(),
    };
    let events: Vec<&CalendarEvent<D>> = store.events_with_device(&date, &device_store);
    if events.is_empty() {
        println!("no events");
    }
    for event in events {
        let marker = if event.holiday { " (holiday)" } else { "" };
        println!("{}{marker}", event.title);
    }
    Ok(())
}

fn sun(date: &str, lat: f64, lon: f64) -> Result<()> {
    let date: CivilDate = date.parse()?;
    let coords = Coordinates::new(lat, lon, 0.0);
    let Jdn(jdn) = date.to_jdn();
    match prayer_times(date, &coords, CalculationMethod::default()) {
        Some(times) => {
            println!("fajr    {}", format_hour(times.fajr));
            println!("sunrise {}", format_hour(times.sunrise));
            println!("dhuhr   {}", format_hour(times.dhuhr));
            println!("sunset  {}", format_hour(times.sunset));
            println!("maghrib {}", format_hour(times.maghrib));
        }
        None => println!("sun does not cross the horizon angles on this date"),
    }
    println!("moon    {:.0}% of cycle", moon_phase(jdn as f64) * 100.0);
    Ok(())
}

/// Format a fractional local mean solar hour as hh:mm.
fn format_hour(hour: f64) -> String {
    let minutes = (hour.rem_euclid(24.0) * 60.0).round() as u32;
    format!("{:02}:{:02}", minutes / 60 % 24, minutes % 60)
}
