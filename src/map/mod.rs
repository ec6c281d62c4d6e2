//! Day/night world map rendering
//!
//! The pipeline mirrors the bundled asset format: a gzip-compressed
//! path-data string is decompressed, parsed, and filled into the base
//! map; a 360x180 night mask is computed from per-cell dawn/dusk times
//! and composited over a copy of the base at a fixed alpha.
//!
//! Every render call allocates fresh buffers and shares nothing, so any
//! number of renders may run concurrently.

pub mod path;
pub mod raster;

use std::io::Read;
use std::sync::mpsc;
use std::thread;

use flate2::read::GzDecoder;
use image::{Rgba, RgbaImage};
use rayon::prelude::*;

use crate::astronomy::sun::{day_window, CalculationMethod};
use crate::core::config::RenderConfig;
use crate::core::error::Result;
use crate::core::types::{Coordinates, Moment};

/// Decompress the gzipped path-data asset into its text form.
pub fn decompress_path_data(bytes: &[u8]) -> Result<String> {
    let mut text = String::new();
    GzDecoder::new(bytes).read_to_string(&mut text)?;
    Ok(text)
}

/// Low-resolution night/day grid, one cell per degree
///
/// Cell (0, 0) is longitude -180, latitude -90; latitude 90 and
/// longitude 180 have no cells of their own (half-open degree ranges,
/// matching the mask dimensions).
#[derive(Debug, Clone)]
pub struct NightMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl NightMask {
    /// Compute the mask for a moment: a cell is night when its local
    /// mean hour falls outside that cell's `[fajr, maghrib)` window.
    pub fn compute(moment: &Moment, method: CalculationMethod, config: &RenderConfig) -> Self {
        let (width, height) = (config.mask_width, config.mask_height);
        let mut cells = vec![false; (width * height) as usize];
        cells
            .par_chunks_mut(width as usize)
            .enumerate()
            .for_each(|(row, line)| {
                let lat = row as i32 - height as i32 / 2;
                for (col, cell) in line.iter_mut().enumerate() {
                    let lon = col as i32 - width as i32 / 2;
                    let coords = Coordinates::new(f64::from(lat), f64::from(lon), 0.0);
                    let window = day_window(moment.date, &coords, method);
                    *cell = window.is_night(moment.local_mean_hour(f64::from(lon)));
                }
            });
        Self {
            width,
            height,
            cells,
        }
    }

    /// Build a mask from raw cells; row 0 is latitude -(height/2).
    pub fn from_cells(width: u32, height: u32, cells: Vec<bool>) -> Self {
        assert_eq!(cells.len(), (width * height) as usize);
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell lookup by mask coordinates.
    pub fn cell(&self, x: u32, y: u32) -> bool {
        self.cells[(y * self.width + x) as usize]
    }

    /// Cell lookup by integer degrees; `None` outside the half-open
    /// ranges `[-90, 90) x [-180, 180)` at default size.
    pub fn is_night(&self, latitude: i32, longitude: i32) -> Option<bool> {
        let x = longitude + self.width as i32 / 2;
        let y = latitude + self.height as i32 / 2;
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.cell(x as u32, y as u32))
    }
}

/// A finished render: the base map and, when a moment was supplied,
/// the day/night composite
#[derive(Debug, Clone)]
pub struct RenderedMap {
    pub base: RgbaImage,
    pub day_night: Option<RgbaImage>,
}

/// World map renderer
#[derive(Debug, Clone, Default)]
pub struct MapRenderer {
    pub config: RenderConfig,
    pub method: CalculationMethod,
}

impl MapRenderer {
    pub fn new(config: RenderConfig, method: CalculationMethod) -> Self {
        Self { config, method }
    }

    /// Decompress, parse, and fill the base map silhouette.
    pub fn render_base(&self, compressed: &[u8]) -> Result<RgbaImage> {
        let text = decompress_path_data(compressed)?;
        let commands = path::parse_path_data(&text)?;
        let subpaths = path::flatten(&commands, self.config.curve_segments)?;
        let [r, g, b] = self.config.land_color;
        raster::fill_even_odd(
            &subpaths,
            self.config.base_width,
            self.config.base_height,
            Rgba([r, g, b, 0xFF]),
        )
    }

    pub fn night_mask(&self, moment: &Moment) -> NightMask {
        NightMask::compute(moment, self.method, &self.config)
    }

    /// Copy the base map and composite the night shadow for a moment.
    pub fn render_day_night(&self, base: &RgbaImage, moment: &Moment) -> RgbaImage {
        let mask = self.night_mask(moment);
        let mut out = base.clone();
        raster::shade_night(&mut out, &mask, self.config.night_alpha);
        out
    }

    /// Full pipeline. Without a moment (no time/location context) only
    /// the base map is produced and the overlay is skipped.
    pub fn render(&self, compressed: &[u8], moment: Option<&Moment>) -> Result<RenderedMap> {
        let base = self.render_base(compressed)?;
        let day_night = moment.map(|m| self.render_day_night(&base, m));
        Ok(RenderedMap { base, day_night })
    }
}

/// Run a render on a worker thread.
///
/// The result, error included, arrives on the returned channel exactly
/// once; failures are additionally logged. The map is decorative, so
/// callers typically drop the error and leave their display unchanged,
/// but that choice stays with them.
pub fn render_in_background(
    renderer: MapRenderer,
    compressed: Vec<u8>,
    moment: Option<Moment>,
) -> mpsc::Receiver<Result<RenderedMap>> {
    let (tx, rx) = mpsc::sync_channel(1);
    thread::spawn(move || {
        let result = renderer.render(&compressed, moment.as_ref());
        if let Err(e) = &result {
            tracing::warn!("map render failed: {e}");
        }
        let _ = tx.send(result);
    });
    rx
}
