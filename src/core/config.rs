//! Renderer configuration with documented constants
//!
//! All magic numbers of the map pipeline are collected here with
//! explanations of their purpose and how they relate to each other.

/// Configuration for the world map renderer
///
/// The defaults reproduce the bundled world-map asset exactly; tests use
/// smaller rasters through [`RenderConfig::with_base_size`].
#[derive(Debug, Clone)]
pub struct RenderConfig {
    // === BASE RASTER ===
    /// Width of the base map raster in pixels
    ///
    /// Matches the coordinate space of the bundled path-data asset, so
    /// the parsed path is filled without any scaling step.
    pub base_width: u32,

    /// Height of the base map raster in pixels
    pub base_height: u32,

    /// Flat fill color for landmass, as RGB
    ///
    /// The base map is a single-color silhouette over a transparent
    /// background; all shading comes from the night overlay.
    pub land_color: [u8; 3],

    // === NIGHT MASK ===
    /// Width of the night mask in cells (one cell per degree of longitude)
    pub mask_width: u32,

    /// Height of the night mask in cells (one cell per degree of latitude)
    pub mask_height: u32,

    /// Alpha applied when compositing the night mask over the base map
    ///
    /// At 0xB0 (~69%) the landmass stays recognizable under the shadow.
    pub night_alpha: u8,

    // === PATH FLATTENING ===
    /// Number of line segments a Bezier curve is flattened into
    ///
    /// At the default base resolution, 24 segments keep the flattening
    /// error well under a pixel for the bundled asset's curve sizes.
    pub curve_segments: u32,
}

impl RenderConfig {
    /// Configuration with a custom base raster size, for tests and
    /// preview-scale renders. Mask size and colors keep their defaults.
    pub fn with_base_size(width: u32, height: u32) -> Self {
        Self {
            base_width: width,
            base_height: height,
            ..Self::default()
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            base_width: 4378,
            base_height: 2435,
            land_color: [0xBC, 0xBC, 0xBC],
            mask_width: 360,
            mask_height: 180,
            night_alpha: 0xB0,
            curve_segments: 24,
        }
    }
}
