//! Moon phase and the stylized phase silhouette
//!
//! The phase fraction comes from the mean synodic cycle, which stays
//! within about a day of the true phase; the silhouette is the decorative
//! half-moon figure: a disc split by a terminator arc whose half-width
//! grows linearly with the distance from half phase, sign selecting which
//! side is lit.

use image::{Rgba, RgbaImage};

/// Mean synodic month in days.
const SYNODIC_MONTH: f64 = 29.530_588_853;

/// A reference new moon: 2000-01-06 18:14 UTC.
const NEW_MOON_JD: f64 = 2_451_550.26;

/// Moon phase at a Julian day: 0.0 = new, 0.5 = full, wrapping at 1.0.
pub fn moon_phase(jd: f64) -> f64 {
    ((jd - NEW_MOON_JD) / SYNODIC_MONTH).rem_euclid(1.0)
}

/// Geometry of the stylized half-moon figure
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoonSilhouette {
    /// Disc radius in pixels
    pub radius: f64,
    /// Signed half-width of the terminator arc, clamped to the radius;
    /// negative values bulge toward the waxing (right-lit) side
    pub terminator_offset: f64,
}

impl MoonSilhouette {
    pub fn new(phase: f64, radius: f64) -> Self {
        let offset = ((phase - 0.5) * 2.0).clamp(-1.0, 1.0) * radius;
        Self {
            radius,
            terminator_offset: offset,
        }
    }

    /// Is the right side of the disc the lit one?
    pub fn lit_right(&self) -> bool {
        self.terminator_offset <= 0.0
    }

    /// Terminator x at a vertical offset from the disc center.
    pub fn terminator_x(&self, dy: f64) -> f64 {
        let t = 1.0 - (dy / self.radius).powi(2);
        self.terminator_offset.abs() * t.max(0.0).sqrt()
    }

    /// Is the point (dx, dy), relative to the disc center, lit?
    pub fn is_lit(&self, dx: f64, dy: f64) -> bool {
        if dx * dx + dy * dy > self.radius * self.radius {
            return false;
        }
        let toward_lit = if self.lit_right() { dx } else { -dx };
        toward_lit >= -self.terminator_x(dy)
    }
}

/// Draw the moon silhouette into an image, centered at (cx, cy).
pub fn draw_moon(img: &mut RgbaImage, cx: i64, cy: i64, radius: u32, phase: f64, color: Rgba<u8>) {
    let silhouette = MoonSilhouette::new(phase, f64::from(radius));
    let r = i64::from(radius);
    let (width, height) = img.dimensions();
    for dy in -r..=r {
        for dx in -r..=r {
            if !silhouette.is_lit(dx as f64, dy as f64) {
                continue;
            }
            let (x, y) = (cx + dx, cy + dy);
            if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_cycle_from_reference() {
        assert!(moon_phase(NEW_MOON_JD) < 1e-9);
        let full = moon_phase(NEW_MOON_JD + SYNODIC_MONTH / 2.0);
        assert!((full - 0.5).abs() < 1e-9);
        let next_new = moon_phase(NEW_MOON_JD + SYNODIC_MONTH);
        assert!(next_new < 1e-9);
    }

    #[test]
    fn known_full_moon() {
        // 2024-04-23 was a full moon
        let jd = 2_460_424.0;
        let phase = moon_phase(jd);
        assert!((phase - 0.5).abs() < 0.05, "phase {phase}");
    }

    #[test]
    fn half_phase_lights_half_the_disc() {
        let figure = MoonSilhouette::new(0.5, 10.0);
        assert_eq!(figure.terminator_offset, 0.0);
        assert!(figure.is_lit(5.0, 0.0));
        assert!(!figure.is_lit(-5.0, 0.0));
        assert!(figure.is_lit(0.0, 0.0), "terminator itself is lit");
    }

    #[test]
    fn offset_sign_selects_lit_side() {
        let waxing = MoonSilhouette::new(0.25, 10.0);
        assert!(waxing.lit_right());
        let waning = MoonSilhouette::new(0.75, 10.0);
        assert!(!waning.lit_right());
        assert!(waning.is_lit(-5.0, 0.0));
        assert!(!waning.is_lit(9.0, 0.0));
    }

    #[test]
    fn lit_area_grows_with_distance_from_half() {
        let count = |phase: f64| {
            let figure = MoonSilhouette::new(phase, 20.0);
            let mut lit = 0;
            for dy in -20..=20 {
                for dx in -20..=20 {
                    if figure.is_lit(dx as f64, dy as f64) {
                        lit += 1;
                    }
                }
            }
            lit
        };
        assert!(count(0.6) > count(0.5));
        assert!(count(0.9) > count(0.6));
        assert_eq!(count(0.4), count(0.6), "symmetric around half phase");
    }

    #[test]
    fn draw_respects_bounds() {
        let mut img = RgbaImage::new(16, 16);
        // center outside the image: must not panic, draws the overlap only
        draw_moon(&mut img, 0, 0, 10, 0.5, Rgba([255, 255, 255, 255]));
        assert!(img.pixels().any(|p| p.0[3] != 0));
    }
}
