//! Scanline rasterization and night-mask compositing

use image::{Rgba, RgbaImage};

use crate::core::error::{Result, TaqwimError};
use crate::map::NightMask;

/// Fill subpath polylines into a fresh image using the even-odd rule.
///
/// Subpaths are closed implicitly (last point connects back to the
/// first). Pixels are tested at their centers; no antialiasing, matching
/// the flat-silhouette look of the map asset.
pub fn fill_even_odd(
    subpaths: &[Vec<(f64, f64)>],
    width: u32,
    height: u32,
    color: Rgba<u8>,
) -> Result<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(TaqwimError::Raster(format!(
            "invalid raster size {width}x{height}"
        )));
    }
    let mut img = RgbaImage::new(width, height);

    // Closing edge included; horizontal edges never cross a scanline center
    let mut edges: Vec<[f64; 4]> = Vec::new();
    for subpath in subpaths {
        if subpath.len() < 2 {
            continue;
        }
        for i in 0..subpath.len() {
            let a = subpath[i];
            let b = subpath[(i + 1) % subpath.len()];
            if a.1 != b.1 {
                edges.push([a.0, a.1, b.0, b.1]);
            }
        }
    }

    let mut crossings: Vec<f64> = Vec::new();
    for y in 0..height {
        let sy = f64::from(y) + 0.5;
        crossings.clear();
        for e in &edges {
            // half-open vertex rule: each vertex counts for exactly one edge
            if (e[1] <= sy) != (e[3] <= sy) {
                let t = (sy - e[1]) / (e[3] - e[1]);
                crossings.push(e[0] + t * (e[2] - e[0]));
            }
        }
        crossings.sort_by(f64::total_cmp);
        for span in crossings.chunks_exact(2) {
            let x0 = (span[0] - 0.5).ceil().max(0.0) as i64;
            let x1 = ((span[1] - 0.5).floor()).min(f64::from(width - 1)) as i64;
            for x in x0..=x1 {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
    Ok(img)
}

/// Composite the night mask over an image at a fixed alpha.
///
/// The mask is stretched to the image size by nearest-neighbor lookup;
/// masked pixels are blended toward black.
pub fn shade_night(img: &mut RgbaImage, mask: &NightMask, alpha: u8) {
    let (width, height) = img.dimensions();
    let a = u32::from(alpha);
    for y in 0..height {
        let my = y * mask.height() / height;
        for x in 0..width {
            let mx = x * mask.width() / width;
            if mask.cell(mx, my) {
                let p = img.get_pixel_mut(x, y);
                for channel in &mut p.0[..3] {
                    *channel = (u32::from(*channel) * (255 - a) / 255) as u8;
                }
                p.0[3] = (a + u32::from(p.0[3]) * (255 - a) / 255) as u8;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn filled_count(img: &RgbaImage) -> usize {
        img.pixels().filter(|p| p.0[3] != 0).count()
    }

    #[test]
    fn fills_a_square() {
        let square = vec![vec![(2.0, 2.0), (8.0, 2.0), (8.0, 8.0), (2.0, 8.0)]];
        let img = fill_even_odd(&square, 10, 10, WHITE).unwrap();
        assert_eq!(filled_count(&img), 36);
        assert_eq!(img.get_pixel(5, 5), &WHITE);
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn even_odd_leaves_holes() {
        let donut = vec![
            vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)],
            vec![(3.0, 3.0), (7.0, 3.0), (7.0, 7.0), (3.0, 7.0)],
        ];
        let img = fill_even_odd(&donut, 10, 10, WHITE).unwrap();
        assert_eq!(img.get_pixel(1, 1), &WHITE);
        assert_eq!(img.get_pixel(5, 5).0[3], 0, "hole stays transparent");
    }

    #[test]
    fn unclosed_subpath_is_closed_implicitly() {
        // triangle given without its closing edge
        let triangle = vec![vec![(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)]];
        let img = fill_even_odd(&triangle, 10, 10, WHITE).unwrap();
        assert!(filled_count(&img) > 0);
        assert_eq!(img.get_pixel(2, 2), &WHITE);
        assert_eq!(img.get_pixel(9, 9).0[3], 0);
    }

    #[test]
    fn rejects_zero_size() {
        assert!(fill_even_odd(&[], 0, 10, WHITE).is_err());
    }

    #[test]
    fn shade_darkens_masked_half() {
        let mut img = RgbaImage::from_pixel(8, 4, WHITE);
        // mask with the left half night
        let mask = NightMask::from_cells(2, 1, vec![true, false]);
        shade_night(&mut img, &mask, 0xB0);
        let shaded = img.get_pixel(0, 0).0;
        let lit = img.get_pixel(7, 0).0;
        assert_eq!(lit, WHITE.0);
        let expected = (255 * (255 - 0xB0) / 255) as u8;
        assert_eq!(shaded[..3], [expected, expected, expected]);
        assert_eq!(shaded[3], 255);
    }
}
