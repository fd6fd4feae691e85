//! PNG export of the palette panel.

use crate::api::models::PALETTE_SIZE;
use crate::palette::Swatch;
use anyhow::Context;
use image::{Rgba, RgbaImage};
use std::path::{Path, PathBuf};

pub const EXPORT_FILE_NAME: &str = "emotional-palette.png";

const STRIPE_WIDTH: u32 = 120;
const HEIGHT: u32 = 300;
const BLANK: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Rasterises swatches as equal-width vertical stripes. No swatches gives a
/// blank canvas of the same size.
pub fn rasterize(swatches: &[Swatch]) -> RgbaImage {
    let width = STRIPE_WIDTH * PALETTE_SIZE as u32;
    let mut img = RgbaImage::from_pixel(width, HEIGHT, BLANK);
    if swatches.is_empty() {
        return img;
    }
    let n = swatches.len() as u32;
    for (i, swatch) in swatches.iter().enumerate() {
        let i = i as u32;
        let x0 = i * width / n;
        let x1 = (i + 1) * width / n;
        let fill = swatch.rgba.unwrap_or(BLANK);
        for x in x0..x1 {
            for y in 0..HEIGHT {
                img.put_pixel(x, y, fill);
            }
        }
    }
    img
}

/// Writes the palette image into `dir` under the fixed export name.
pub fn export_png(swatches: &[Swatch], dir: &Path) -> anyhow::Result<PathBuf> {
    if !dir.as_os_str().is_empty() && !dir.exists() {
        std::fs::create_dir_all(dir).with_context(|| format!("create dir {}", dir.display()))?;
    }
    let path = dir.join(EXPORT_FILE_NAME);
    rasterize(swatches)
        .save_with_format(&path, image::ImageFormat::Png)
        .with_context(|| format!("write {}", path.display()))?;
    tracing::info!(path = %path.display(), swatches = swatches.len(), "exported palette");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::swatches;
    use tempfile::tempdir;

    #[test]
    fn test_stripes_follow_swatch_order() {
        let img = rasterize(&swatches(&["#ff0000", "#00ff00", "#0000ff", "#000000", "#ffffff"]));
        assert_eq!(img.dimensions(), (600, 300));
        assert_eq!(*img.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*img.get_pixel(130, 150), Rgba([0, 255, 0, 255]));
        assert_eq!(*img.get_pixel(250, 299), Rgba([0, 0, 255, 255]));
        assert_eq!(*img.get_pixel(599, 10), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_empty_palette_is_blank() {
        let img = rasterize(&[]);
        assert_eq!(img.dimensions(), (600, 300));
        assert!(img.pixels().all(|p| *p == BLANK));
    }

    #[test]
    fn test_export_writes_fixed_name() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("nested");
        let path = export_png(&swatches(&["#123456"; 5]), &out).unwrap();
        assert_eq!(path, out.join("emotional-palette.png"));
        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(*decoded.get_pixel(10, 10), Rgba([0x12, 0x34, 0x56, 255]));
    }
}
