//! Rendered bitmaps and the module-to-pixel helpers shared by all
//! generators.

use crate::error::GenerationResult;
use image::{GrayImage, Luma};
use labelkit_core::units::{px_to_mm, Dpi};
use std::path::Path;

pub const BLACK: Luma<u8> = Luma([0]);
pub const WHITE: Luma<u8> = Luma([255]);

/// A generated code or marker together with its physical size
#[derive(Debug, Clone)]
pub struct RenderedCode {
    pub image: GrayImage,
    /// Physical width in millimeters
    pub width_mm: f64,
    /// Physical height in millimeters
    pub height_mm: f64,
}

impl RenderedCode {
    /// Wrap an image whose physical size follows from its pixel size
    pub fn from_image(image: GrayImage, dpi: Dpi) -> Self {
        Self {
            width_mm: px_to_mm(image.width(), dpi),
            height_mm: px_to_mm(image.height(), dpi),
            image,
        }
    }

    /// Wrap an image with an explicit physical size
    pub fn with_size(image: GrayImage, width_mm: f64, height_mm: f64) -> Self {
        Self {
            image,
            width_mm,
            height_mm,
        }
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> GenerationResult<()> {
        self.image.save(path)?;
        Ok(())
    }
}

/// Sample a square cell matrix onto a `size_px` square bitmap.
///
/// Each output pixel takes the color of the cell it falls into.
pub fn sample_cells<F>(cells: u32, size_px: u32, is_dark: F) -> GrayImage
where
    F: Fn(u32, u32) -> bool,
{
    GrayImage::from_fn(size_px, size_px, |x, y| {
        let cx = (x as u64 * cells as u64 / size_px as u64) as u32;
        let cy = (y as u64 * cells as u64 / size_px as u64) as u32;
        if is_dark(cx, cy) {
            BLACK
        } else {
            WHITE
        }
    })
}

/// Surround `image` with a uniform border of `px` pixels filled with `color`
pub fn pad(image: &GrayImage, px: u32, color: Luma<u8>) -> GrayImage {
    if px == 0 {
        return image.clone();
    }
    let mut padded = GrayImage::from_pixel(image.width() + 2 * px, image.height() + 2 * px, color);
    image::imageops::replace(&mut padded, image, px as i64, px as i64);
    padded
}
