//! Unit conversion utilities
//!
//! Handles conversion between millimeters, device pixels at a given DPI,
//! and typographic points. All page geometry is carried in millimeters;
//! pixels only appear at the bitmap boundary and points only at the font
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// PostScript points per inch
pub const POINTS_PER_INCH: f64 = 72.0;

/// Millimeters per typographic point, as used for caption heights.
///
/// Fixed at `0.352778`, not `25.4 / 72`.
pub const MM_PER_POINT: f64 = 0.352778;

/// Output resolution in dots per inch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dpi(pub u32);

impl Dpi {
    /// Lowest resolution accepted by the configuration loader
    pub const MIN: Dpi = Dpi(72);
    /// Highest resolution accepted by the configuration loader
    pub const MAX: Dpi = Dpi(600);

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn is_supported(self) -> bool {
        (Self::MIN.0..=Self::MAX.0).contains(&self.0)
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self(300)
    }
}

impl fmt::Display for Dpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} dpi", self.0)
    }
}

/// Convert millimeters to whole device pixels.
///
/// Truncates toward zero, so a bitmap never exceeds the requested
/// physical size.
pub fn mm_to_px(mm: f64, dpi: Dpi) -> u32 {
    let px = mm / MM_PER_INCH * dpi.0 as f64;
    if px <= 0.0 {
        0
    } else {
        px as u32
    }
}

/// Convert device pixels to millimeters
pub fn px_to_mm(px: u32, dpi: Dpi) -> f64 {
    px as f64 / dpi.0 as f64 * MM_PER_INCH
}

/// Convert typographic points to millimeters
pub fn pt_to_mm(pt: f64) -> f64 {
    pt * MM_PER_POINT
}

/// Convert millimeters to typographic points
pub fn mm_to_pt(mm: f64) -> f64 {
    mm / MM_PER_INCH * POINTS_PER_INCH
}

/// Format a millimeter value for log output
pub fn format_mm(value_mm: f64) -> String {
    format!("{:.2}mm", value_mm)
}
