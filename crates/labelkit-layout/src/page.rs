//! Page specification

use serde::{Deserialize, Serialize};

/// A4 width in millimeters
pub const A4_WIDTH_MM: f64 = 210.0;
/// A4 height in millimeters
pub const A4_HEIGHT_MM: f64 = 297.0;
/// Smallest usable width and height left after margins
pub const MIN_USABLE_MM: f64 = 20.0;

/// Physical page with a uniform margin on every side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    pub width_mm: f64,
    pub height_mm: f64,
    pub margin_mm: f64,
}

impl PageSpec {
    /// A4 portrait page with the given margin
    pub fn a4(margin_mm: f64) -> Self {
        Self {
            width_mm: A4_WIDTH_MM,
            height_mm: A4_HEIGHT_MM,
            margin_mm,
        }
    }

    pub fn usable_width_mm(&self) -> f64 {
        self.width_mm - 2.0 * self.margin_mm
    }

    pub fn usable_height_mm(&self) -> f64 {
        self.height_mm - 2.0 * self.margin_mm
    }

    /// Validate that the margin is non-negative and leaves room for labels
    pub fn validate(&self) -> Result<(), String> {
        if !self.margin_mm.is_finite() || self.margin_mm < 0.0 {
            return Err(format!(
                "Page margin must be non-negative, got {}mm",
                self.margin_mm
            ));
        }
        if self.usable_width_mm() < MIN_USABLE_MM || self.usable_height_mm() < MIN_USABLE_MM {
            return Err(format!(
                "Page margin {}mm too large for {}x{}mm page",
                self.margin_mm, self.width_mm, self.height_mm
            ));
        }
        Ok(())
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::a4(10.0)
    }
}
