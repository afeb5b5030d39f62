//! Single-marker placement
//!
//! Centers one fiducial marker in its cell and anchors one caption above or
//! below it.

use crate::caption::{CaptionMode, CaptionStyle, TextAlign};
use crate::geometry::{MmRect, Point};
use crate::grid::{LabelPosition, ResolvedGrid};
use serde::{Deserialize, Serialize};

/// Resolved positions for one marker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerLayout {
    /// Top-left of the marker footprint
    pub marker: Point,
    /// Side length of the footprint, border and quiet zone included
    pub footprint_mm: f64,
    /// Caption anchor; zero when captions are off
    pub caption: Point,
    /// Anchoring to use when drawing the caption
    pub caption_align: TextAlign,
}

impl MarkerLayout {
    pub fn marker_rect(&self) -> MmRect {
        MmRect::at(self.marker, self.footprint_mm, self.footprint_mm)
    }

    pub fn overflows(&self, cell: &MmRect) -> bool {
        !cell.contains_rect(&self.marker_rect(), 1e-6)
    }
}

/// Computes [`MarkerLayout`]s for cells of one grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerResolver {
    label_width_mm: f64,
    label_height_mm: f64,
    caption: CaptionStyle,
}

impl MarkerResolver {
    pub fn new(grid: &ResolvedGrid, caption: CaptionStyle) -> Self {
        Self {
            label_width_mm: grid.label_width_mm,
            label_height_mm: grid.label_height_mm,
            caption,
        }
    }

    pub fn caption(&self) -> &CaptionStyle {
        &self.caption
    }

    pub fn layout(&self, label: &LabelPosition, footprint_mm: f64) -> MarkerLayout {
        let (x, y) = (label.x_mm, label.y_mm);
        let (w, h) = (self.label_width_mm, self.label_height_mm);
        let font = self.caption.font_size_mm();
        let m = self.caption.margin_mm;
        // Height left for the marker once a caption row is reserved
        let band = h - font - 2.0 * m;

        let marker_x = x + (w - footprint_mm) / 2.0;
        let (marker_y, caption_y) = match self.caption.mode {
            CaptionMode::Bottom => (y + (band - footprint_mm) / 2.0, y + h - font - m),
            CaptionMode::Top => (
                y + 2.0 * m + font + (band - footprint_mm) / 2.0,
                y + m + font,
            ),
            CaptionMode::None => (y + (h - footprint_mm) / 2.0, 0.0),
        };

        let caption_x = match (self.caption.mode, self.caption.align) {
            (CaptionMode::None, _) => 0.0,
            (_, TextAlign::Left) => x,
            (_, TextAlign::Center) => x + w / 2.0,
            (_, TextAlign::Right) => x + w,
        };

        MarkerLayout {
            marker: Point::new(marker_x, marker_y),
            footprint_mm,
            caption: Point::new(caption_x, caption_y),
            caption_align: self.caption.align,
        }
    }
}
