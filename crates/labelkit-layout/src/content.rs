//! # Code Pair Placement
//!
//! Places a QR code and a 1D barcode inside one label cell, either side by
//! side or stacked, and computes the caption anchors for both.
//!
//! Content that does not fit is not clamped; the resulting coordinates may
//! leave the cell or overlap. [`ContentLayout::overflows`] reports it.

use crate::caption::{CaptionMode, CaptionStyle};
use crate::geometry::{MmRect, Point};
use crate::grid::{LabelPosition, ResolvedGrid};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tolerance used when checking content against its cell
const FIT_TOLERANCE_MM: f64 = 1e-6;

/// How the two codes share a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Arrangement {
    /// QR left, barcode right, captions on one shared baseline
    #[default]
    Horizontal,
    /// QR above barcode, one caption row per code
    Vertical,
}

impl fmt::Display for Arrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arrangement::Horizontal => write!(f, "horizontal"),
            Arrangement::Vertical => write!(f, "vertical"),
        }
    }
}

impl FromStr for Arrangement {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "horizontal" => Ok(Arrangement::Horizontal),
            "vertical" => Ok(Arrangement::Vertical),
            other => Err(format!(
                "Invalid code arrangement '{}'. Must be one of: horizontal, vertical",
                other
            )),
        }
    }
}

/// Fixed code-pair geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CodePairParams {
    /// QR side length (mm)
    pub qr_size_mm: f64,
    /// Barcode height (mm); the width comes from the rendered barcode
    pub barcode_height_mm: f64,
    /// Gap between the QR code and the barcode (mm)
    pub code_spacing_mm: f64,
    pub arrangement: Arrangement,
}

impl Default for CodePairParams {
    fn default() -> Self {
        Self {
            qr_size_mm: 25.0,
            barcode_height_mm: 15.0,
            code_spacing_mm: 5.0,
            arrangement: Arrangement::Horizontal,
        }
    }
}

/// Resolved positions for one code pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentLayout {
    /// Top-left of the QR code
    pub qr: Point,
    pub qr_size_mm: f64,
    /// Top-left of the barcode
    pub barcode: Point,
    pub barcode_width_mm: f64,
    pub barcode_height_mm: f64,
    /// Caption anchor centered on the QR code; zero when captions are off
    pub qr_caption: Point,
    /// Caption anchor centered on the barcode; zero when captions are off
    pub barcode_caption: Point,
}

impl ContentLayout {
    pub fn qr_rect(&self) -> MmRect {
        MmRect::at(self.qr, self.qr_size_mm, self.qr_size_mm)
    }

    pub fn barcode_rect(&self) -> MmRect {
        MmRect::at(self.barcode, self.barcode_width_mm, self.barcode_height_mm)
    }

    /// Whether either code extends past `cell`
    pub fn overflows(&self, cell: &MmRect) -> bool {
        !cell.contains_rect(&self.qr_rect(), FIT_TOLERANCE_MM)
            || !cell.contains_rect(&self.barcode_rect(), FIT_TOLERANCE_MM)
    }
}

/// Computes [`ContentLayout`]s for cells of one grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodePairResolver {
    label_width_mm: f64,
    label_height_mm: f64,
    params: CodePairParams,
    caption: CaptionStyle,
}

impl CodePairResolver {
    pub fn new(grid: &ResolvedGrid, params: CodePairParams, caption: CaptionStyle) -> Self {
        Self {
            label_width_mm: grid.label_width_mm,
            label_height_mm: grid.label_height_mm,
            params,
            caption,
        }
    }

    pub fn params(&self) -> &CodePairParams {
        &self.params
    }

    pub fn caption(&self) -> &CaptionStyle {
        &self.caption
    }

    /// Place the code pair inside the cell at `label`.
    ///
    /// `barcode_width_mm` is the physical width of the rendered barcode.
    pub fn layout(&self, label: &LabelPosition, barcode_width_mm: f64) -> ContentLayout {
        let mut layout = match self.params.arrangement {
            Arrangement::Horizontal => self.horizontal(label, barcode_width_mm),
            Arrangement::Vertical => self.vertical(label, barcode_width_mm),
        };

        if self.caption.mode == CaptionMode::None {
            layout.qr_caption = Point::ZERO;
            layout.barcode_caption = Point::ZERO;
        }
        layout
    }

    fn horizontal(&self, label: &LabelPosition, barcode_width: f64) -> ContentLayout {
        let (x, y) = (label.x_mm, label.y_mm);
        let (w, h) = (self.label_width_mm, self.label_height_mm);
        let qr = self.params.qr_size_mm;
        let bh = self.params.barcode_height_mm;
        let spacing = self.params.code_spacing_mm;
        let font = self.caption.font_size_mm();
        let m = self.caption.margin_mm;

        let total_width = qr + spacing + barcode_width;
        let qr_x = x + (w - total_width) / 2.0;
        let qr_y = match self.caption.mode {
            CaptionMode::Bottom => y + (h - qr - font - m) / 2.0,
            CaptionMode::Top | CaptionMode::None => y + (h - qr) / 2.0,
        };

        let barcode_x = qr_x + qr + spacing;
        let barcode_y = y + (h - bh) / 2.0;

        let baseline = match self.caption.mode {
            CaptionMode::Bottom => y + h - font - m,
            CaptionMode::Top => y + m,
            CaptionMode::None => 0.0,
        };

        ContentLayout {
            qr: Point::new(qr_x, qr_y),
            qr_size_mm: qr,
            barcode: Point::new(barcode_x, barcode_y),
            barcode_width_mm: barcode_width,
            barcode_height_mm: bh,
            qr_caption: Point::new(qr_x + qr / 2.0, baseline),
            barcode_caption: Point::new(barcode_x + barcode_width / 2.0, baseline),
        }
    }

    fn vertical(&self, label: &LabelPosition, barcode_width: f64) -> ContentLayout {
        let (x, y) = (label.x_mm, label.y_mm);
        let (w, h) = (self.label_width_mm, self.label_height_mm);
        let qr = self.params.qr_size_mm;
        let bh = self.params.barcode_height_mm;
        let spacing = self.params.code_spacing_mm;
        let font = self.caption.font_size_mm();
        let m = self.caption.margin_mm;

        let qr_x = x + (w - qr) / 2.0;
        let barcode_x = x + (w - barcode_width) / 2.0;

        let (qr_y, qr_caption_y, barcode_y, barcode_caption_y) = match self.caption.mode {
            CaptionMode::Top => {
                let qr_y = y + font + 2.0 * m;
                let barcode_y = qr_y + qr + spacing;
                (qr_y, y + m, barcode_y, barcode_y + bh + m)
            }
            CaptionMode::Bottom => {
                let reserved_bottom = bh + font + m;
                let band = h - reserved_bottom - spacing;
                let qr_y = y + (band - qr) / 2.0;
                (
                    qr_y,
                    qr_y + qr + m,
                    y + h - bh - font - m,
                    y + h - font - m,
                )
            }
            CaptionMode::None => {
                let qr_y = y + (h - spacing - qr - bh) / 2.0;
                (qr_y, 0.0, qr_y + qr + spacing, 0.0)
            }
        };

        ContentLayout {
            qr: Point::new(qr_x, qr_y),
            qr_size_mm: qr,
            barcode: Point::new(barcode_x, barcode_y),
            barcode_width_mm: barcode_width,
            barcode_height_mm: bh,
            qr_caption: Point::new(qr_x + qr / 2.0, qr_caption_y),
            barcode_caption: Point::new(barcode_x + barcode_width / 2.0, barcode_caption_y),
        }
    }
}
