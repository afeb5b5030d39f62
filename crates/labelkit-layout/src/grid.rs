//! # Page Grid Module
//!
//! Resolves the label grid for a page and maps flat label indices to
//! page, row and column positions.
//!
//! The grid is either driven by explicit label dimensions, in which case the
//! number of labels per row and column is derived, or by a row/column count,
//! in which case the cell dimensions are derived. The result is frozen in a
//! [`ResolvedGrid`] that every position calculation shares.

use crate::geometry::MmRect;
use crate::page::PageSpec;
use labelkit_core::{LayoutError, LayoutResult, LayoutWarning};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Grid input as supplied by configuration
///
/// A dimension or count pair is only considered when both halves are present.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GridSpec {
    pub label_width_mm: Option<f64>,
    pub label_height_mm: Option<f64>,
    pub labels_per_row: Option<u32>,
    pub labels_per_column: Option<u32>,
    /// Gap between adjacent columns (mm)
    pub horizontal_gap_mm: f64,
    /// Gap between adjacent rows (mm)
    pub vertical_gap_mm: f64,
}

impl GridSpec {
    /// Grid driven by label dimensions
    pub fn from_dimensions(width_mm: f64, height_mm: f64, gap_h: f64, gap_v: f64) -> Self {
        Self {
            label_width_mm: Some(width_mm),
            label_height_mm: Some(height_mm),
            labels_per_row: None,
            labels_per_column: None,
            horizontal_gap_mm: gap_h,
            vertical_gap_mm: gap_v,
        }
    }

    /// Grid driven by row and column counts
    pub fn from_counts(per_row: u32, per_column: u32, gap_h: f64, gap_v: f64) -> Self {
        Self {
            label_width_mm: None,
            label_height_mm: None,
            labels_per_row: Some(per_row),
            labels_per_column: Some(per_column),
            horizontal_gap_mm: gap_h,
            vertical_gap_mm: gap_v,
        }
    }

    pub fn dimensions(&self) -> Option<(f64, f64)> {
        self.label_width_mm.zip(self.label_height_mm)
    }

    pub fn counts(&self) -> Option<(u32, u32)> {
        self.labels_per_row.zip(self.labels_per_column)
    }

    /// Resolve the grid against a page.
    ///
    /// Explicit dimensions take precedence over counts; supplying both yields
    /// [`LayoutWarning::AmbiguousGridSpec`].
    pub fn resolve(&self, page: &PageSpec) -> LayoutResult<GridResolution> {
        let mut warnings = Vec::new();

        let grid = match (self.dimensions(), self.counts()) {
            (Some((width, height)), counts) => {
                if counts.is_some() {
                    warn!("{}", LayoutWarning::AmbiguousGridSpec);
                    warnings.push(LayoutWarning::AmbiguousGridSpec);
                }
                self.resolve_from_dimensions(page, width, height)?
            }
            (None, Some((per_row, per_column))) => {
                self.resolve_from_counts(page, per_row, per_column)?
            }
            (None, None) => return Err(LayoutError::MissingGridSpec),
        };

        debug!(
            "Resolved grid: {}x{} labels of {:.2}x{:.2}mm, {} per page",
            grid.labels_per_row,
            grid.labels_per_column,
            grid.label_width_mm,
            grid.label_height_mm,
            grid.labels_per_page()
        );

        Ok(GridResolution { grid, warnings })
    }

    fn resolve_from_dimensions(
        &self,
        page: &PageSpec,
        width: f64,
        height: f64,
    ) -> LayoutResult<ResolvedGrid> {
        let per_row = fit_count(page.usable_width_mm(), width, self.horizontal_gap_mm);
        let per_column = fit_count(page.usable_height_mm(), height, self.vertical_gap_mm);

        if per_row < 1 || per_column < 1 {
            return Err(LayoutError::NoFit {
                label_width_mm: width,
                label_height_mm: height,
                usable_width_mm: page.usable_width_mm(),
                usable_height_mm: page.usable_height_mm(),
                labels_per_row: per_row,
                labels_per_column: per_column,
            });
        }

        Ok(self.frozen(page, per_row, per_column, width, height))
    }

    fn resolve_from_counts(
        &self,
        page: &PageSpec,
        per_row: u32,
        per_column: u32,
    ) -> LayoutResult<ResolvedGrid> {
        let width = cell_size(page.usable_width_mm(), per_row, self.horizontal_gap_mm);
        let height = cell_size(page.usable_height_mm(), per_column, self.vertical_gap_mm);

        if per_row == 0 || per_column == 0 || width <= 0.0 || height <= 0.0 {
            return Err(LayoutError::DegenerateCell {
                labels_per_row: per_row,
                labels_per_column: per_column,
                label_width_mm: width,
                label_height_mm: height,
            });
        }

        Ok(self.frozen(page, per_row, per_column, width, height))
    }

    fn frozen(
        &self,
        page: &PageSpec,
        per_row: u32,
        per_column: u32,
        width: f64,
        height: f64,
    ) -> ResolvedGrid {
        ResolvedGrid {
            labels_per_row: per_row,
            labels_per_column: per_column,
            label_width_mm: width,
            label_height_mm: height,
            horizontal_gap_mm: self.horizontal_gap_mm,
            vertical_gap_mm: self.vertical_gap_mm,
            margin_mm: page.margin_mm,
        }
    }
}

/// How many cells of `size` separated by `gap` fit into `usable`
fn fit_count(usable: f64, size: f64, gap: f64) -> u32 {
    if size <= 0.0 {
        return 0;
    }
    let count = ((usable + gap) / (size + gap)).floor();
    if count.is_finite() && count >= 1.0 {
        count.min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Cell size when `count` cells separated by `gap` fill `usable`
fn cell_size(usable: f64, count: u32, gap: f64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (usable - (count as f64 - 1.0) * gap) / count as f64
}

/// Result of grid resolution: the frozen grid plus any non-fatal notices
#[derive(Debug, Clone, PartialEq)]
pub struct GridResolution {
    pub grid: ResolvedGrid,
    pub warnings: Vec<LayoutWarning>,
}

/// Immutable, fully-derived page grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGrid {
    pub labels_per_row: u32,
    pub labels_per_column: u32,
    pub label_width_mm: f64,
    pub label_height_mm: f64,
    pub horizontal_gap_mm: f64,
    pub vertical_gap_mm: f64,
    pub margin_mm: f64,
}

impl ResolvedGrid {
    pub fn labels_per_page(&self) -> usize {
        self.labels_per_row as usize * self.labels_per_column as usize
    }

    /// Zero-based page holding the label at `index`
    pub fn page_of(&self, index: usize) -> usize {
        index / self.labels_per_page()
    }

    /// Number of pages needed for `label_count` labels
    pub fn page_count(&self, label_count: usize) -> usize {
        label_count.div_ceil(self.labels_per_page())
    }

    /// Cell position of the label at `index`
    pub fn position_of(&self, index: usize) -> LabelPosition {
        let per_page = self.labels_per_page();
        let per_row = self.labels_per_row as usize;
        let local = index % per_page;
        let row = local / per_row;
        let column = local % per_row;

        LabelPosition {
            page: index / per_page,
            row: row as u32,
            column: column as u32,
            x_mm: self.margin_mm + column as f64 * (self.label_width_mm + self.horizontal_gap_mm),
            y_mm: self.margin_mm + row as f64 * (self.label_height_mm + self.vertical_gap_mm),
        }
    }

    /// Rectangle covered by the cell at `position`
    pub fn cell_rect(&self, position: &LabelPosition) -> MmRect {
        MmRect::new(
            position.x_mm,
            position.y_mm,
            self.label_width_mm,
            self.label_height_mm,
        )
    }
}

/// Location of one label cell on its page
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabelPosition {
    pub page: usize,
    /// Row on the page, zero-based
    pub row: u32,
    /// Column on the page, zero-based
    pub column: u32,
    /// Left edge of the cell in page coordinates
    pub x_mm: f64,
    /// Top edge of the cell in page coordinates
    pub y_mm: f64,
}
