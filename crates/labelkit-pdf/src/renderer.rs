//! Rendering surface
//!
//! Layout code works in millimeters from the top-left page corner. A
//! [`LabelRenderer`] receives exactly that and owns whatever flip its output
//! format needs.

use crate::error::{ExportError, ExportResult};
use image::GrayImage;
use labelkit_layout::{MmRect, Point, TextAlign};

/// Output surface for label sheets
///
/// Pages are append-only: once [`LabelRenderer::start_page`] is called,
/// everything drawn goes to the new page.
pub trait LabelRenderer {
    /// Begin a new blank page
    fn start_page(&mut self) -> ExportResult<()>;

    /// Draw `image` stretched to `rect` (top-left origin, mm)
    fn draw_image(&mut self, image: &GrayImage, rect: MmRect) -> ExportResult<()>;

    /// Draw one line of text whose baseline is anchored at `anchor`
    fn draw_text(&mut self, text: &str, anchor: Point, align: TextAlign) -> ExportResult<()>;

    /// Complete the document
    fn finish(&mut self) -> ExportResult<()>;
}

/// Tracks which page the renderer is on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageCursor {
    current: Option<usize>,
}

impl PageCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-based index of the open page, if any
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Number of pages started so far
    pub fn pages_started(&self) -> usize {
        self.current.map_or(0, |page| page + 1)
    }

    /// Start pages until `page` is open.
    ///
    /// Pages that receive no label are still emitted, so every label lands
    /// on the page its index maps to.
    pub fn advance_to<R: LabelRenderer + ?Sized>(
        &mut self,
        page: usize,
        renderer: &mut R,
    ) -> ExportResult<()> {
        if let Some(current) = self.current {
            if page < current {
                return Err(ExportError::PageOrder {
                    current,
                    requested: page,
                });
            }
        }
        while self.current.is_none_or(|current| current < page) {
            renderer.start_page()?;
            self.current = Some(self.current.map_or(0, |current| current + 1));
        }
        Ok(())
    }
}
