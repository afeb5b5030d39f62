//! # LabelKit PDF
//!
//! Draws resolved label layouts. [`LabelRenderer`] is the drawing surface,
//! [`PdfRenderer`] its printpdf implementation, and [`LabelExporter`] the
//! pipeline that turns a run plan and its entries into pages.

pub mod error;
pub mod exporter;
pub mod metrics;
pub mod pdf;
pub mod renderer;

pub use error::{ExportError, ExportResult};
pub use exporter::{export_pdf, ExportOptions, ExportSummary, LabelExporter, RenderContext};
pub use metrics::CaptionFont;
pub use pdf::PdfRenderer;
pub use renderer::{LabelRenderer, PageCursor};
