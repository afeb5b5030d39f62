//! Export errors
//!
//! Only failures that end the whole run live here. A label whose content
//! cannot be generated is skipped and counted, not raised.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// The PDF document could not be built or written.
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Labels were submitted for a page that was already finished.
    #[error("Page {requested} requested after page {current} was started")]
    PageOrder { current: usize, requested: usize },

    /// An image could not be placed.
    #[error("Cannot draw {width}x{height} px image: {reason}")]
    Image {
        width: u32,
        height: u32,
        reason: String,
    },

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl ExportError {
    pub fn pdf(err: impl std::fmt::Display) -> Self {
        Self::Pdf(err.to_string())
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
