//! Error handling for LabelKit
//!
//! Provides the error types shared by every layer of the label pipeline:
//! - Layout errors (page grid resolution at configuration time)
//! - Layout warnings (non-fatal configuration notices)
//! - Data errors (CSV input loading)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Layout error type
///
/// Raised while resolving the page grid. Every variant is fatal and aborts
/// the run before any entry is processed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Explicit label dimensions leave zero rows or columns on the page
    #[error(
        "Label {label_width_mm}x{label_height_mm}mm does not fit the usable area \
         {usable_width_mm}x{usable_height_mm}mm ({labels_per_row} per row, {labels_per_column} per column)"
    )]
    NoFit {
        /// Requested label width.
        label_width_mm: f64,
        /// Requested label height.
        label_height_mm: f64,
        /// Page width minus both margins.
        usable_width_mm: f64,
        /// Page height minus both margins.
        usable_height_mm: f64,
        /// Labels that fit across.
        labels_per_row: u32,
        /// Labels that fit down.
        labels_per_column: u32,
    },

    /// A row/column grid leaves no room for a label cell
    #[error(
        "Grid {labels_per_row}x{labels_per_column} yields a degenerate cell of \
         {label_width_mm:.3}x{label_height_mm:.3}mm"
    )]
    DegenerateCell {
        /// Requested labels across.
        labels_per_row: u32,
        /// Requested labels down.
        labels_per_column: u32,
        /// Derived cell width.
        label_width_mm: f64,
        /// Derived cell height.
        label_height_mm: f64,
    },

    /// Neither label dimensions nor a grid were supplied
    #[error("Must specify either label dimensions or a grid layout")]
    MissingGridSpec,
}

/// Layout warning type
///
/// Notices raised during grid resolution that do not stop the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutWarning {
    /// Both label dimensions and grid counts were given; dimensions win.
    AmbiguousGridSpec,
}

impl std::fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AmbiguousGridSpec => write!(
                f,
                "Both label dimensions and grid layout specified. Dimensions take precedence."
            ),
        }
    }
}

/// Data error type
///
/// Represents errors while reading the CSV entry list.
#[derive(Error, Debug)]
pub enum DataError {
    /// The CSV file could not be found
    #[error("CSV file not found: {path}")]
    NotFound {
        /// The path that was looked up.
        path: String,
    },

    /// The header row does not contain an `id` column
    #[error("CSV file must have an 'id' column")]
    MissingIdColumn,

    /// The CSV structure could not be parsed
    #[error("CSV parsing error: {0}")]
    Parse(#[from] csv::Error),

    /// The file could not be read
    #[error("Failed to read CSV file: {0}")]
    Io(#[from] std::io::Error),

    /// No usable rows remained after filtering
    #[error("No valid entries found in CSV file")]
    NoEntries,
}

/// Main error type for LabelKit
///
/// A unified error type that can represent any error from the core layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Layout error
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Data error
    #[error(transparent)]
    Data(#[from] DataError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a layout error
    pub fn is_layout_error(&self) -> bool {
        matches!(self, Error::Layout(_))
    }

    /// Check if this is a data error
    pub fn is_data_error(&self) -> bool {
        matches!(self, Error::Data(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for grid resolution
pub type LayoutResult<T> = std::result::Result<T, LayoutError>;
