//! # LabelKit Core
//!
//! Core types and utilities for LabelKit.
//! Provides unit conversion between millimeters, pixels and points,
//! the shared error taxonomy, and the CSV-backed label data model.

pub mod data;
pub mod error;
pub mod units;

pub use data::{load_entries, DataEntry};

pub use error::{DataError, Error, LayoutError, LayoutResult, LayoutWarning, Result};

pub use units::{format_mm, mm_to_pt, mm_to_px, pt_to_mm, px_to_mm, Dpi, MM_PER_POINT};
