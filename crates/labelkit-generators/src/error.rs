//! Error types for the generators crate.
//!
//! This module provides structured error types for bitmap generation,
//! input validation, and marker codebook loading.

use std::io;
use thiserror::Error;

/// Errors that can occur while producing a code or marker bitmap.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// The payload is not encodable by the selected symbology.
    #[error("Invalid data for {symbology}: {reason}")]
    InvalidInput { symbology: String, reason: String },

    /// The underlying encoder rejected the payload.
    #[error("{symbology} encoding failed: {reason}")]
    EncodingFailed { symbology: String, reason: String },

    /// A marker ID is outside the usable range.
    #[error("{family} ID {id} exceeds maximum {max}")]
    IdOutOfRange { family: String, id: i64, max: u64 },

    /// Marker IDs start at zero.
    #[error("{family} ID must be non-negative, got {id}")]
    NegativeId { family: String, id: i64 },

    /// The requested physical size renders to an empty bitmap.
    #[error("{0} renders to zero pixels")]
    EmptyBitmap(String),

    /// Generator parameters are inconsistent.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// A marker codebook is malformed or does not match its family.
    #[error("Codebook error: {0}")]
    Codebook(String),

    /// Image encoding error while saving a bitmap.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GenerationError {
    pub fn invalid_input(symbology: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            symbology: symbology.into(),
            reason: reason.into(),
        }
    }

    pub fn encoding(symbology: impl Into<String>, reason: impl ToString) -> Self {
        Self::EncodingFailed {
            symbology: symbology.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for generator operations.
pub type GenerationResult<T> = Result<T, GenerationError>;
