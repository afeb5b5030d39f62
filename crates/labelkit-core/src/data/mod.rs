//! Label data entries
//!
//! This module provides:
//! - The [`DataEntry`] record produced from one CSV row
//! - The CSV loader in [`loader`]

pub mod loader;

pub use loader::{decode_text, load_entries, parse_entries};

use serde::{Deserialize, Serialize};

/// One label's worth of input data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntry {
    /// Human-readable identifier, also used as the caption text
    pub id: String,
    /// Payload encoded in the QR code
    pub qr_value: String,
    /// Payload encoded in the 1D barcode
    pub barcode_value: String,
    /// Numeric ArUco marker ID, if the row supplied one. Range checks,
    /// including the sign, happen at generation.
    pub aruco_id: Option<i64>,
    /// Numeric AprilTag ID, if the row supplied one
    pub apriltag_id: Option<i64>,
}

impl DataEntry {
    /// Create an entry whose QR and barcode payloads fall back to the ID.
    ///
    /// Values are trimmed; blank payloads are replaced by the ID.
    pub fn new(id: &str, qr_value: Option<&str>, barcode_value: Option<&str>) -> Self {
        let id = id.trim().to_string();
        let or_id = |value: Option<&str>| match value.map(str::trim) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => id.clone(),
        };

        Self {
            qr_value: or_id(qr_value),
            barcode_value: or_id(barcode_value),
            id,
            aruco_id: None,
            apriltag_id: None,
        }
    }

    pub fn with_aruco_id(mut self, id: Option<i64>) -> Self {
        self.aruco_id = id;
        self
    }

    pub fn with_apriltag_id(mut self, id: Option<i64>) -> Self {
        self.apriltag_id = id;
        self
    }
}
