//! CSV entry loader
//!
//! Reads a header-driven CSV file. The `id` column is required; `qr_value`,
//! `barcode_value`, `aruco_id` and `apriltag_id` are optional. Files are
//! decoded as UTF-8 (a leading byte order mark is dropped) and fall back to
//! Latin-1 when the bytes are not valid UTF-8.

use super::DataEntry;
use crate::error::DataError;
use std::path::Path;
use tracing::{debug, warn};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode raw file bytes into text.
pub fn decode_text(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!("CSV is not valid UTF-8, decoding as Latin-1");
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

/// Load all usable entries from a CSV file.
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<DataEntry>, DataError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DataError::NotFound {
            path: path.display().to_string(),
        });
    }

    let bytes = std::fs::read(path)?;
    let entries = parse_entries(&decode_text(&bytes))?;
    debug!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parse entries from already-decoded CSV text.
pub fn parse_entries(text: &str) -> Result<Vec<DataEntry>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.trim() == name);

    let id_col = column("id").ok_or(DataError::MissingIdColumn)?;
    let qr_col = column("qr_value");
    let barcode_col = column("barcode_value");
    let aruco_col = column("aruco_id");
    let apriltag_col = column("apriltag_id");

    let mut entries = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // Header is row 1.
        let row_num = index + 2;

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }

        let id = record.get(id_col).unwrap_or("").trim();
        if id.is_empty() {
            warn!("Row {} has empty 'id', skipping", row_num);
            continue;
        }

        let field = |col: Option<usize>| col.and_then(|c| record.get(c));
        let entry = DataEntry::new(id, field(qr_col), field(barcode_col))
            .with_aruco_id(parse_numeric_id(field(aruco_col), "aruco_id", row_num))
            .with_apriltag_id(parse_numeric_id(
                field(apriltag_col),
                "apriltag_id",
                row_num,
            ));
        entries.push(entry);
    }

    if entries.is_empty() {
        return Err(DataError::NoEntries);
    }
    Ok(entries)
}

fn parse_numeric_id(value: Option<&str>, column: &str, row_num: usize) -> Option<i64> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    match value.parse::<i64>() {
        Ok(id) => Some(id),
        Err(_) => {
            warn!(
                "Row {}: '{}' is not a valid {}, ignoring",
                row_num, value, column
            );
            None
        }
    }
}
