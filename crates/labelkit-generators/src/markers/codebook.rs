//! Marker codebooks
//!
//! A codebook holds the data-bit pattern for every ID of a marker family.
//! It is stored as JSON:
//!
//! ```json
//! { "bits": 25, "codes": [10543127, 2293802, ...] }
//! ```
//!
//! Bits are laid out row-major, most significant bit first, so bit
//! `bits - 1` is the top-left data cell. A set bit is a white cell.

use crate::error::{GenerationError, GenerationResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Codebook {
    /// Data bits per marker
    pub bits: u32,
    /// One pattern per marker ID, indexed by ID
    pub codes: Vec<u64>,
}

impl Codebook {
    pub fn new(bits: u32, codes: Vec<u64>) -> GenerationResult<Self> {
        let codebook = Self { bits, codes };
        codebook.validate()?;
        Ok(codebook)
    }

    pub fn from_json(json: &str) -> GenerationResult<Self> {
        let codebook: Codebook = serde_json::from_str(json)?;
        codebook.validate()?;
        Ok(codebook)
    }

    pub fn load(path: impl AsRef<Path>) -> GenerationResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            GenerationError::Codebook(format!("cannot read {}: {}", path.display(), e))
        })?;
        let codebook = Self::from_json(&json)?;
        debug!(
            "Loaded codebook {} with {} codes of {} bits",
            path.display(),
            codebook.len(),
            codebook.bits
        );
        Ok(codebook)
    }

    fn validate(&self) -> GenerationResult<()> {
        if self.bits == 0 || self.bits > 64 {
            return Err(GenerationError::Codebook(format!(
                "bits must be between 1 and 64, got {}",
                self.bits
            )));
        }
        if self.bits < 64 {
            if let Some(index) = self.codes.iter().position(|&c| c >> self.bits != 0) {
                return Err(GenerationError::Codebook(format!(
                    "code {} does not fit in {} bits",
                    index, self.bits
                )));
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn code(&self, id: u64) -> Option<u64> {
        usize::try_from(id)
            .ok()
            .and_then(|i| self.codes.get(i))
            .copied()
    }

    /// Whether data bit `index` (row-major, zero-based) of `code` is set
    pub fn bit(&self, code: u64, index: u32) -> bool {
        index < self.bits && (code >> (self.bits - 1 - index)) & 1 == 1
    }
}
