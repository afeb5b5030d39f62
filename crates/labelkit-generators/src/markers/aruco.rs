//! ArUco Marker Generator
//!
//! Renders square ArUco markers from a predefined dictionary name such as
//! `DICT_5X5_100`. The data cells come from a [`Codebook`]; the marker is
//! framed by `border_bits` black cells and surrounded by a white quiet zone.

use super::codebook::Codebook;
use super::{codebook_index, validate_id, MarkerGenerator};
use crate::bitmap::{pad, sample_cells, RenderedCode, WHITE};
use crate::error::{GenerationError, GenerationResult};
use crate::CodeGenerator;
use labelkit_core::units::{mm_to_px, Dpi};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const MARKER_SIZES: [u32; 4] = [4, 5, 6, 7];
const DICTIONARY_SIZES: [u64; 4] = [50, 100, 250, 1000];

/// A predefined ArUco dictionary: `n`x`n` data bits and a fixed ID count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArucoDictionary {
    pub marker_bits: u32,
    pub size: u64,
}

impl ArucoDictionary {
    /// Names of every supported dictionary
    pub fn names() -> Vec<String> {
        MARKER_SIZES
            .iter()
            .flat_map(|n| DICTIONARY_SIZES.iter().map(move |s| format!("DICT_{n}X{n}_{s}")))
            .collect()
    }

    /// Number of data bits per marker
    pub fn data_bits(&self) -> u32 {
        self.marker_bits * self.marker_bits
    }
}

impl Default for ArucoDictionary {
    fn default() -> Self {
        Self {
            marker_bits: 5,
            size: 100,
        }
    }
}

impl fmt::Display for ArucoDictionary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DICT_{n}X{n}_{s}",
            n = self.marker_bits,
            s = self.size
        )
    }
}

impl FromStr for ArucoDictionary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || {
            format!(
                "Unknown ArUco dictionary: {}. Supported dictionaries: {}",
                s,
                Self::names().join(", ")
            )
        };

        let upper = s.trim().to_uppercase();
        let rest = upper.strip_prefix("DICT_").ok_or_else(unknown)?;
        let (grid, size) = rest.split_once('_').ok_or_else(unknown)?;
        let (a, b) = grid.split_once('X').ok_or_else(unknown)?;

        let marker_bits: u32 = a.parse().map_err(|_| unknown())?;
        let size: u64 = size.parse().map_err(|_| unknown())?;
        if a != b || !MARKER_SIZES.contains(&marker_bits) || !DICTIONARY_SIZES.contains(&size) {
            return Err(unknown());
        }
        Ok(Self { marker_bits, size })
    }
}

impl TryFrom<String> for ArucoDictionary {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ArucoDictionary> for String {
    fn from(value: ArucoDictionary) -> Self {
        value.to_string()
    }
}

/// ArUco rendering parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArucoParameters {
    pub dictionary: ArucoDictionary,
    /// Marker side length including the black border (mm)
    pub pattern_size_mm: f64,
    /// Black border width in cells
    pub border_bits: u32,
    /// White margin around the pattern (mm)
    pub quiet_zone_mm: f64,
    pub dpi: Dpi,
}

impl Default for ArucoParameters {
    fn default() -> Self {
        Self {
            dictionary: ArucoDictionary::default(),
            pattern_size_mm: 20.0,
            border_bits: 1,
            quiet_zone_mm: 5.0,
            dpi: Dpi::default(),
        }
    }
}

/// ArUco marker generator
#[derive(Debug, Clone)]
pub struct ArucoGenerator {
    params: ArucoParameters,
    codebook: Codebook,
}

impl ArucoGenerator {
    pub fn new(params: ArucoParameters, codebook: Codebook) -> GenerationResult<Self> {
        let expected = params.dictionary.data_bits();
        if codebook.bits != expected {
            return Err(GenerationError::Codebook(format!(
                "{} needs {} bits per code, codebook has {}",
                params.dictionary, expected, codebook.bits
            )));
        }
        if params.border_bits == 0 {
            return Err(GenerationError::InvalidParameters(
                "ArUco border_bits must be at least 1".to_string(),
            ));
        }
        Ok(Self { params, codebook })
    }

    pub fn params(&self) -> &ArucoParameters {
        &self.params
    }
}

impl CodeGenerator for ArucoGenerator {
    type Input = i64;

    fn validate(&self, id: &i64) -> Result<(), String> {
        validate_id("ArUco", &self.params.dictionary.to_string(), *id, self.id_count())
    }

    fn generate(&self, id: &i64) -> GenerationResult<RenderedCode> {
        let index = codebook_index(&self.params.dictionary.to_string(), *id, self.id_count())?;
        let code = self.codebook.code(index).ok_or_else(|| GenerationError::IdOutOfRange {
            family: self.params.dictionary.to_string(),
            id: *id,
            max: self.id_count().saturating_sub(1),
        })?;

        let dpi = self.params.dpi;
        let pattern_px = mm_to_px(self.params.pattern_size_mm, dpi);
        if pattern_px == 0 {
            return Err(GenerationError::EmptyBitmap(format!(
                "ArUco pattern of {}mm",
                self.params.pattern_size_mm
            )));
        }

        let n = self.params.dictionary.marker_bits;
        let border = self.params.border_bits;
        let cells = n + 2 * border;
        let pattern = sample_cells(cells, pattern_px, |x, y| {
            if x < border || y < border || x >= border + n || y >= border + n {
                return true;
            }
            let index = (y - border) * n + (x - border);
            !self.codebook.bit(code, index)
        });

        let quiet_px = mm_to_px(self.params.quiet_zone_mm, dpi);
        let image = pad(&pattern, quiet_px, WHITE);
        let footprint = self.footprint_size_mm();
        Ok(RenderedCode::with_size(image, footprint, footprint))
    }
}

impl MarkerGenerator for ArucoGenerator {
    fn family_name(&self) -> String {
        self.params.dictionary.to_string()
    }

    fn footprint_size_mm(&self) -> f64 {
        self.params.pattern_size_mm + 2.0 * self.params.quiet_zone_mm
    }

    /// Dictionary size, capped by the codebook length
    fn id_count(&self) -> u64 {
        self.params.dictionary.size.min(self.codebook.len() as u64)
    }
}
