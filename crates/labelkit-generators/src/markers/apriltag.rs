//! AprilTag Generator
//!
//! Renders AprilTags from a [`Codebook`]. The tag pattern is a white outer
//! ring, a black ring and the data cells. It is drawn inside a black border
//! of `border_mm` and a white quiet zone.

use super::codebook::Codebook;
use super::{codebook_index, validate_id, MarkerGenerator};
use crate::bitmap::{pad, sample_cells, RenderedCode, BLACK, WHITE};
use crate::error::{GenerationError, GenerationResult};
use crate::CodeGenerator;
use labelkit_core::units::{mm_to_px, Dpi};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported AprilTag families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AprilTagFamily {
    #[default]
    Tag36h11,
    Tag25h9,
    Tag16h5,
    Tag21h7,
    TagStandard41h12,
    TagStandard52h13,
    TagCircle21h7,
    TagCircle49h12,
    TagCustom48h12,
}

impl AprilTagFamily {
    pub const ALL: [AprilTagFamily; 9] = [
        AprilTagFamily::Tag36h11,
        AprilTagFamily::Tag25h9,
        AprilTagFamily::Tag16h5,
        AprilTagFamily::Tag21h7,
        AprilTagFamily::TagStandard41h12,
        AprilTagFamily::TagStandard52h13,
        AprilTagFamily::TagCircle21h7,
        AprilTagFamily::TagCircle49h12,
        AprilTagFamily::TagCustom48h12,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AprilTagFamily::Tag36h11 => "tag36h11",
            AprilTagFamily::Tag25h9 => "tag25h9",
            AprilTagFamily::Tag16h5 => "tag16h5",
            AprilTagFamily::Tag21h7 => "tag21h7",
            AprilTagFamily::TagStandard41h12 => "tagStandard41h12",
            AprilTagFamily::TagStandard52h13 => "tagStandard52h13",
            AprilTagFamily::TagCircle21h7 => "tagCircle21h7",
            AprilTagFamily::TagCircle49h12 => "tagCircle49h12",
            AprilTagFamily::TagCustom48h12 => "tagCustom48h12",
        }
    }

    /// Data bits per tag
    pub fn data_bits(&self) -> u32 {
        match self {
            AprilTagFamily::Tag36h11 => 36,
            AprilTagFamily::Tag25h9 => 25,
            AprilTagFamily::Tag16h5 => 16,
            AprilTagFamily::Tag21h7 | AprilTagFamily::TagCircle21h7 => 21,
            AprilTagFamily::TagStandard41h12 => 41,
            AprilTagFamily::TagStandard52h13 => 52,
            AprilTagFamily::TagCircle49h12 => 49,
            AprilTagFamily::TagCustom48h12 => 48,
        }
    }

    /// Number of IDs the family defines
    pub fn max_count(&self) -> u64 {
        match self {
            AprilTagFamily::Tag36h11 => 58797,
            AprilTagFamily::Tag25h9 => 35588,
            AprilTagFamily::Tag16h5 => 30,
            AprilTagFamily::Tag21h7 | AprilTagFamily::TagCircle21h7 => 127,
            AprilTagFamily::TagStandard41h12 | AprilTagFamily::TagCircle49h12 => 2114074,
            AprilTagFamily::TagStandard52h13 | AprilTagFamily::TagCustom48h12 => 58535,
        }
    }

    /// Side of the square data area in cells; unused trailing cells stay white
    pub fn data_side(&self) -> u32 {
        let bits = self.data_bits();
        let mut side = 1;
        while side * side < bits {
            side += 1;
        }
        side
    }
}

impl fmt::Display for AprilTagFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for AprilTagFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|family| family.name().to_lowercase() == wanted)
            .copied()
            .ok_or_else(|| {
                let names: Vec<_> = Self::ALL.iter().map(|f| f.name()).collect();
                format!(
                    "Unknown AprilTag family: {}. Supported families: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}

impl TryFrom<String> for AprilTagFamily {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AprilTagFamily> for String {
    fn from(value: AprilTagFamily) -> Self {
        value.name().to_string()
    }
}

/// AprilTag rendering parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AprilTagParameters {
    pub family: AprilTagFamily,
    /// Tag pattern side length, excluding border and quiet zone (mm)
    pub pattern_size_mm: f64,
    /// Black border around the pattern (mm)
    pub border_mm: f64,
    /// White margin around the border (mm)
    pub quiet_zone_mm: f64,
    pub dpi: Dpi,
}

impl Default for AprilTagParameters {
    fn default() -> Self {
        Self {
            family: AprilTagFamily::Tag36h11,
            pattern_size_mm: 20.0,
            border_mm: 2.0,
            quiet_zone_mm: 5.0,
            dpi: Dpi::default(),
        }
    }
}

/// AprilTag generator
#[derive(Debug, Clone)]
pub struct AprilTagGenerator {
    params: AprilTagParameters,
    codebook: Codebook,
}

impl AprilTagGenerator {
    pub fn new(params: AprilTagParameters, codebook: Codebook) -> GenerationResult<Self> {
        let expected = params.family.data_bits();
        if codebook.bits != expected {
            return Err(GenerationError::Codebook(format!(
                "{} needs {} bits per code, codebook has {}",
                params.family, expected, codebook.bits
            )));
        }
        Ok(Self { params, codebook })
    }

    pub fn params(&self) -> &AprilTagParameters {
        &self.params
    }
}

impl CodeGenerator for AprilTagGenerator {
    type Input = i64;

    fn validate(&self, id: &i64) -> Result<(), String> {
        validate_id("AprilTag", &self.params.family.to_string(), *id, self.id_count())
    }

    fn generate(&self, id: &i64) -> GenerationResult<RenderedCode> {
        let index = codebook_index(&self.params.family.to_string(), *id, self.id_count())?;
        let code = self.codebook.code(index).ok_or_else(|| GenerationError::IdOutOfRange {
            family: self.params.family.to_string(),
            id: *id,
            max: self.id_count().saturating_sub(1),
        })?;

        let dpi = self.params.dpi;
        let pattern_px = mm_to_px(self.params.pattern_size_mm, dpi);
        if pattern_px == 0 {
            return Err(GenerationError::EmptyBitmap(format!(
                "AprilTag pattern of {}mm",
                self.params.pattern_size_mm
            )));
        }

        let side = self.params.family.data_side();
        let cells = side + 4;
        let pattern = sample_cells(cells, pattern_px, |x, y| {
            let ring = x.min(y).min(cells - 1 - x).min(cells - 1 - y);
            match ring {
                0 => false,
                1 => true,
                _ => {
                    let index = (y - 2) * side + (x - 2);
                    index < self.codebook.bits && !self.codebook.bit(code, index)
                }
            }
        });

        let bordered = pad(&pattern, mm_to_px(self.params.border_mm, dpi), BLACK);
        let image = pad(&bordered, mm_to_px(self.params.quiet_zone_mm, dpi), WHITE);
        let footprint = self.footprint_size_mm();
        Ok(RenderedCode::with_size(image, footprint, footprint))
    }
}

impl MarkerGenerator for AprilTagGenerator {
    fn family_name(&self) -> String {
        self.params.family.to_string()
    }

    fn footprint_size_mm(&self) -> f64 {
        self.params.pattern_size_mm + 2.0 * self.params.border_mm + 2.0 * self.params.quiet_zone_mm
    }

    /// Family size, capped by the codebook length
    fn id_count(&self) -> u64 {
        self.params.family.max_count().min(self.codebook.len() as u64)
    }
}
