//! Fiducial marker generators
//!
//! Markers are addressed by a numeric ID and rendered from a codebook of
//! bit patterns. Two families are provided:
//! - ArUco dictionaries (`DICT_4X4_50` to `DICT_7X7_1000`)
//! - AprilTag families (`tag36h11`, `tagStandard41h12`, ...)

pub mod apriltag;
pub mod aruco;
pub mod codebook;

pub use apriltag::{AprilTagFamily, AprilTagGenerator, AprilTagParameters};
pub use aruco::{ArucoDictionary, ArucoGenerator, ArucoParameters};
pub use codebook::Codebook;

use crate::error::{GenerationError, GenerationResult};
use crate::CodeGenerator;

/// A generator addressed by numeric marker ID
///
/// IDs are signed so that a negative ID read from input reaches
/// `validate` and is rejected there.
pub trait MarkerGenerator: CodeGenerator<Input = i64> + Send + Sync {
    /// Dictionary or family name, used in log output
    fn family_name(&self) -> String;

    /// Total physical side length, border and quiet zone included
    fn footprint_size_mm(&self) -> f64;

    /// Number of valid IDs, starting at zero
    fn id_count(&self) -> u64;
}

/// Check `id` against `count` usable IDs, naming `kind` in the reason
pub(crate) fn validate_id(kind: &str, family: &str, id: i64, count: u64) -> Result<(), String> {
    if id < 0 {
        return Err(format!("{} ID must be non-negative, got {}", kind, id));
    }
    if id as u64 >= count {
        return Err(format!(
            "{} ID {} exceeds maximum {} for {}",
            kind,
            id,
            count.saturating_sub(1),
            family
        ));
    }
    Ok(())
}

/// Codebook index of `id`, or the error explaining why there is none
pub(crate) fn codebook_index(family: &str, id: i64, count: u64) -> GenerationResult<u64> {
    match u64::try_from(id) {
        Ok(index) if index < count => Ok(index),
        Ok(_) => Err(GenerationError::IdOutOfRange {
            family: family.to_string(),
            id,
            max: count.saturating_sub(1),
        }),
        Err(_) => Err(GenerationError::NegativeId {
            family: family.to_string(),
            id,
        }),
    }
}
