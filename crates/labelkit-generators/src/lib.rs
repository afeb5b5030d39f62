//! # LabelKit Generators
//!
//! Bitmap generators for label content: QR codes, 1D barcodes, ArUco
//! markers and AprilTags. Each generator validates its input, renders a
//! grayscale bitmap at the configured DPI, and reports the physical size of
//! what it drew.

pub mod barcode;
pub mod bitmap;
pub mod error;
pub mod markers;
pub mod qr;

pub use barcode::{BarcodeGenerator, BarcodeParameters, Symbology};
pub use bitmap::RenderedCode;
pub use error::{GenerationError, GenerationResult};
pub use markers::{
    AprilTagFamily, AprilTagGenerator, AprilTagParameters, ArucoDictionary, ArucoGenerator,
    ArucoParameters, Codebook, MarkerGenerator,
};
pub use qr::{ErrorCorrection, QrGenerator, QrParameters};

/// Common interface of every content generator
pub trait CodeGenerator {
    /// Payload type: text for codes, a numeric ID for markers
    type Input: ?Sized;

    /// Check that `input` can be encoded, returning the reason if not
    fn validate(&self, input: &Self::Input) -> Result<(), String>;

    /// Render `input` to a bitmap
    fn generate(&self, input: &Self::Input) -> GenerationResult<RenderedCode>;
}
