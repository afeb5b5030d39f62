//! Barcode Generator
//!
//! Renders 1D barcodes (Code 128, Code 39, EAN-13, Interleaved 2 of 5) as
//! bitmaps whose width follows from the encoded module count. Bars are
//! `height_mm` tall and flanked by a quiet zone on both sides.

use crate::bitmap::{RenderedCode, BLACK, WHITE};
use crate::error::{GenerationError, GenerationResult};
use crate::CodeGenerator;
use barcoders::sym::code128::Code128;
use barcoders::sym::code39::Code39;
use barcoders::sym::ean13::EAN13;
use barcoders::sym::tf::TF;
use image::GrayImage;
use labelkit_core::units::{mm_to_px, Dpi};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Characters accepted by Code 39 after upper-casing
const CODE39_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789-.$/+% ";

/// Module width multiplier is relative to this resolution
const REFERENCE_DPI: f64 = 300.0;

/// Supported 1D symbologies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Symbology {
    #[default]
    Code128,
    Code39,
    Ean13,
    /// Interleaved 2 of 5
    #[serde(alias = "i2of5")]
    Itf,
}

impl Symbology {
    pub fn label(&self) -> &'static str {
        match self {
            Symbology::Code128 => "Code 128",
            Symbology::Code39 => "Code 39",
            Symbology::Ean13 => "EAN-13",
            Symbology::Itf => "Interleaved 2 of 5",
        }
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbology::Code128 => write!(f, "code128"),
            Symbology::Code39 => write!(f, "code39"),
            Symbology::Ean13 => write!(f, "ean13"),
            Symbology::Itf => write!(f, "itf"),
        }
    }
}

impl FromStr for Symbology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "code128" => Ok(Symbology::Code128),
            "code39" => Ok(Symbology::Code39),
            "ean13" => Ok(Symbology::Ean13),
            "itf" | "i2of5" => Ok(Symbology::Itf),
            other => Err(format!(
                "Unsupported barcode symbology: {}. Supported: code128, code39, ean13, i2of5, itf",
                other
            )),
        }
    }
}

/// Barcode rendering parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BarcodeParameters {
    pub symbology: Symbology,
    /// Bar height (mm)
    pub height_mm: f64,
    /// Narrow module width in pixels at 300 dpi; scaled for other resolutions
    pub width_factor: f64,
    /// Blank margin left and right of the bars (mm)
    pub quiet_zone_mm: f64,
    pub dpi: Dpi,
}

impl Default for BarcodeParameters {
    fn default() -> Self {
        Self {
            symbology: Symbology::Code128,
            height_mm: 15.0,
            width_factor: 2.0,
            quiet_zone_mm: 10.0,
            dpi: Dpi::default(),
        }
    }
}

/// EAN-13 check digit for the first 12 digits of `digits`.
///
/// `None` when fewer than 12 leading characters are digits.
pub fn ean13_check_digit(digits: &str) -> Option<u32> {
    let mut sum = 0;
    for (i, c) in digits.chars().take(12).enumerate() {
        let digit = c.to_digit(10)?;
        sum += if i % 2 == 0 { digit } else { 3 * digit };
        if i == 11 {
            return Some((10 - sum % 10) % 10);
        }
    }
    None
}

/// `(supplied, expected)` when a 13-digit EAN-13 value carries a wrong check digit
pub fn ean13_check_mismatch(data: &str) -> Option<(u32, u32)> {
    if data.len() != 13 {
        return None;
    }
    let supplied = data.chars().nth(12)?.to_digit(10)?;
    let expected = ean13_check_digit(data)?;
    (supplied != expected).then_some((supplied, expected))
}

/// 1D barcode generator
#[derive(Debug, Clone)]
pub struct BarcodeGenerator {
    params: BarcodeParameters,
}

impl BarcodeGenerator {
    pub fn new(params: BarcodeParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &BarcodeParameters {
        &self.params
    }

    pub fn symbology(&self) -> Symbology {
        self.params.symbology
    }

    /// Width of one narrow module in device pixels
    pub fn module_px(&self) -> u32 {
        let scaled = self.params.width_factor * self.params.dpi.get() as f64 / REFERENCE_DPI;
        (scaled.round() as u32).max(1)
    }

    /// Adapt `data` to the symbology's alphabet
    pub fn normalize(&self, data: &str) -> String {
        match self.params.symbology {
            Symbology::Code39 => data.to_uppercase(),
            _ => data.to_string(),
        }
    }

    fn encode(&self, data: &str) -> GenerationResult<Vec<u8>> {
        let name = self.params.symbology.label();
        let modules = match self.params.symbology {
            // Character set B covers printable ASCII
            Symbology::Code128 => Code128::new(format!("\u{0181}{}", data)).map(|c| c.encode()),
            Symbology::Code39 => Code39::new(data).map(|c| c.encode()),
            // The check digit is always recomputed
            Symbology::Ean13 => {
                if let Some((supplied, expected)) = ean13_check_mismatch(data) {
                    warn!(
                        "EAN-13 value {} has check digit {}, expected {}; encoding with {}",
                        data, supplied, expected, expected
                    );
                }
                EAN13::new(data.get(..12).unwrap_or(data)).map(|c| c.encode())
            }
            Symbology::Itf => TF::interleaved(data).map(|c| c.encode()),
        };
        modules.map_err(|e| GenerationError::encoding(name, e))
    }
}

impl CodeGenerator for BarcodeGenerator {
    type Input = str;

    fn validate(&self, data: &str) -> Result<(), String> {
        if data.is_empty() {
            return Err("Barcode data is empty".to_string());
        }

        match self.params.symbology {
            Symbology::Code128 => {
                if !data.is_ascii() {
                    return Err("Code 128 only supports ASCII characters".to_string());
                }
            }
            Symbology::Code39 => {
                if !data
                    .chars()
                    .all(|c| CODE39_CHARSET.contains(c.to_ascii_uppercase()))
                {
                    return Err(
                        "Code 39 only supports: A-Z, 0-9, and symbols: - . $ / + % SPACE"
                            .to_string(),
                    );
                }
            }
            Symbology::Ean13 => {
                if !data.chars().all(|c| c.is_ascii_digit()) {
                    return Err("EAN-13 requires numeric only (0-9)".to_string());
                }
                if data.len() != 12 && data.len() != 13 {
                    return Err(format!(
                        "EAN-13 requires exactly 12 or 13 digits, got {}",
                        data.len()
                    ));
                }
            }
            Symbology::Itf => {
                if !data.chars().all(|c| c.is_ascii_digit()) {
                    return Err("Interleaved 2 of 5 requires numeric only (0-9)".to_string());
                }
                if data.len() % 2 != 0 {
                    return Err(format!(
                        "Interleaved 2 of 5 requires even number of digits, got {}",
                        data.len()
                    ));
                }
            }
        }
        Ok(())
    }

    fn generate(&self, data: &str) -> GenerationResult<RenderedCode> {
        let name = self.params.symbology.label();
        self.validate(data)
            .map_err(|reason| GenerationError::invalid_input(name, reason))?;

        let modules = self.encode(&self.normalize(data))?;
        let module_px = self.module_px();
        let quiet_px = mm_to_px(self.params.quiet_zone_mm, self.params.dpi);
        let height_px = mm_to_px(self.params.height_mm, self.params.dpi);
        if height_px == 0 || modules.is_empty() {
            return Err(GenerationError::EmptyBitmap(format!(
                "{} barcode of {}mm",
                name, self.params.height_mm
            )));
        }

        let bars_px = modules.len() as u32 * module_px;
        let width_px = bars_px + 2 * quiet_px;
        let image = GrayImage::from_fn(width_px, height_px, |x, _| {
            if x < quiet_px || x >= quiet_px + bars_px {
                return WHITE;
            }
            let module = ((x - quiet_px) / module_px) as usize;
            if modules.get(module) == Some(&1) {
                BLACK
            } else {
                WHITE
            }
        });

        Ok(RenderedCode::from_image(image, self.params.dpi))
    }
}
