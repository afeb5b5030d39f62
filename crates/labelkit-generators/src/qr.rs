//! QR Code Generator
//!
//! Encodes a text payload as a QR code and renders it to a square bitmap of
//! a fixed physical size, quiet zone included.

use crate::bitmap::{sample_cells, RenderedCode};
use crate::error::{GenerationError, GenerationResult};
use crate::CodeGenerator;
use labelkit_core::units::{mm_to_px, Dpi};
use qrcode::{Color, EcLevel, QrCode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// QR error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ErrorCorrection {
    #[serde(alias = "l")]
    L,
    #[default]
    #[serde(alias = "m")]
    M,
    #[serde(alias = "q")]
    Q,
    #[serde(alias = "h")]
    H,
}

impl ErrorCorrection {
    fn ec_level(self) -> EcLevel {
        match self {
            ErrorCorrection::L => EcLevel::L,
            ErrorCorrection::M => EcLevel::M,
            ErrorCorrection::Q => EcLevel::Q,
            ErrorCorrection::H => EcLevel::H,
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCorrection::L => "L",
            ErrorCorrection::M => "M",
            ErrorCorrection::Q => "Q",
            ErrorCorrection::H => "H",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "L" => Ok(ErrorCorrection::L),
            "M" => Ok(ErrorCorrection::M),
            "Q" => Ok(ErrorCorrection::Q),
            "H" => Ok(ErrorCorrection::H),
            other => Err(format!(
                "QR error correction must be L, M, Q, or H, got {}",
                other
            )),
        }
    }
}

/// QR rendering parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QrParameters {
    /// Side length of the rendered code, quiet zone included (mm)
    pub size_mm: f64,
    pub error_correction: ErrorCorrection,
    /// Quiet zone width in modules
    pub quiet_zone: u32,
    pub dpi: Dpi,
}

impl Default for QrParameters {
    fn default() -> Self {
        Self {
            size_mm: 25.0,
            error_correction: ErrorCorrection::M,
            quiet_zone: 4,
            dpi: Dpi::default(),
        }
    }
}

/// QR code generator
#[derive(Debug, Clone)]
pub struct QrGenerator {
    params: QrParameters,
}

impl QrGenerator {
    pub fn new(params: QrParameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &QrParameters {
        &self.params
    }

    /// Physical footprint of every generated code
    pub fn size_mm(&self) -> f64 {
        self.params.size_mm
    }

    pub fn size_px(&self) -> u32 {
        mm_to_px(self.params.size_mm, self.params.dpi)
    }
}

impl CodeGenerator for QrGenerator {
    type Input = str;

    fn validate(&self, data: &str) -> Result<(), String> {
        if data.is_empty() {
            return Err("QR payload is empty".to_string());
        }
        Ok(())
    }

    fn generate(&self, data: &str) -> GenerationResult<RenderedCode> {
        self.validate(data)
            .map_err(|reason| GenerationError::invalid_input("QR", reason))?;

        let size_px = self.size_px();
        if size_px == 0 {
            return Err(GenerationError::EmptyBitmap(format!(
                "QR code of {}mm",
                self.params.size_mm
            )));
        }

        let code = QrCode::with_error_correction_level(
            data.as_bytes(),
            self.params.error_correction.ec_level(),
        )
        .map_err(|e| GenerationError::encoding("QR", e))?;
        let width = code.width() as u32;
        let colors = code.to_colors();
        let quiet = self.params.quiet_zone;
        let total = width + 2 * quiet;

        // Modules plus quiet zone, stretched onto the target pixel square
        let symbol = sample_cells(total, size_px, |x, y| {
            if x < quiet || y < quiet || x >= quiet + width || y >= quiet + width {
                return false;
            }
            let index = ((y - quiet) * width + (x - quiet)) as usize;
            colors.get(index) == Some(&Color::Dark)
        });

        Ok(RenderedCode::with_size(
            symbol,
            self.params.size_mm,
            self.params.size_mm,
        ))
    }
}
