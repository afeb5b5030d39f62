//! Configuration for LabelKit runs
//!
//! Provides configuration file handling, override merging, and validation.
//! Supports JSON and TOML file formats, chosen by file extension.
//!
//! Configuration is organized into logical sections:
//! - Input and output files, page margin and resolution
//! - Grid layout and code arrangement
//! - QR code, barcode and caption styling
//! - ArUco and AprilTag marker settings
//! - Numeric marker ID assignment
//!
//! Every field has a default, so a file only needs the values it changes.

use crate::error::{ConfigError, SettingsError, SettingsResult};
use crate::overrides::ConfigOverrides;
use labelkit_core::units::Dpi;
use labelkit_generators::{
    AprilTagFamily, AprilTagParameters, ArucoDictionary, ArucoParameters, BarcodeParameters,
    ErrorCorrection, QrParameters, Symbology,
};
use labelkit_layout::{
    Arrangement, CaptionMode, CaptionStyle, CodePairParams, GridSpec, PageSpec, TextAlign,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Smallest caption font size in points
pub const MIN_FONT_SIZE_PT: f64 = 6.0;
/// Largest caption font size in points
pub const MAX_FONT_SIZE_PT: f64 = 72.0;

/// Input data settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputSettings {
    /// CSV file with one label per row
    pub csv: PathBuf,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            csv: PathBuf::from("ids.csv"),
        }
    }
}

/// Output document settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// PDF file to write; the extension is forced to `.pdf`
    pub file: PathBuf,
    /// Uniform page margin (mm)
    pub margin_mm: f64,
    /// Bitmap resolution for every generated code
    pub dpi: Dpi,
    /// Replace an existing output file
    pub overwrite: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            file: PathBuf::from("output.pdf"),
            margin_mm: 10.0,
            dpi: Dpi::default(),
            overwrite: false,
        }
    }
}

/// Grid and arrangement settings
///
/// Either the label dimensions or the grid counts drive the layout; the
/// other pair is derived. When both are complete, dimensions win.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub label_width_mm: Option<f64>,
    pub label_height_mm: Option<f64>,
    pub labels_per_row: Option<u32>,
    pub labels_per_column: Option<u32>,
    pub horizontal_gap_mm: f64,
    pub vertical_gap_mm: f64,
    pub code_arrangement: Arrangement,
    /// Gap between the QR code and the barcode (mm)
    pub code_spacing_mm: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            label_width_mm: None,
            label_height_mm: None,
            labels_per_row: Some(3),
            labels_per_column: Some(7),
            horizontal_gap_mm: 5.0,
            vertical_gap_mm: 5.0,
            code_arrangement: Arrangement::Horizontal,
            code_spacing_mm: 5.0,
        }
    }
}

/// QR code settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrSettings {
    pub size_mm: f64,
    pub error_correction: ErrorCorrection,
    /// Quiet zone in modules
    pub quiet_zone: u32,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            size_mm: 25.0,
            error_correction: ErrorCorrection::M,
            quiet_zone: 4,
        }
    }
}

/// 1D barcode settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarcodeSettings {
    pub symbology: Symbology,
    pub height_mm: f64,
    pub width_factor: f64,
    #[serde(alias = "quiet_zone")]
    pub quiet_zone_mm: f64,
}

impl Default for BarcodeSettings {
    fn default() -> Self {
        Self {
            symbology: Symbology::Code128,
            height_mm: 15.0,
            width_factor: 2.0,
            quiet_zone_mm: 10.0,
        }
    }
}

/// Caption text settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextSettings {
    /// Font size in points
    pub font_size: f64,
    pub font_name: String,
    pub position: CaptionMode,
    pub alignment: TextAlign,
    pub margin_mm: f64,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            font_name: "Helvetica".to_string(),
            position: CaptionMode::Bottom,
            alignment: TextAlign::Center,
            margin_mm: 2.0,
        }
    }
}

/// ArUco marker settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArucoSettings {
    pub enabled: bool,
    pub dictionary: ArucoDictionary,
    pub pattern_size_mm: f64,
    pub border_bits: u32,
    pub quiet_zone_mm: f64,
    /// JSON codebook with the dictionary's bit patterns
    pub codebook: Option<PathBuf>,
}

impl Default for ArucoSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            dictionary: ArucoDictionary::default(),
            pattern_size_mm: 20.0,
            border_bits: 1,
            quiet_zone_mm: 5.0,
            codebook: None,
        }
    }
}

/// AprilTag settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AprilTagSettings {
    pub enabled: bool,
    pub family: AprilTagFamily,
    pub pattern_size_mm: f64,
    pub border_mm: f64,
    pub quiet_zone_mm: f64,
    /// JSON codebook with the family's bit patterns
    pub codebook: Option<PathBuf>,
}

impl Default for AprilTagSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            family: AprilTagFamily::Tag36h11,
            pattern_size_mm: 20.0,
            border_mm: 2.0,
            quiet_zone_mm: 5.0,
            codebook: None,
        }
    }
}

/// Numeric marker ID assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdAssignment {
    /// Use `start_index + row` when a row has no marker ID
    pub auto_assign_numeric_ids: bool,
    pub start_index: u64,
}

impl Default for IdAssignment {
    fn default() -> Self {
        Self {
            auto_assign_numeric_ids: true,
            start_index: 0,
        }
    }
}

impl IdAssignment {
    /// Marker ID for the entry at `row`, given the ID its CSV row supplied.
    ///
    /// A supplied ID is returned as is, negative or not.
    pub fn resolve(&self, explicit: Option<i64>, row: usize) -> Option<i64> {
        explicit.or_else(|| {
            self.auto_assign_numeric_ids.then(|| {
                let id = self.start_index.saturating_add(row as u64);
                i64::try_from(id).unwrap_or(i64::MAX)
            })
        })
    }
}

/// Complete run configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LabelConfig {
    pub input: InputSettings,
    pub output: OutputSettings,
    pub layout: LayoutSettings,
    pub qr: QrSettings,
    pub barcode: BarcodeSettings,
    pub text: TextSettings,
    pub aruco: ArucoSettings,
    pub apriltag: AprilTagSettings,
    pub id_assignment: IdAssignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);
    match ext.as_deref() {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )
        .into()),
    }
}

impl LabelConfig {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    ///
    /// Values are not validated here; call [`LabelConfig::validate`] once
    /// overrides have been applied.
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("cannot read {}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content).map_err(|e| {
            SettingsError::SaveError(format!("cannot write {}: {}", path.display(), e))
        })?;
        Ok(())
    }

    /// Apply command-line overrides on top of this configuration
    pub fn merge(&mut self, overrides: &ConfigOverrides) {
        overrides.apply_to(self);
    }

    /// Validate value ranges
    ///
    /// Filesystem checks and grid resolution happen when a run plan is built.
    pub fn validate(&self) -> SettingsResult<()> {
        let dpi = self.output.dpi;
        if !dpi.is_supported() {
            return Err(SettingsError::invalid(
                "output.dpi",
                format!(
                    "DPI must be between {} and {}, got {}",
                    Dpi::MIN.get(),
                    Dpi::MAX.get(),
                    dpi.get()
                ),
            ));
        }

        self.page()
            .validate()
            .map_err(|reason| SettingsError::invalid("output.margin_mm", reason))?;

        let font = self.text.font_size;
        if !(MIN_FONT_SIZE_PT..=MAX_FONT_SIZE_PT).contains(&font) {
            return Err(SettingsError::invalid(
                "text.font_size",
                format!(
                    "Font size must be between {} and {} points, got {}",
                    MIN_FONT_SIZE_PT, MAX_FONT_SIZE_PT, font
                ),
            ));
        }
        if self.text.font_name.trim().is_empty() {
            return Err(SettingsError::invalid("text.font_name", "must not be empty"));
        }

        positive("qr.size_mm", self.qr.size_mm)?;
        positive("barcode.height_mm", self.barcode.height_mm)?;
        positive("barcode.width_factor", self.barcode.width_factor)?;
        positive("aruco.pattern_size_mm", self.aruco.pattern_size_mm)?;
        positive("apriltag.pattern_size_mm", self.apriltag.pattern_size_mm)?;

        non_negative("layout.horizontal_gap_mm", self.layout.horizontal_gap_mm)?;
        non_negative("layout.vertical_gap_mm", self.layout.vertical_gap_mm)?;
        non_negative("layout.code_spacing_mm", self.layout.code_spacing_mm)?;
        non_negative("barcode.quiet_zone_mm", self.barcode.quiet_zone_mm)?;
        non_negative("text.margin_mm", self.text.margin_mm)?;
        non_negative("aruco.quiet_zone_mm", self.aruco.quiet_zone_mm)?;
        non_negative("apriltag.border_mm", self.apriltag.border_mm)?;
        non_negative("apriltag.quiet_zone_mm", self.apriltag.quiet_zone_mm)?;

        if self.aruco.enabled && self.aruco.border_bits == 0 {
            return Err(ConfigError::out_of_range("aruco.border_bits", 0).into());
        }
        if self.aruco.enabled && self.aruco.codebook.is_none() {
            return Err(ConfigError::MissingKey("aruco.codebook".to_string()).into());
        }
        if !self.aruco.enabled && self.apriltag.enabled && self.apriltag.codebook.is_none() {
            return Err(ConfigError::MissingKey("apriltag.codebook".to_string()).into());
        }

        Ok(())
    }

    /// Whether labels carry a single fiducial marker instead of a code pair
    pub fn is_marker_mode(&self) -> bool {
        self.aruco.enabled || self.apriltag.enabled
    }

    pub fn page(&self) -> PageSpec {
        PageSpec::a4(self.output.margin_mm)
    }

    pub fn grid_spec(&self) -> GridSpec {
        GridSpec {
            label_width_mm: self.layout.label_width_mm,
            label_height_mm: self.layout.label_height_mm,
            labels_per_row: self.layout.labels_per_row,
            labels_per_column: self.layout.labels_per_column,
            horizontal_gap_mm: self.layout.horizontal_gap_mm,
            vertical_gap_mm: self.layout.vertical_gap_mm,
        }
    }

    pub fn caption_style(&self) -> CaptionStyle {
        CaptionStyle {
            mode: self.text.position,
            align: self.text.alignment,
            font_size_pt: self.text.font_size,
            margin_mm: self.text.margin_mm,
        }
    }

    pub fn code_pair_params(&self) -> CodePairParams {
        CodePairParams {
            qr_size_mm: self.qr.size_mm,
            barcode_height_mm: self.barcode.height_mm,
            code_spacing_mm: self.layout.code_spacing_mm,
            arrangement: self.layout.code_arrangement,
        }
    }

    pub fn qr_parameters(&self) -> QrParameters {
        QrParameters {
            size_mm: self.qr.size_mm,
            error_correction: self.qr.error_correction,
            quiet_zone: self.qr.quiet_zone,
            dpi: self.output.dpi,
        }
    }

    pub fn barcode_parameters(&self) -> BarcodeParameters {
        BarcodeParameters {
            symbology: self.barcode.symbology,
            height_mm: self.barcode.height_mm,
            width_factor: self.barcode.width_factor,
            quiet_zone_mm: self.barcode.quiet_zone_mm,
            dpi: self.output.dpi,
        }
    }

    pub fn aruco_parameters(&self) -> ArucoParameters {
        ArucoParameters {
            dictionary: self.aruco.dictionary,
            pattern_size_mm: self.aruco.pattern_size_mm,
            border_bits: self.aruco.border_bits,
            quiet_zone_mm: self.aruco.quiet_zone_mm,
            dpi: self.output.dpi,
        }
    }

    pub fn apriltag_parameters(&self) -> AprilTagParameters {
        AprilTagParameters {
            family: self.apriltag.family,
            pattern_size_mm: self.apriltag.pattern_size_mm,
            border_mm: self.apriltag.border_mm,
            quiet_zone_mm: self.apriltag.quiet_zone_mm,
            dpi: self.output.dpi,
        }
    }
}

fn positive(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value).into())
    }
}

fn non_negative(key: &str, value: f64) -> SettingsResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::out_of_range(key, value).into())
    }
}
