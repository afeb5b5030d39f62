//! Command-line overrides
//!
//! Every field is optional; only the values that were given replace the
//! loaded configuration. Boolean switches can only turn a feature on.

use crate::config::LabelConfig;
use labelkit_core::units::Dpi;
use labelkit_generators::{AprilTagFamily, ArucoDictionary, ErrorCorrection, Symbology};
use labelkit_layout::{Arrangement, CaptionMode, TextAlign};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub csv: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub overwrite: bool,
    pub margin_mm: Option<f64>,
    pub dpi: Option<u32>,

    pub label_width_mm: Option<f64>,
    pub label_height_mm: Option<f64>,
    pub labels_per_row: Option<u32>,
    pub labels_per_column: Option<u32>,
    pub horizontal_gap_mm: Option<f64>,
    pub vertical_gap_mm: Option<f64>,
    pub code_arrangement: Option<Arrangement>,
    pub code_spacing_mm: Option<f64>,

    pub qr_size_mm: Option<f64>,
    pub qr_error_correction: Option<ErrorCorrection>,
    pub qr_quiet_zone: Option<u32>,

    pub barcode_symbology: Option<Symbology>,
    pub barcode_height_mm: Option<f64>,
    pub barcode_width_factor: Option<f64>,
    pub barcode_quiet_zone_mm: Option<f64>,

    pub text_font_size: Option<f64>,
    pub text_font_name: Option<String>,
    pub text_position: Option<CaptionMode>,
    pub text_alignment: Option<TextAlign>,
    pub text_margin_mm: Option<f64>,

    pub aruco_enabled: bool,
    pub aruco_dictionary: Option<ArucoDictionary>,
    pub aruco_pattern_size_mm: Option<f64>,
    pub aruco_border_bits: Option<u32>,
    pub aruco_quiet_zone_mm: Option<f64>,
    pub aruco_codebook: Option<PathBuf>,

    pub apriltag_enabled: bool,
    pub apriltag_family: Option<AprilTagFamily>,
    pub apriltag_pattern_size_mm: Option<f64>,
    pub apriltag_border_mm: Option<f64>,
    pub apriltag_quiet_zone_mm: Option<f64>,
    pub apriltag_codebook: Option<PathBuf>,

    pub auto_assign_numeric_ids: Option<bool>,
    pub start_index: Option<u64>,
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

fn set_some<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        *target = value.clone();
    }
}

impl ConfigOverrides {
    /// Write every supplied value into `config`
    pub fn apply_to(&self, config: &mut LabelConfig) {
        set(&mut config.input.csv, &self.csv);
        set(&mut config.output.file, &self.output);
        config.output.overwrite |= self.overwrite;
        set(&mut config.output.margin_mm, &self.margin_mm);
        if let Some(dpi) = self.dpi {
            config.output.dpi = Dpi(dpi);
        }

        let layout = &mut config.layout;
        set_some(&mut layout.label_width_mm, &self.label_width_mm);
        set_some(&mut layout.label_height_mm, &self.label_height_mm);
        set_some(&mut layout.labels_per_row, &self.labels_per_row);
        set_some(&mut layout.labels_per_column, &self.labels_per_column);
        set(&mut layout.horizontal_gap_mm, &self.horizontal_gap_mm);
        set(&mut layout.vertical_gap_mm, &self.vertical_gap_mm);
        set(&mut layout.code_arrangement, &self.code_arrangement);
        set(&mut layout.code_spacing_mm, &self.code_spacing_mm);

        set(&mut config.qr.size_mm, &self.qr_size_mm);
        set(&mut config.qr.error_correction, &self.qr_error_correction);
        set(&mut config.qr.quiet_zone, &self.qr_quiet_zone);

        let barcode = &mut config.barcode;
        set(&mut barcode.symbology, &self.barcode_symbology);
        set(&mut barcode.height_mm, &self.barcode_height_mm);
        set(&mut barcode.width_factor, &self.barcode_width_factor);
        set(&mut barcode.quiet_zone_mm, &self.barcode_quiet_zone_mm);

        let text = &mut config.text;
        set(&mut text.font_size, &self.text_font_size);
        set(&mut text.font_name, &self.text_font_name);
        set(&mut text.position, &self.text_position);
        set(&mut text.alignment, &self.text_alignment);
        set(&mut text.margin_mm, &self.text_margin_mm);

        let aruco = &mut config.aruco;
        aruco.enabled |= self.aruco_enabled;
        set(&mut aruco.dictionary, &self.aruco_dictionary);
        set(&mut aruco.pattern_size_mm, &self.aruco_pattern_size_mm);
        set(&mut aruco.border_bits, &self.aruco_border_bits);
        set(&mut aruco.quiet_zone_mm, &self.aruco_quiet_zone_mm);
        set_some(&mut aruco.codebook, &self.aruco_codebook);

        let apriltag = &mut config.apriltag;
        apriltag.enabled |= self.apriltag_enabled;
        set(&mut apriltag.family, &self.apriltag_family);
        set(&mut apriltag.pattern_size_mm, &self.apriltag_pattern_size_mm);
        set(&mut apriltag.border_mm, &self.apriltag_border_mm);
        set(&mut apriltag.quiet_zone_mm, &self.apriltag_quiet_zone_mm);
        set_some(&mut apriltag.codebook, &self.apriltag_codebook);

        let ids = &mut config.id_assignment;
        set(&mut ids.auto_assign_numeric_ids, &self.auto_assign_numeric_ids);
        set(&mut ids.start_index, &self.start_index);
    }
}
