//! Command-line interface
//!
//! Flags mirror the configuration file. Values given here win over the
//! file, which wins over the built-in defaults.

use anyhow::Context;
use clap::Parser;
use labelkit_core::load_entries;
use labelkit_generators::{AprilTagFamily, ArucoDictionary, ErrorCorrection, Symbology};
use labelkit_layout::{Arrangement, CaptionMode, TextAlign};
use labelkit_pdf::{export_pdf, ExportOptions, ExportSummary};
use labelkit_settings::{ConfigOverrides, LabelConfig, RunPlan};
use std::path::PathBuf;
use tracing::info;

/// Directory receiving per-label PNGs in debug mode
pub const DEBUG_DIR: &str = "debug";

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "labelkit",
    author,
    version,
    about = "Lay out QR code, barcode and fiducial marker labels on A4 PDF sheets"
)]
pub struct Args {
    /// Configuration file (.toml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Input CSV with an `id` column
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Output PDF path
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Replace an existing output file
    #[arg(long)]
    pub overwrite: bool,

    /// Page margin in mm
    #[arg(long)]
    pub margin_mm: Option<f64>,

    /// Raster resolution for generated bitmaps (72-600)
    #[arg(long)]
    pub dpi: Option<u32>,

    /// Label width in mm; with --label-height-mm overrides the label counts
    #[arg(long)]
    pub label_width_mm: Option<f64>,

    #[arg(long)]
    pub label_height_mm: Option<f64>,

    /// Labels per row
    #[arg(long)]
    pub labels_per_row: Option<u32>,

    /// Labels per column
    #[arg(long)]
    pub labels_per_column: Option<u32>,

    #[arg(long)]
    pub horizontal_gap_mm: Option<f64>,

    #[arg(long)]
    pub vertical_gap_mm: Option<f64>,

    /// QR code and barcode arrangement: horizontal or vertical
    #[arg(long)]
    pub code_arrangement: Option<Arrangement>,

    /// Space between QR code and barcode in mm
    #[arg(long)]
    pub code_spacing_mm: Option<f64>,

    /// QR code size in mm
    #[arg(long)]
    pub qr_size_mm: Option<f64>,

    /// QR error correction: L, M, Q or H
    #[arg(long)]
    pub qr_error_correction: Option<ErrorCorrection>,

    /// QR quiet zone in modules
    #[arg(long)]
    pub qr_quiet_zone: Option<u32>,

    /// Barcode symbology: code128, code39, ean13 or itf
    #[arg(long)]
    pub barcode_symbology: Option<Symbology>,

    #[arg(long)]
    pub barcode_height_mm: Option<f64>,

    /// Narrow bar width in pixels at 300 DPI
    #[arg(long)]
    pub barcode_width_factor: Option<f64>,

    /// Barcode quiet zone in mm
    #[arg(long)]
    pub barcode_quiet_zone: Option<f64>,

    /// Caption font size in points (6-72)
    #[arg(long)]
    pub text_font_size: Option<f64>,

    /// Built-in PDF font for captions
    #[arg(long)]
    pub text_font_name: Option<String>,

    /// Caption position: top, bottom or none
    #[arg(long)]
    pub text_position: Option<CaptionMode>,

    /// Caption alignment: left, center or right
    #[arg(long)]
    pub text_alignment: Option<TextAlign>,

    #[arg(long)]
    pub text_margin_mm: Option<f64>,

    /// Render ArUco markers instead of QR codes and barcodes
    #[arg(long)]
    pub aruco_enabled: bool,

    /// ArUco dictionary, e.g. DICT_5X5_100
    #[arg(long = "aruco-dict")]
    pub aruco_dict: Option<ArucoDictionary>,

    #[arg(long)]
    pub aruco_pattern_size_mm: Option<f64>,

    #[arg(long)]
    pub aruco_border_bits: Option<u32>,

    #[arg(long)]
    pub aruco_quiet_zone_mm: Option<f64>,

    /// JSON codebook with the dictionary's bit patterns
    #[arg(long)]
    pub aruco_codebook: Option<PathBuf>,

    /// Render AprilTags instead of QR codes and barcodes
    #[arg(long)]
    pub apriltag_enabled: bool,

    /// AprilTag family, e.g. tag36h11
    #[arg(long)]
    pub apriltag_family: Option<AprilTagFamily>,

    #[arg(long)]
    pub apriltag_pattern_size_mm: Option<f64>,

    #[arg(long)]
    pub apriltag_border_mm: Option<f64>,

    #[arg(long)]
    pub apriltag_quiet_zone_mm: Option<f64>,

    /// JSON codebook with the family's bit patterns
    #[arg(long)]
    pub apriltag_codebook: Option<PathBuf>,

    /// Assign marker IDs from the row index when the CSV has none
    #[arg(long, value_name = "BOOL")]
    pub auto_assign_numeric_ids: Option<bool>,

    /// First auto-assigned marker ID
    #[arg(long)]
    pub start_index: Option<u64>,

    /// Log every label position and save generated bitmaps as PNG
    #[arg(long)]
    pub debug: bool,

    /// Validate configuration and input without writing output
    #[arg(long)]
    pub dry_run: bool,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            csv: self.csv.clone(),
            output: self.output.clone(),
            overwrite: self.overwrite,
            margin_mm: self.margin_mm,
            dpi: self.dpi,

            label_width_mm: self.label_width_mm,
            label_height_mm: self.label_height_mm,
            labels_per_row: self.labels_per_row,
            labels_per_column: self.labels_per_column,
            horizontal_gap_mm: self.horizontal_gap_mm,
            vertical_gap_mm: self.vertical_gap_mm,
            code_arrangement: self.code_arrangement,
            code_spacing_mm: self.code_spacing_mm,

            qr_size_mm: self.qr_size_mm,
            qr_error_correction: self.qr_error_correction,
            qr_quiet_zone: self.qr_quiet_zone,

            barcode_symbology: self.barcode_symbology,
            barcode_height_mm: self.barcode_height_mm,
            barcode_width_factor: self.barcode_width_factor,
            barcode_quiet_zone_mm: self.barcode_quiet_zone,

            text_font_size: self.text_font_size,
            text_font_name: self.text_font_name.clone(),
            text_position: self.text_position,
            text_alignment: self.text_alignment,
            text_margin_mm: self.text_margin_mm,

            aruco_enabled: self.aruco_enabled,
            aruco_dictionary: self.aruco_dict,
            aruco_pattern_size_mm: self.aruco_pattern_size_mm,
            aruco_border_bits: self.aruco_border_bits,
            aruco_quiet_zone_mm: self.aruco_quiet_zone_mm,
            aruco_codebook: self.aruco_codebook.clone(),

            apriltag_enabled: self.apriltag_enabled,
            apriltag_family: self.apriltag_family,
            apriltag_pattern_size_mm: self.apriltag_pattern_size_mm,
            apriltag_border_mm: self.apriltag_border_mm,
            apriltag_quiet_zone_mm: self.apriltag_quiet_zone_mm,
            apriltag_codebook: self.apriltag_codebook.clone(),

            auto_assign_numeric_ids: self.auto_assign_numeric_ids,
            start_index: self.start_index,
        }
    }

    /// Defaults, then the config file if any, then the flags
    pub fn load_config(&self) -> anyhow::Result<LabelConfig> {
        let mut config = match &self.config {
            Some(path) => LabelConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => LabelConfig::new(),
        };
        config.merge(&self.overrides());
        Ok(config)
    }
}

/// What a finished run did
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    DryRun { mode: String, entries: usize },
    Exported { summary: ExportSummary, output: PathBuf },
}

/// Execute one invocation and print its summary to stdout
pub fn run(args: &Args) -> anyhow::Result<RunOutcome> {
    let config = args.load_config()?;
    let plan = RunPlan::resolve(&config).context("Invalid configuration")?;
    let entries = load_entries(&plan.input)
        .with_context(|| format!("Failed to read {}", plan.input.display()))?;
    let mode = plan.mode.name();

    if args.dry_run {
        println!("Dry-run: Configuration validated successfully");
        println!("Mode: {}", mode);
        println!("Entries to process: {}", entries.len());
        return Ok(RunOutcome::DryRun {
            mode,
            entries: entries.len(),
        });
    }

    plan.prepare_output()
        .context("Cannot prepare output location")?;

    info!(
        "Rendering {} entries in {} mode to {}",
        entries.len(),
        mode,
        plan.output.display()
    );
    let options = ExportOptions {
        debug_dir: args.debug.then(|| PathBuf::from(DEBUG_DIR)),
        check_overflow: true,
    };
    let summary = export_pdf(&plan, &entries, options)
        .with_context(|| format!("Failed to write {}", plan.output.display()))?;

    println!(
        "Generated {} labels, skipped {} invalid entries",
        summary.generated, summary.skipped
    );
    println!("Output saved to: {}", plan.output.display());

    Ok(RunOutcome::Exported {
        summary,
        output: plan.output.clone(),
    })
}
