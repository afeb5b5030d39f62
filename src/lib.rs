//! # LabelKit
//!
//! Lays out QR code, barcode and fiducial marker labels on print-ready A4
//! PDF sheets.
//!
//! ## Architecture
//!
//! LabelKit is organized as a workspace with multiple crates:
//!
//! 1. **labelkit-core** - Units, errors, data entries and the CSV loader
//! 2. **labelkit-layout** - Page grid, label positions, content and marker placement
//! 3. **labelkit-generators** - QR, barcode, ArUco and AprilTag bitmaps
//! 4. **labelkit-settings** - Configuration files, CLI overrides, run plans
//! 5. **labelkit-pdf** - Renderer trait, PDF output, export pipeline
//! 6. **labelkit** - Command-line binary that integrates all crates

pub mod cli;

pub use labelkit_core::{load_entries, DataEntry, DataError, LayoutError, LayoutWarning};
pub use labelkit_layout::{GridSpec, MmRect, PageSpec, Point, ResolvedGrid};
pub use labelkit_pdf::{export_pdf, ExportOptions, ExportSummary, LabelRenderer, PdfRenderer};
pub use labelkit_settings::{ConfigOverrides, LabelConfig, RunMode, RunPlan, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Logs go to stderr so stdout only carries the run summary. `RUST_LOG`
/// directives are honored on top of the base level, which is DEBUG when
/// `debug` is set and INFO otherwise.
pub fn init_logging(debug: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let level = if debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(debug)
        .with_level(true)
        .with_line_number(debug);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
