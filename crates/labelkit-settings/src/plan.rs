//! Run planning
//!
//! Turns a validated [`LabelConfig`] into everything an export needs: the
//! frozen page grid, the content mode with its resolver and generators,
//! and the checked output path. Fatal configuration errors surface here,
//! before any entry is processed.

use crate::config::{IdAssignment, LabelConfig};
use crate::error::{SettingsError, SettingsResult};
use labelkit_core::units::Dpi;
use labelkit_core::{DataEntry, LayoutWarning};
use labelkit_generators::{
    AprilTagGenerator, ArucoGenerator, BarcodeGenerator, Codebook, MarkerGenerator, QrGenerator,
};
use labelkit_layout::{CaptionStyle, CodePairResolver, MarkerResolver, PageSpec, ResolvedGrid};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Which marker family a run places
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    Aruco,
    AprilTag,
}

impl MarkerKind {
    /// The ID column of `entry` this family reads
    pub fn entry_id(&self, entry: &DataEntry) -> Option<i64> {
        match self {
            MarkerKind::Aruco => entry.aruco_id,
            MarkerKind::AprilTag => entry.apriltag_id,
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerKind::Aruco => write!(f, "ArUco"),
            MarkerKind::AprilTag => write!(f, "AprilTag"),
        }
    }
}

/// What a run places on each label, decided once per run.
///
/// Each variant owns the resolver and the generators for its content, so a
/// plan can never pair a layout with another mode's generators.
pub enum RunMode {
    /// QR code plus 1D barcode per label
    CodePair {
        layout: CodePairResolver,
        qr: QrGenerator,
        barcode: BarcodeGenerator,
    },
    /// One fiducial marker per label
    Marker {
        layout: MarkerResolver,
        kind: MarkerKind,
        generator: Box<dyn MarkerGenerator>,
    },
}

impl RunMode {
    pub fn is_marker(&self) -> bool {
        matches!(self, RunMode::Marker { .. })
    }

    /// Short mode name for summaries
    pub fn name(&self) -> String {
        match self {
            RunMode::CodePair { .. } => "QR/Barcode".to_string(),
            RunMode::Marker { kind, .. } => kind.to_string(),
        }
    }

    /// Caption style shared by every label of the run
    pub fn caption(&self) -> &CaptionStyle {
        match self {
            RunMode::CodePair { layout, .. } => layout.caption(),
            RunMode::Marker { layout, .. } => layout.caption(),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::CodePair { layout, .. } => {
                write!(f, "QR + barcode ({})", layout.params().arrangement)
            }
            RunMode::Marker { kind, generator, .. } => {
                write!(f, "{} {}", kind, generator.family_name())
            }
        }
    }
}

impl fmt::Debug for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::CodePair {
                layout,
                qr,
                barcode,
            } => f
                .debug_struct("CodePair")
                .field("layout", layout)
                .field("qr", qr)
                .field("barcode", barcode)
                .finish(),
            RunMode::Marker {
                layout,
                kind,
                generator,
            } => f
                .debug_struct("Marker")
                .field("layout", layout)
                .field("kind", kind)
                .field("family", &generator.family_name())
                .finish(),
        }
    }
}

/// A fully resolved, ready-to-export run
#[derive(Debug)]
pub struct RunPlan {
    pub page: PageSpec,
    pub grid: ResolvedGrid,
    pub warnings: Vec<LayoutWarning>,
    pub mode: RunMode,
    pub input: PathBuf,
    pub output: PathBuf,
    pub dpi: Dpi,
    pub font_name: String,
    pub id_assignment: IdAssignment,
}

impl RunPlan {
    /// Validate `config` and resolve it into a plan.
    ///
    /// Nothing is written; see [`RunPlan::prepare_output`].
    pub fn resolve(config: &LabelConfig) -> SettingsResult<Self> {
        config.validate()?;

        let input = config.input.csv.clone();
        if !input.exists() {
            return Err(SettingsError::invalid(
                "input.csv",
                format!("Input CSV file not found: {}", input.display()),
            ));
        }

        let output = pdf_path(&config.output.file);
        if output.exists() && !config.output.overwrite {
            return Err(SettingsError::OutputExists(output));
        }

        let page = config.page();
        let resolution = config.grid_spec().resolve(&page)?;
        let grid = resolution.grid;

        let caption = config.caption_style();
        let mode = if config.is_marker_mode() {
            let (kind, generator) = marker_generator(config)?;
            RunMode::Marker {
                layout: MarkerResolver::new(&grid, caption),
                kind,
                generator,
            }
        } else {
            RunMode::CodePair {
                layout: CodePairResolver::new(&grid, config.code_pair_params(), caption),
                qr: QrGenerator::new(config.qr_parameters()),
                barcode: BarcodeGenerator::new(config.barcode_parameters()),
            }
        };

        info!(
            "Layout: {}x{} labels of {:.2}x{:.2}mm per page, {}",
            grid.labels_per_row,
            grid.labels_per_column,
            grid.label_width_mm,
            grid.label_height_mm,
            mode
        );

        Ok(Self {
            page,
            grid,
            warnings: resolution.warnings,
            mode,
            input,
            output,
            dpi: config.output.dpi,
            font_name: config.text.font_name.clone(),
            id_assignment: config.id_assignment,
        })
    }

    /// Create the output directory if it does not exist yet
    pub fn prepare_output(&self) -> SettingsResult<()> {
        if let Some(dir) = self.output.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    SettingsError::invalid(
                        "output.file",
                        format!("Cannot create output directory {}: {}", dir.display(), e),
                    )
                })?;
                debug!("Created output directory {}", dir.display());
            }
        }
        Ok(())
    }
}

/// `path` with its extension forced to `.pdf`
pub fn pdf_path(path: &Path) -> PathBuf {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        path.to_path_buf()
    } else {
        path.with_extension("pdf")
    }
}

fn marker_generator(config: &LabelConfig) -> SettingsResult<(MarkerKind, Box<dyn MarkerGenerator>)> {
    if config.aruco.enabled {
        if config.apriltag.enabled {
            warn!("Both ArUco and AprilTag enabled; using ArUco");
        }
        let codebook = load_codebook(config.aruco.codebook.as_deref(), "aruco.codebook")?;
        let generator = ArucoGenerator::new(config.aruco_parameters(), codebook)?;
        Ok((MarkerKind::Aruco, Box::new(generator)))
    } else {
        let codebook = load_codebook(config.apriltag.codebook.as_deref(), "apriltag.codebook")?;
        let generator = AprilTagGenerator::new(config.apriltag_parameters(), codebook)?;
        Ok((MarkerKind::AprilTag, Box::new(generator)))
    }
}

fn load_codebook(path: Option<&Path>, key: &str) -> SettingsResult<Codebook> {
    let path = path.ok_or_else(|| SettingsError::invalid(key, "a codebook file is required"))?;
    Ok(Codebook::load(path)?)
}
