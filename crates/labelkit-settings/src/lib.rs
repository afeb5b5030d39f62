//! # LabelKit Settings
//!
//! Loads run configuration from TOML or JSON, layers command-line overrides
//! on top, validates the result, and resolves it into a [`RunPlan`].

pub mod config;
pub mod error;
pub mod overrides;
pub mod plan;

pub use config::{
    AprilTagSettings, ArucoSettings, BarcodeSettings, IdAssignment, InputSettings, LabelConfig,
    LayoutSettings, OutputSettings, QrSettings, TextSettings,
};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
pub use overrides::ConfigOverrides;
pub use plan::{pdf_path, MarkerKind, RunMode, RunPlan};
