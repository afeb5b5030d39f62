use labelkit_core::{LayoutError, LayoutWarning};
use labelkit_settings::{
    ConfigOverrides, LabelConfig, MarkerKind, RunMode, RunPlan, SettingsError,
};
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

fn workspace() -> (TempDir, LabelConfig) {
    let dir = tempdir().unwrap();
    let csv = dir.path().join("ids.csv");
    fs::write(&csv, "id\nA\nB\n").unwrap();

    let mut config = LabelConfig::new();
    config.input.csv = csv;
    config.output.file = dir.path().join("out").join("labels.pdf");
    (dir, config)
}

fn write_codebook(dir: &Path, name: &str, bits: u32) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!(r#"{{ "bits": {bits}, "codes": [0, 1, 2, 3] }}"#)).unwrap();
    path
}

#[test]
fn test_default_plan_is_code_pair() {
    let (_dir, config) = workspace();
    let plan = RunPlan::resolve(&config).unwrap();

    assert!(!plan.mode.is_marker());
    assert!(matches!(plan.mode, RunMode::CodePair { .. }));
    assert_eq!(plan.mode.name(), "QR/Barcode");
    assert_eq!(plan.mode.caption(), &config.caption_style());
    assert_eq!(plan.grid.labels_per_row, 3);
    assert_eq!(plan.grid.labels_per_column, 7);
    assert!(plan.warnings.is_empty());
    assert_eq!(plan.font_name, "Helvetica");
}

#[test]
fn test_output_extension_forced_and_directory_created() {
    let (dir, mut config) = workspace();
    config.output.file = dir.path().join("nested").join("sheet.txt");

    let plan = RunPlan::resolve(&config).unwrap();
    assert_eq!(plan.output, dir.path().join("nested").join("sheet.pdf"));
    assert!(!dir.path().join("nested").exists());

    plan.prepare_output().unwrap();
    assert!(dir.path().join("nested").is_dir());
}

#[test]
fn test_existing_output_requires_overwrite() {
    let (dir, mut config) = workspace();
    let existing = dir.path().join("done.pdf");
    fs::write(&existing, b"%PDF").unwrap();
    config.output.file = existing.clone();

    assert!(matches!(
        RunPlan::resolve(&config),
        Err(SettingsError::OutputExists(ref path)) if *path == existing
    ));

    config.merge(&ConfigOverrides {
        overwrite: true,
        ..ConfigOverrides::default()
    });
    assert!(RunPlan::resolve(&config).is_ok());
}

#[test]
fn test_missing_csv() {
    let (dir, mut config) = workspace();
    config.input.csv = dir.path().join("nope.csv");
    assert!(matches!(
        RunPlan::resolve(&config),
        Err(SettingsError::InvalidSetting { ref key, .. }) if key == "input.csv"
    ));
}

#[test]
fn test_dimensions_and_counts_warn() {
    let (_dir, mut config) = workspace();
    config.layout.label_width_mm = Some(60.0);
    config.layout.label_height_mm = Some(40.0);

    let plan = RunPlan::resolve(&config).unwrap();
    assert_eq!(plan.warnings, vec![LayoutWarning::AmbiguousGridSpec]);
    assert_eq!(plan.grid.labels_per_row, 3);
    assert_eq!(plan.grid.labels_per_column, 6);
}

#[test]
fn test_oversized_label_is_fatal() {
    let (_dir, mut config) = workspace();
    config.layout.label_width_mm = Some(200.0);
    config.layout.label_height_mm = Some(40.0);

    assert!(matches!(
        RunPlan::resolve(&config),
        Err(SettingsError::Layout(LayoutError::NoFit { .. }))
    ));
}

#[test]
fn test_aruco_plan() {
    let (dir, mut config) = workspace();
    config.aruco.enabled = true;
    config.aruco.dictionary = "DICT_4X4_50".parse().unwrap();
    config.aruco.codebook = Some(write_codebook(dir.path(), "aruco.json", 16));

    let plan = RunPlan::resolve(&config).unwrap();
    assert!(plan.mode.is_marker());
    assert_eq!(plan.mode.to_string(), "ArUco DICT_4X4_50");
    match &plan.mode {
        RunMode::Marker {
            layout,
            kind,
            generator,
        } => {
            assert_eq!(*kind, MarkerKind::Aruco);
            assert_eq!(generator.family_name(), "DICT_4X4_50");
            assert_eq!(generator.id_count(), 4);
            assert_eq!(generator.footprint_size_mm(), 30.0);
            assert_eq!(layout.caption(), &config.caption_style());
        }
        other => panic!("expected marker mode, got {:?}", other),
    }
}

#[test]
fn test_aruco_wins_over_apriltag() {
    let (dir, mut config) = workspace();
    config.aruco.enabled = true;
    config.aruco.codebook = Some(write_codebook(dir.path(), "aruco.json", 25));
    config.apriltag.enabled = true;

    let plan = RunPlan::resolve(&config).unwrap();
    assert_eq!(plan.mode.name(), "ArUco");
}

#[test]
fn test_apriltag_plan() {
    let (dir, mut config) = workspace();
    config.apriltag.enabled = true;
    config.apriltag.codebook = Some(write_codebook(dir.path(), "tags.json", 36));

    let plan = RunPlan::resolve(&config).unwrap();
    assert_eq!(plan.mode.name(), "AprilTag");
}

#[test]
fn test_codebook_mismatch_is_fatal() {
    let (dir, mut config) = workspace();
    config.apriltag.enabled = true;
    config.apriltag.codebook = Some(write_codebook(dir.path(), "tags.json", 16));

    assert!(matches!(
        RunPlan::resolve(&config),
        Err(SettingsError::Generation(_))
    ));
}
