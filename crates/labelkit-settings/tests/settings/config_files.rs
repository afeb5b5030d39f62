use labelkit_core::units::Dpi;
use labelkit_generators::{ArucoDictionary, Symbology};
use labelkit_layout::{Arrangement, CaptionMode, TextAlign};
use labelkit_settings::{ConfigError, LabelConfig, SettingsError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_toml_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labels.toml");
    fs::write(
        &path,
        r#"
[input]
csv = "data/ids.csv"

[output]
file = "out/sheet.pdf"
dpi = 600
overwrite = true

[layout]
labels_per_row = 2
labels_per_column = 5
code_arrangement = "vertical"

[text]
position = "top"
alignment = "right"
font_size = 12

[aruco]
enabled = true
dictionary = "dict_4x4_50"
codebook = "dict_4x4_50.json"
"#,
    )
    .unwrap();

    let config = LabelConfig::load_from_file(&path).unwrap();
    assert_eq!(config.output.dpi, Dpi(600));
    assert!(config.output.overwrite);
    assert_eq!(config.layout.labels_per_row, Some(2));
    assert_eq!(config.layout.code_arrangement, Arrangement::Vertical);
    assert_eq!(config.text.position, CaptionMode::Top);
    assert_eq!(config.text.alignment, TextAlign::Right);
    assert_eq!(config.text.font_size, 12.0);
    assert_eq!(
        config.aruco.dictionary,
        "DICT_4X4_50".parse::<ArucoDictionary>().unwrap()
    );
    assert!(config.is_marker_mode());
    assert!(config.validate().is_ok());
}

#[test]
fn test_load_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labels.json");
    fs::write(
        &path,
        r#"{ "barcode": { "symbology": "code39", "height_mm": 12.5 }, "output": { "margin_mm": 5 } }"#,
    )
    .unwrap();

    let config = LabelConfig::load_from_file(&path).unwrap();
    assert_eq!(config.barcode.symbology, Symbology::Code39);
    assert_eq!(config.barcode.height_mm, 12.5);
    assert_eq!(config.output.margin_mm, 5.0);
    assert_eq!(config.qr.size_mm, 25.0);
}

#[test]
fn test_save_and_reload() {
    let dir = tempdir().unwrap();
    let mut config = LabelConfig::new();
    config.layout.label_width_mm = Some(63.5);
    config.layout.label_height_mm = Some(38.1);
    config.apriltag.codebook = Some("tags.json".into());

    for name in ["saved.toml", "saved.json"] {
        let path = dir.path().join(name);
        config.save_to_file(&path).unwrap();
        assert_eq!(LabelConfig::load_from_file(&path).unwrap(), config);
    }
}

#[test]
fn test_unsupported_extension() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("labels.yaml");
    fs::write(&path, "output: {}").unwrap();

    assert!(matches!(
        LabelConfig::load_from_file(&path),
        Err(SettingsError::Config(ConfigError::UnsupportedFormat(ref ext))) if ext == "yaml"
    ));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();
    assert!(matches!(
        LabelConfig::load_from_file(&dir.path().join("absent.toml")),
        Err(SettingsError::LoadError(_))
    ));
}

#[test]
fn test_invalid_values_rejected_at_parse() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[barcode]\nsymbology = \"upc\"\n").unwrap();
    assert!(matches!(
        LabelConfig::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));

    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{ "aruco": { "dictionary": "DICT_9X9_10" } }"#).unwrap();
    assert!(matches!(
        LabelConfig::load_from_file(&path),
        Err(SettingsError::JsonError(_))
    ));
}
