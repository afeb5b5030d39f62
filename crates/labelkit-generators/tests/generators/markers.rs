use labelkit_generators::{
    AprilTagFamily, AprilTagGenerator, AprilTagParameters, ArucoGenerator, ArucoParameters,
    CodeGenerator, Codebook, GenerationError, MarkerGenerator,
};
use std::io::Write;

fn write_codebook(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_aruco_from_codebook_file() {
    let file = write_codebook(r#"{ "bits": 25, "codes": [1, 2, 3, 4, 5] }"#);
    let book = Codebook::load(file.path()).unwrap();
    let aruco = ArucoGenerator::new(ArucoParameters::default(), book).unwrap();
    let marker: &dyn MarkerGenerator = &aruco;

    assert_eq!(marker.family_name(), "DICT_5X5_100");
    assert_eq!(marker.id_count(), 5);
    assert_eq!(marker.footprint_size_mm(), 30.0);

    let rendered = marker.generate(&4).unwrap();
    assert_eq!(rendered.width_mm, 30.0);
    assert_eq!(rendered.image.width(), rendered.image.height());
    assert!(matches!(
        marker.generate(&5),
        Err(GenerationError::IdOutOfRange { .. })
    ));
}

#[test]
fn test_missing_codebook_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Codebook::load(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, GenerationError::Codebook(_)));
}

#[test]
fn test_apriltag_family_limit_caps_ids() {
    let book = Codebook::new(16, (0..40).collect()).unwrap();
    let params = AprilTagParameters {
        family: AprilTagFamily::Tag16h5,
        ..AprilTagParameters::default()
    };
    let tag = AprilTagGenerator::new(params, book).unwrap();
    let marker: Box<dyn MarkerGenerator> = Box::new(tag);

    assert_eq!(marker.id_count(), 30);
    assert!(marker.validate(&29).is_ok());
    assert!(marker.validate(&30).is_err());
    assert_eq!(
        marker.validate(&-3).unwrap_err(),
        "AprilTag ID must be non-negative, got -3"
    );
}

#[test]
fn test_rendered_marker_saves_as_png() {
    let book = Codebook::new(36, vec![0x0F0F0F0F0]).unwrap();
    let tag = AprilTagGenerator::new(AprilTagParameters::default(), book).unwrap();
    let rendered = tag.generate(&0).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tag.png");
    rendered.save_png(&path).unwrap();
    assert!(path.exists());
}
