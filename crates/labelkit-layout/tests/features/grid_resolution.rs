use labelkit_core::{LayoutError, LayoutWarning};
use labelkit_layout::{GridSpec, PageSpec};

#[test]
fn test_dimensions_scenario() {
    let resolution = GridSpec::from_dimensions(60.0, 40.0, 5.0, 5.0)
        .resolve(&PageSpec::a4(10.0))
        .unwrap();
    let grid = resolution.grid;

    assert_eq!(grid.labels_per_row, 3);
    assert_eq!(grid.labels_per_column, 6);
    assert_eq!(grid.labels_per_page(), 18);
    assert_eq!(grid.label_width_mm, 60.0);
    assert_eq!(grid.label_height_mm, 40.0);
    assert!(resolution.warnings.is_empty());
}

#[test]
fn test_label_too_large() {
    let err = GridSpec::from_dimensions(200.0, 40.0, 5.0, 5.0)
        .resolve(&PageSpec::a4(10.0))
        .unwrap_err();

    match err {
        LayoutError::NoFit {
            labels_per_row,
            labels_per_column,
            ..
        } => {
            assert_eq!(labels_per_row, 0);
            assert_eq!(labels_per_column, 6);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_too_many_columns() {
    // 40 columns with 5mm gaps need 195mm of gaps alone
    let err = GridSpec::from_counts(40, 7, 5.0, 5.0)
        .resolve(&PageSpec::a4(10.0))
        .unwrap_err();
    assert!(matches!(err, LayoutError::DegenerateCell { .. }));
}

#[test]
fn test_zero_count_is_degenerate() {
    let err = GridSpec::from_counts(0, 7, 5.0, 5.0)
        .resolve(&PageSpec::a4(10.0))
        .unwrap_err();
    assert!(matches!(
        err,
        LayoutError::DegenerateCell {
            labels_per_row: 0,
            ..
        }
    ));
}

#[test]
fn test_both_inputs_prefers_dimensions() {
    let spec = GridSpec {
        labels_per_row: Some(2),
        labels_per_column: Some(2),
        ..GridSpec::from_dimensions(60.0, 40.0, 5.0, 5.0)
    };
    let resolution = spec.resolve(&PageSpec::a4(10.0)).unwrap();

    assert_eq!(resolution.grid.labels_per_row, 3);
    assert_eq!(resolution.grid.labels_per_column, 6);
    assert_eq!(resolution.warnings, vec![LayoutWarning::AmbiguousGridSpec]);
}

#[test]
fn test_missing_inputs() {
    let err = GridSpec::default()
        .resolve(&PageSpec::a4(10.0))
        .unwrap_err();
    assert_eq!(err, LayoutError::MissingGridSpec);
}

#[test]
fn test_partial_dimensions_fall_back_to_counts() {
    let spec = GridSpec {
        label_width_mm: Some(60.0),
        ..GridSpec::from_counts(2, 4, 0.0, 0.0)
    };
    let grid = spec.resolve(&PageSpec::a4(10.0)).unwrap().grid;
    assert_eq!(grid.label_width_mm, 95.0);
    assert_eq!(grid.label_height_mm, 69.25);
}
