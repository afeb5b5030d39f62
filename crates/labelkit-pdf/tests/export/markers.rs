use crate::recording::{plan_in, write_codebook, RecordingRenderer};
use labelkit_core::data::parse_entries;
use labelkit_core::DataEntry;
use labelkit_layout::TextAlign;
use labelkit_pdf::{ExportOptions, LabelExporter};
use labelkit_settings::{LabelConfig, RunPlan};
use std::path::Path;
use tempfile::tempdir;

fn aruco_plan(dir: &Path, configure: impl FnOnce(&mut LabelConfig)) -> RunPlan {
    let codebook = write_codebook(dir);
    plan_in(dir, |config| {
        config.aruco.enabled = true;
        config.aruco.dictionary = "DICT_4X4_50".parse().unwrap();
        config.aruco.codebook = Some(codebook);
        configure(config);
    })
}

fn entry(id: &str, aruco_id: Option<i64>) -> DataEntry {
    DataEntry::new(id, None, None).with_aruco_id(aruco_id)
}

#[test]
fn test_ids_assigned_from_row_index() {
    let dir = tempdir().unwrap();
    let plan = aruco_plan(dir.path(), |_| {});

    let entries = vec![
        entry("M-0", None),
        entry("M-1", Some(3)),
        entry("M-2", Some(9)),
        entry("M-3", None),
    ];
    let mut renderer = RecordingRenderer::default();
    let summary = LabelExporter::new(&plan, ExportOptions::default())
        .export(&entries, &mut renderer)
        .unwrap();

    // ID 9 is outside the four-code codebook
    assert_eq!(summary.generated, 3);
    assert_eq!(summary.skipped, 1);

    let captions: Vec<String> = renderer.texts().into_iter().map(|(text, _)| text).collect();
    assert_eq!(captions, vec!["M-0", "M-1", "M-3"]);
}

#[test]
fn test_start_index_offsets_auto_ids() {
    let dir = tempdir().unwrap();
    let plan = aruco_plan(dir.path(), |config| {
        config.id_assignment.start_index = 3;
    });

    // Row 0 gets ID 3, row 1 would get ID 4 which does not exist
    let mut renderer = RecordingRenderer::default();
    let summary = LabelExporter::new(&plan, ExportOptions::default())
        .export(&[entry("A", None), entry("B", None)], &mut renderer)
        .unwrap();

    assert_eq!(summary.generated, 1);
    assert_eq!(summary.skipped, 1);
}

#[test]
fn test_disabled_auto_assignment_skips_rows() {
    let dir = tempdir().unwrap();
    let plan = aruco_plan(dir.path(), |config| {
        config.id_assignment.auto_assign_numeric_ids = false;
    });

    let mut renderer = RecordingRenderer::default();
    let summary = LabelExporter::new(&plan, ExportOptions::default())
        .export(&[entry("A", None), entry("B", Some(2))], &mut renderer)
        .unwrap();

    assert_eq!(summary.generated, 1);
    assert_eq!(summary.skipped, 1);

    // B keeps its own cell, the second one
    let first_cell = plan.grid.cell_rect(&plan.grid.position_of(0));
    let images = renderer.images();
    assert_eq!(images.len(), 1);
    assert!(images[0].x > first_cell.right());
}

#[test]
fn test_marker_drawn_at_footprint() {
    let dir = tempdir().unwrap();
    let plan = aruco_plan(dir.path(), |_| {});

    let mut renderer = RecordingRenderer::default();
    LabelExporter::new(&plan, ExportOptions::default())
        .export(&[entry("A", None)], &mut renderer)
        .unwrap();

    // 20mm pattern plus a 5mm quiet zone on each side
    let images = renderer.images();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0].width, 30.0);
    assert_eq!(images[0].height, 30.0);
}

#[test]
fn test_caption_alignment_follows_settings() {
    let dir = tempdir().unwrap();
    let plan = aruco_plan(dir.path(), |config| {
        config.text.alignment = TextAlign::Right;
    });

    let mut renderer = RecordingRenderer::default();
    LabelExporter::new(&plan, ExportOptions::default())
        .export(&[entry("SHELF-1", None), entry("SHELF-2", None)], &mut renderer)
        .unwrap();

    assert_eq!(
        renderer.texts(),
        vec![
            ("SHELF-1".to_string(), TextAlign::Right),
            ("SHELF-2".to_string(), TextAlign::Right),
        ]
    );
}

#[test]
fn test_negative_csv_id_skips_row() {
    let dir = tempdir().unwrap();
    let plan = aruco_plan(dir.path(), |_| {});

    // Auto-assignment only fills in missing IDs, never invalid ones
    let entries = parse_entries("id,aruco_id\nNEG,-1\nOK,\n").unwrap();
    let mut renderer = RecordingRenderer::default();
    let summary = LabelExporter::new(&plan, ExportOptions::default())
        .export(&entries, &mut renderer)
        .unwrap();

    assert_eq!(summary.generated, 1);
    assert_eq!(summary.skipped, 1);

    let captions: Vec<String> = renderer.texts().into_iter().map(|(text, _)| text).collect();
    assert_eq!(captions, vec!["OK"]);
}
