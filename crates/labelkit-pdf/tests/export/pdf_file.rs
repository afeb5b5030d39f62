use crate::recording::plan_in;
use labelkit_core::units::Dpi;
use labelkit_core::DataEntry;
use labelkit_layout::{MmRect, PageSpec, Point, TextAlign};
use labelkit_pdf::{export_pdf, CaptionFont, ExportOptions, LabelRenderer, PdfRenderer};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_export_writes_pdf() {
    let dir = tempdir().unwrap();
    let plan = plan_in(dir.path(), |_| {});
    let entries = vec![
        DataEntry::new("A-1", None, None),
        DataEntry::new("A-2", Some("https://example.com/a2"), Some("A2")),
    ];

    let summary = export_pdf(&plan, &entries, ExportOptions::default()).unwrap();
    assert_eq!(summary.generated, 2);
    assert_eq!(summary.pages, 1);

    let bytes = fs::read(&plan.output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_renderer_finishes_once() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("direct.pdf");
    let mut renderer =
        PdfRenderer::create(&output, PageSpec::a4(10.0), "courier", 9.0, Dpi(300)).unwrap();
    assert_eq!(renderer.caption_font(), CaptionFont::Courier);
    assert_eq!(renderer.output(), output.as_path());

    renderer.start_page().unwrap();
    let image = image::GrayImage::from_pixel(8, 8, image::Luma([0u8]));
    renderer
        .draw_image(&image, MmRect::new(20.0, 20.0, 10.0, 10.0))
        .unwrap();
    renderer
        .draw_text("caption", Point::new(25.0, 35.0), TextAlign::Center)
        .unwrap();
    renderer.finish().unwrap();

    assert!(output.is_file());
    assert!(renderer.finish().is_err());
}

#[test]
fn test_empty_bitmap_rejected() {
    let dir = tempdir().unwrap();
    let mut renderer = PdfRenderer::create(
        dir.path().join("empty.pdf"),
        PageSpec::a4(10.0),
        "Helvetica",
        10.0,
        Dpi(300),
    )
    .unwrap();

    let image = image::GrayImage::new(0, 0);
    assert!(renderer
        .draw_image(&image, MmRect::new(0.0, 0.0, 5.0, 5.0))
        .is_err());
}
