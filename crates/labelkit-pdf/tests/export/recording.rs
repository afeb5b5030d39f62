//! Test support: a renderer that records draw calls instead of writing PDF

use image::GrayImage;
use labelkit_layout::{MmRect, Point, TextAlign};
use labelkit_pdf::{ExportResult, LabelRenderer};
use labelkit_settings::{LabelConfig, RunPlan};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    StartPage,
    Image { width_px: u32, height_px: u32, rect: MmRect },
    Text { text: String, anchor: Point, align: TextAlign },
    Finish,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub ops: Vec<Op>,
}

impl RecordingRenderer {
    pub fn images(&self) -> Vec<MmRect> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Image { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<(String, TextAlign)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Text { text, align, .. } => Some((text.clone(), *align)),
                _ => None,
            })
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == Op::StartPage).count()
    }

    /// Number of images drawn on each page, in page order
    pub fn images_per_page(&self) -> Vec<usize> {
        let mut pages: Vec<usize> = Vec::new();
        for op in &self.ops {
            match op {
                Op::StartPage => pages.push(0),
                Op::Image { .. } => {
                    if let Some(count) = pages.last_mut() {
                        *count += 1;
                    }
                }
                _ => {}
            }
        }
        pages
    }
}

impl LabelRenderer for RecordingRenderer {
    fn start_page(&mut self) -> ExportResult<()> {
        self.ops.push(Op::StartPage);
        Ok(())
    }

    fn draw_image(&mut self, image: &GrayImage, rect: MmRect) -> ExportResult<()> {
        self.ops.push(Op::Image {
            width_px: image.width(),
            height_px: image.height(),
            rect,
        });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, anchor: Point, align: TextAlign) -> ExportResult<()> {
        self.ops.push(Op::Text {
            text: text.to_string(),
            anchor,
            align,
        });
        Ok(())
    }

    fn finish(&mut self) -> ExportResult<()> {
        self.ops.push(Op::Finish);
        Ok(())
    }
}

/// Resolve a plan whose input and output live in `dir`
pub fn plan_in(dir: &Path, configure: impl FnOnce(&mut LabelConfig)) -> RunPlan {
    let csv = dir.join("ids.csv");
    fs::write(&csv, "id\nplaceholder\n").unwrap();

    let mut config = LabelConfig::new();
    config.input.csv = csv;
    config.output.file = dir.join("labels.pdf");
    configure(&mut config);
    RunPlan::resolve(&config).unwrap()
}

/// Write a 4x4 codebook with IDs 0..4
pub fn write_codebook(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("dict_4x4.json");
    fs::write(&path, r#"{ "bits": 16, "codes": [4660, 22136, 39612, 57072] }"#).unwrap();
    path
}
