//! PDF output via printpdf
//!
//! printpdf places content from the bottom-left page corner, so every
//! rectangle and baseline is flipped against the page height here.

use crate::error::{ExportError, ExportResult};
use crate::metrics::CaptionFont;
use crate::renderer::LabelRenderer;
use image::GrayImage;
use labelkit_core::units::{px_to_mm, Dpi};
use labelkit_layout::{MmRect, PageSpec, Point, TextAlign};
use printpdf::{
    ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerIndex, PdfLayerReference, PdfPageIndex, Px,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

const LAYER_NAME: &str = "Labels";

/// Renders label sheets into a PDF file
pub struct PdfRenderer {
    doc: Option<PdfDocumentReference>,
    /// printpdf creates the first page with the document; it is used by
    /// the first `start_page` call.
    first_page: Option<(PdfPageIndex, PdfLayerIndex)>,
    layer: Option<PdfLayerReference>,
    font: IndirectFontRef,
    caption_font: CaptionFont,
    font_size_pt: f64,
    page: PageSpec,
    dpi: Dpi,
    output: PathBuf,
    pages: usize,
}

impl PdfRenderer {
    /// Create a renderer that writes to `output` on [`LabelRenderer::finish`]
    pub fn create(
        output: impl AsRef<Path>,
        page: PageSpec,
        font_name: &str,
        font_size_pt: f64,
        dpi: Dpi,
    ) -> ExportResult<Self> {
        let output = output.as_ref().to_path_buf();
        let title = output
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("Labels")
            .to_string();

        let (doc, page_index, layer_index) = PdfDocument::new(
            title,
            Mm(page.width_mm as f32),
            Mm(page.height_mm as f32),
            LAYER_NAME,
        );

        let caption_font = CaptionFont::resolve(font_name);
        let font = doc
            .add_builtin_font(caption_font.builtin())
            .map_err(ExportError::pdf)?;

        Ok(Self {
            doc: Some(doc),
            first_page: Some((page_index, layer_index)),
            layer: None,
            font,
            caption_font,
            font_size_pt,
            page,
            dpi,
            output,
            pages: 0,
        })
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn caption_font(&self) -> CaptionFont {
        self.caption_font
    }

    fn document(&self) -> ExportResult<&PdfDocumentReference> {
        self.doc
            .as_ref()
            .ok_or_else(|| ExportError::Pdf("document already finished".to_string()))
    }

    fn current_layer(&mut self) -> ExportResult<PdfLayerReference> {
        if self.layer.is_none() {
            self.start_page()?;
        }
        self.layer
            .clone()
            .ok_or_else(|| ExportError::Pdf("no open page".to_string()))
    }

    /// Bottom-left origin of a top-left rectangle
    fn flip_rect(&self, rect: &MmRect) -> (f64, f64) {
        (rect.x, self.page.height_mm - rect.y - rect.height)
    }

    /// Bottom-left baseline of a top-left anchor
    fn flip_baseline(&self, y_mm: f64) -> f64 {
        self.page.height_mm - y_mm
    }
}

impl LabelRenderer for PdfRenderer {
    fn start_page(&mut self) -> ExportResult<()> {
        let (page_index, layer_index) = match self.first_page.take() {
            Some(first) => first,
            None => self.document()?.add_page(
                Mm(self.page.width_mm as f32),
                Mm(self.page.height_mm as f32),
                LAYER_NAME,
            ),
        };
        let layer = self.document()?.get_page(page_index).get_layer(layer_index);
        self.layer = Some(layer);
        self.pages += 1;
        debug!("Started PDF page {}", self.pages);
        Ok(())
    }

    fn draw_image(&mut self, image: &GrayImage, rect: MmRect) -> ExportResult<()> {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(ExportError::Image {
                width,
                height,
                reason: "empty bitmap".to_string(),
            });
        }

        let layer = self.current_layer()?;
        let (x, y) = self.flip_rect(&rect);

        // Natural size at the output DPI, then stretched onto the rectangle.
        let natural_w = px_to_mm(width, self.dpi);
        let natural_h = px_to_mm(height, self.dpi);

        let xobject = ImageXObject {
            width: Px(width as usize),
            height: Px(height as usize),
            color_space: ColorSpace::Greyscale,
            bits_per_component: ColorBits::Bit8,
            interpolate: false,
            image_data: image.as_raw().clone(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        };

        Image::from(xobject).add_to_layer(
            layer,
            ImageTransform {
                translate_x: Some(Mm(x as f32)),
                translate_y: Some(Mm(y as f32)),
                dpi: Some(self.dpi.get() as f32),
                scale_x: Some((rect.width / natural_w) as f32),
                scale_y: Some((rect.height / natural_h) as f32),
                ..Default::default()
            },
        );
        Ok(())
    }

    fn draw_text(&mut self, text: &str, anchor: Point, align: TextAlign) -> ExportResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        let layer = self.current_layer()?;
        let width = self.caption_font.text_width_mm(text, self.font_size_pt);
        let x = match align {
            TextAlign::Left => anchor.x,
            TextAlign::Center => anchor.x - width / 2.0,
            TextAlign::Right => anchor.x - width,
        };
        let y = self.flip_baseline(anchor.y);

        layer.use_text(
            text,
            self.font_size_pt as f32,
            Mm(x as f32),
            Mm(y as f32),
            &self.font,
        );
        Ok(())
    }

    fn finish(&mut self) -> ExportResult<()> {
        let doc = self
            .doc
            .take()
            .ok_or_else(|| ExportError::Pdf("document already finished".to_string()))?;

        let file = File::create(&self.output)?;
        let mut writer = BufWriter::new(file);
        doc.save(&mut writer).map_err(ExportError::pdf)?;
        debug!("Wrote {} pages to {}", self.pages, self.output.display());
        Ok(())
    }
}
