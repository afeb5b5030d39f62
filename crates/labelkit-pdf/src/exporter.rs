//! Label export pipeline
//!
//! Walks the entry list in order, generates each label's content, resolves
//! its coordinates and hands bitmaps and captions to a [`LabelRenderer`].
//! Entry `i` always occupies cell `i`; a skipped entry leaves its cell
//! blank.

use crate::error::ExportResult;
use crate::pdf::PdfRenderer;
use crate::renderer::{LabelRenderer, PageCursor};
use labelkit_core::DataEntry;
use labelkit_generators::{
    BarcodeGenerator, CodeGenerator, MarkerGenerator, QrGenerator, RenderedCode,
};
use labelkit_layout::{CodePairResolver, LabelPosition, MarkerResolver, MmRect, TextAlign};
use labelkit_settings::{MarkerKind, RunMode, RunPlan};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Export switches that do not change the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Save every generated bitmap as a PNG in this directory
    pub debug_dir: Option<PathBuf>,
    /// Warn once when content spills out of its cell
    pub check_overflow: bool,
}

/// Outcome of a finished export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub generated: usize,
    pub skipped: usize,
    pub pages: usize,
}

/// Per-run mutable state threaded through every placement
#[derive(Debug, Default)]
pub struct RenderContext {
    pub cursor: PageCursor,
    pub summary: ExportSummary,
    overflow_reported: bool,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    fn skip(&mut self, entry: &DataEntry, reason: &str) {
        warn!("Skipping {}: {}", entry.id, reason);
        self.summary.skipped += 1;
    }

    fn report_overflow(&mut self, index: usize, entry: &DataEntry, cell: &MmRect) {
        if !self.overflow_reported {
            warn!(
                "Label {} ({}) content exceeds its {:.2}x{:.2}mm cell; further overflows are not reported",
                index, entry.id, cell.width, cell.height
            );
            self.overflow_reported = true;
        }
    }
}

/// Places every entry of a run onto a renderer
pub struct LabelExporter<'a> {
    plan: &'a RunPlan,
    options: ExportOptions,
}

impl<'a> LabelExporter<'a> {
    pub fn new(plan: &'a RunPlan, options: ExportOptions) -> Self {
        Self { plan, options }
    }

    /// Render `entries` in order and finish the renderer.
    ///
    /// Per-entry generation failures are logged and counted as skipped;
    /// only renderer failures abort the export.
    pub fn export<R: LabelRenderer + ?Sized>(
        &self,
        entries: &[DataEntry],
        renderer: &mut R,
    ) -> ExportResult<ExportSummary> {
        if let Some(dir) = &self.options.debug_dir {
            std::fs::create_dir_all(dir)?;
        }

        let mut ctx = RenderContext::new();
        for (index, entry) in entries.iter().enumerate() {
            match &self.plan.mode {
                RunMode::CodePair {
                    layout,
                    qr,
                    barcode,
                } => self.place_code_pair(&mut ctx, renderer, layout, qr, barcode, index, entry)?,
                RunMode::Marker {
                    layout,
                    kind,
                    generator,
                } => self.place_marker(
                    &mut ctx,
                    renderer,
                    layout,
                    *kind,
                    generator.as_ref(),
                    index,
                    entry,
                )?,
            }
        }

        // An empty run still produces a one-page document.
        if ctx.cursor.current().is_none() {
            ctx.cursor.advance_to(0, renderer)?;
        }
        renderer.finish()?;

        ctx.summary.pages = ctx.cursor.pages_started();
        info!(
            "Exported {} labels on {} pages, skipped {}",
            ctx.summary.generated, ctx.summary.pages, ctx.summary.skipped
        );
        Ok(ctx.summary)
    }

    #[allow(clippy::too_many_arguments)]
    fn place_code_pair<R: LabelRenderer + ?Sized>(
        &self,
        ctx: &mut RenderContext,
        renderer: &mut R,
        resolver: &CodePairResolver,
        qr: &QrGenerator,
        barcode: &BarcodeGenerator,
        index: usize,
        entry: &DataEntry,
    ) -> ExportResult<()> {
        if let Err(reason) = barcode.validate(&entry.barcode_value) {
            ctx.skip(entry, &reason);
            return Ok(());
        }
        if let Err(reason) = qr.validate(&entry.qr_value) {
            ctx.skip(entry, &reason);
            return Ok(());
        }

        let qr_code = match qr.generate(&entry.qr_value) {
            Ok(code) => code,
            Err(e) => {
                ctx.skip(entry, &format!("QR generation failed: {}", e));
                return Ok(());
            }
        };
        self.save_debug_image(&qr_code, "qr", index, entry);

        let bar_code = match barcode.generate(&entry.barcode_value) {
            Ok(code) => code,
            Err(e) => {
                ctx.skip(entry, &format!("barcode generation failed: {}", e));
                return Ok(());
            }
        };
        self.save_debug_image(&bar_code, "barcode", index, entry);

        let position = self.plan.grid.position_of(index);
        ctx.cursor.advance_to(position.page, renderer)?;

        let layout = resolver.layout(&position, bar_code.width_mm);
        let cell = self.plan.grid.cell_rect(&position);
        if self.options.check_overflow && layout.overflows(&cell) {
            ctx.report_overflow(index, entry, &cell);
        }

        log_position(index, entry, &position);
        debug!(
            "  QR: {:?} size={:.2}mm, barcode: {:?} {:.2}x{:.2}mm",
            layout.qr, layout.qr_size_mm, layout.barcode, layout.barcode_width_mm,
            layout.barcode_height_mm
        );

        renderer.draw_image(&qr_code.image, layout.qr_rect())?;
        renderer.draw_image(&bar_code.image, layout.barcode_rect())?;

        if resolver.caption().is_visible() {
            renderer.draw_text(&entry.qr_value, layout.qr_caption, TextAlign::Center)?;
            renderer.draw_text(
                &entry.barcode_value,
                layout.barcode_caption,
                TextAlign::Center,
            )?;
        }

        ctx.summary.generated += 1;
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn place_marker<R: LabelRenderer + ?Sized>(
        &self,
        ctx: &mut RenderContext,
        renderer: &mut R,
        resolver: &MarkerResolver,
        kind: MarkerKind,
        generator: &dyn MarkerGenerator,
        index: usize,
        entry: &DataEntry,
    ) -> ExportResult<()> {
        let Some(id) = self.plan.id_assignment.resolve(kind.entry_id(entry), index) else {
            ctx.skip(
                entry,
                &format!(
                    "row {} has no {} ID and auto-assignment is disabled",
                    index + 1,
                    kind
                ),
            );
            return Ok(());
        };

        if let Err(reason) = generator.validate(&id) {
            ctx.skip(entry, &reason);
            return Ok(());
        }

        let marker = match generator.generate(&id) {
            Ok(marker) => marker,
            Err(e) => {
                ctx.skip(entry, &format!("{} generation failed: {}", kind, e));
                return Ok(());
            }
        };
        self.save_debug_image(&marker, &kind.to_string().to_lowercase(), index, entry);

        let position = self.plan.grid.position_of(index);
        ctx.cursor.advance_to(position.page, renderer)?;

        let layout = resolver.layout(&position, generator.footprint_size_mm());
        let cell = self.plan.grid.cell_rect(&position);
        if self.options.check_overflow && layout.overflows(&cell) {
            ctx.report_overflow(index, entry, &cell);
        }

        log_position(index, entry, &position);
        debug!(
            "  {} {}: {:?} footprint={:.2}mm",
            kind, id, layout.marker, layout.footprint_mm
        );

        renderer.draw_image(&marker.image, layout.marker_rect())?;
        if resolver.caption().is_visible() {
            renderer.draw_text(&entry.id, layout.caption, layout.caption_align)?;
        }

        ctx.summary.generated += 1;
        Ok(())
    }

    fn save_debug_image(&self, code: &RenderedCode, prefix: &str, index: usize, entry: &DataEntry) {
        let Some(dir) = &self.options.debug_dir else {
            return;
        };
        let path = debug_image_path(dir, prefix, index, &entry.id);
        match code.save_png(&path) {
            Ok(()) => debug!(
                "Saved {} image to {} ({}x{} px)",
                prefix,
                path.display(),
                code.image.width(),
                code.image.height()
            ),
            Err(e) => warn!("Cannot save debug image {}: {}", path.display(), e),
        }
    }
}

fn log_position(index: usize, entry: &DataEntry, position: &LabelPosition) {
    debug!(
        "Label {} ({}): page {} row {} column {} at x={:.2}mm y={:.2}mm",
        index, entry.id, position.page, position.row, position.column, position.x_mm,
        position.y_mm
    );
}

/// `<dir>/<prefix>_<id>_<index>.png`, with path-unsafe ID characters replaced
pub fn debug_image_path(dir: &Path, prefix: &str, index: usize, id: &str) -> PathBuf {
    let safe_id: String = id
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    dir.join(format!("{}_{}_{}.png", prefix, safe_id, index))
}

/// Export `entries` into the plan's output PDF
pub fn export_pdf(
    plan: &RunPlan,
    entries: &[DataEntry],
    options: ExportOptions,
) -> ExportResult<ExportSummary> {
    let mut renderer = PdfRenderer::create(
        &plan.output,
        plan.page,
        &plan.font_name,
        plan.mode.caption().font_size_pt,
        plan.dpi,
    )?;
    LabelExporter::new(plan, options).export(entries, &mut renderer)
}
