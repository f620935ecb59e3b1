//! PDF text extraction on top of `pdf-extract`.
//!
//! Statement tables are drawn one cell per text-show, so a row such as
//!
//! ```text
//! 11/02   11/03   支付宝-特约商户   38.20   5445   38.20
//! ```
//!
//! must come out as six fragments, not one line. Glyphs are grouped into runs
//! by position: a run ends when the baseline moves, or when the next glyph
//! starts more than [`RUN_GAP_EM`] away from where the previous one ended.
//! Kerned `TJ` pieces and spaces inside a cell stay in one run.

use anyhow::{Context, Result};
use pdf_extract::{Document, MediaBox, OutputDev, OutputError, Transform};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::IngestError;
use crate::fragments::fragments_from_runs;

/// Horizontal distance, in ems of the current font, that separates two runs.
pub const RUN_GAP_EM: f64 = 1.0;

/// Where the pen stood after the last glyph of the open run.
#[derive(Debug, Clone, Copy)]
struct Pen {
    y: f64,
    end: f64,
}

/// Collects positioned text runs across all pages, in content-stream order.
#[derive(Debug, Default)]
struct RunCollector {
    runs: Vec<String>,
    current: String,
    pen: Option<Pen>,
    pages: u32,
}

impl RunCollector {
    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.runs.push(std::mem::take(&mut self.current));
        }
        self.pen = None;
    }

    fn breaks_run(&self, x: f64, y: f64, em: f64) -> bool {
        let Some(pen) = self.pen else {
            return false;
        };
        (y - pen.y).abs() > em * 0.5 || (x - pen.end).abs() > em * RUN_GAP_EM
    }
}

/// Factor from text space to device space for a glyph drawn with `trm`.
fn text_scale(trm: &Transform) -> f64 {
    let scale = (trm.m11 * trm.m22 - trm.m12 * trm.m21).abs().sqrt();
    if scale.is_finite() && scale > 0.0 { scale } else { 1.0 }
}

impl OutputDev for RunCollector {
    fn begin_page(
        &mut self,
        _page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> std::result::Result<(), OutputError> {
        self.flush();
        self.pages += 1;
        Ok(())
    }

    fn end_page(&mut self) -> std::result::Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        spacing: f64,
        font_size: f64,
        text: &str,
    ) -> std::result::Result<(), OutputError> {
        let (x, y) = (trm.m31, trm.m32);
        let scale = text_scale(trm);
        let em = font_size.abs() * scale;
        if self.breaks_run(x, y, em) {
            self.flush();
        }

        self.current.push_str(text);
        let advance = (width * font_size + spacing) * scale;
        self.pen = Some(Pen { y, end: x + advance });
        Ok(())
    }

    fn begin_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> std::result::Result<(), OutputError> {
        Ok(())
    }
}

/// Extract the ordered fragment sequence from PDF bytes, pages concatenated.
pub fn extract_fragments(bytes: &[u8]) -> Result<Vec<String>> {
    let mut doc = Document::load_mem(bytes).map_err(|e| IngestError::Extraction(e.to_string()))?;
    if doc.is_encrypted() {
        doc.decrypt("")
            .map_err(|e| IngestError::Extraction(format!("encrypted pdf: {e}")))?;
    }

    let mut collector = RunCollector::default();
    pdf_extract::output_doc(&doc, &mut collector)
        .map_err(|e| IngestError::Extraction(e.to_string()))?;
    collector.flush();

    let fragments = fragments_from_runs(&collector.runs);
    debug!(pages = collector.pages, fragments = fragments.len(), "extracted pdf text");
    Ok(fragments)
}

/// Read and extract a `.pdf` file.
pub fn extract_fragments_from_path(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    if !is_pdf_path(path) {
        return Err(IngestError::NotPdf(path.display().to_string()).into());
    }

    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    extract_fragments(&bytes).with_context(|| format!("extracting {}", path.display()))
}

pub fn is_pdf_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}
