//! Checklist report rendering.
//!
//! Rendering happens in two passes: [`layout`] turns the answers into wrapped rows
//! placed on pages, then [`pdf`] draws the placed cells.

pub mod layout;
pub mod pdf;


use chrono::{DateTime, Local};
use thiserror::Error;

use crate::answers::Answer;
use crate::config::ReportConfig;

pub use layout::{ReportDocument, ReportRow, TableLayout, wrap_text};

/// Report generation errors.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The PDF library rejected a drawing operation.
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// The finished document could not be written.
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Layout parameters, in millimetres unless noted.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Wrap threshold in characters.
    pub wrap_width: usize,
    pub line_height: f32,
    pub item_width: f32,
    pub mark_width: f32,
    pub font_size_pt: f32,
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub filename: String,
    pub title_prefix: String,
    /// Timestamp printed in the page footer.
    pub generated_at: DateTime<Local>,
}

impl ReportOptions {
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            wrap_width: config.wrap_width,
            line_height: config.line_height_mm,
            item_width: config.item_column_mm,
            mark_width: config.mark_column_mm,
            font_size_pt: config.font_size_pt,
            page_width: config.page_width_mm,
            page_height: config.page_height_mm,
            margin: config.margin_mm,
            filename: config.filename.clone(),
            title_prefix: config.title_prefix.clone(),
            generated_at: Local::now(),
        }
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn table_width(&self) -> f32 {
        self.item_width + 2.0 * self.mark_width
    }

    /// Title line for a department.
    pub fn title_for(&self, department: &str) -> String {
        format!("{} - {department}", self.title_prefix)
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from_config(&ReportConfig::default())
    }
}

/// A finished report ready to be offered for download.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub document: ReportDocument,
    pub page_count: usize,
}

/// Lay out and draw the report for one department.
///
/// An empty answer list yields a document with the title and header row only.
pub fn render_report(
    department: &str,
    answers: &[(String, Answer)],
    options: &ReportOptions,
) -> Result<RenderedReport, RenderError> {
    let document = ReportDocument::build(department, answers, options);
    let layout = TableLayout::compute(&document, options);
    let bytes = pdf::write_pdf(&document, &layout, options)?;

    tracing::info!(
        "Rendered report '{}': {} rows on {} pages, {} bytes",
        document.title,
        document.rows.len(),
        layout.pages.len(),
        bytes.len()
    );

    Ok(RenderedReport {
        filename: options.filename.clone(),
        bytes,
        page_count: layout.pages.len(),
        document,
    })
}
