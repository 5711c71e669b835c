//! Saving generated reports to disk.

use std::path::{Path, PathBuf};

use crate::report::{RenderError, RenderedReport};

/// Write the report bytes to `path`.
pub fn save_report(report: &RenderedReport, path: &Path) -> Result<(), RenderError> {
    std::fs::write(path, &report.bytes)?;
    tracing::info!("Saved report to {:?} ({} bytes)", path, report.bytes.len());
    Ok(())
}

/// Open save file dialog and return selected path.
pub fn show_save_dialog(default_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_file_name(default_name)
        .add_filter("PDF Files", &["pdf"])
        .save_file()
}
