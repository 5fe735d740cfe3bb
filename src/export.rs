//! The export pipeline: document model in, downloadable PDF out.
//!
//! The renderer flows the model into fixed-size A4 pages directly (the
//! layout-aware pipeline); there is no rasterization step. Generation is
//! all-or-nothing: bytes are only handed out once the whole document has
//! been serialized, and writing to disk happens in a single call, so a
//! failed export never leaves a partial file.

use crate::document;
use crate::error::ExportError;
use crate::model::{CvData, PersonalInfo};
use crate::paginate::{Page, PageMetrics, Paginator};
use crate::pdf::PdfWriter;
use std::path::{Path, PathBuf};

/// A finished export.
#[derive(Debug, Clone)]
pub struct ExportedPdf {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Derives the download filename from the user's full name, falling back
/// to a placeholder when it is blank.
pub fn pdf_filename(info: &PersonalInfo) -> String {
    if info.full_name.is_empty() {
        "CV.pdf".to_string()
    } else {
        format!("{}.pdf", info.full_name)
    }
}

/// Paginates the current snapshot for the on-screen preview.
pub fn paginate_preview(cv: &CvData) -> Result<Vec<Page>, ExportError> {
    let content = document::build_document(cv);
    Paginator::new(PageMetrics::a4())?.paginate(&content)
}

/// Renders the snapshot into a named, ready-to-save PDF.
pub fn export_pdf(cv: &CvData) -> Result<ExportedPdf, ExportError> {
    let metrics = PageMetrics::a4();
    let content = document::build_document(cv);
    let pages = Paginator::new(metrics)?.paginate(&content)?;
    let bytes = PdfWriter::new(metrics).write(&pages)?;
    let filename = pdf_filename(&cv.personal_info);
    log::info!(
        "exported '{}': {} page(s), {} bytes",
        filename,
        pages.len(),
        bytes.len()
    );
    Ok(ExportedPdf { filename, bytes })
}

/// Exports the snapshot and writes it into `dir`, returning the written
/// path.
pub fn export_pdf_to_dir(cv: &CvData, dir: &Path) -> Result<PathBuf, ExportError> {
    let exported = export_pdf(cv)?;
    let path = dir.join(&exported.filename);
    std::fs::write(&path, &exported.bytes)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_yields_placeholder_filename() {
        assert_eq!(pdf_filename(&PersonalInfo::default()), "CV.pdf");
    }

    #[test]
    fn full_name_becomes_the_filename() {
        let info = PersonalInfo {
            full_name: "Ada Lovelace".into(),
            ..Default::default()
        };
        assert_eq!(pdf_filename(&info), "Ada Lovelace.pdf");
    }

    #[test]
    fn default_document_exports_a_single_page() {
        let exported = export_pdf(&CvData::default()).unwrap();
        assert!(exported.bytes.starts_with(b"%PDF"));
        let doc = lopdf::Document::load_mem(&exported.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
