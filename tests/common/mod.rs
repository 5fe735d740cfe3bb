pub mod fixtures;
pub mod pdf_assertions;

use lopdf::Document as LopdfDocument;
use vitae::{CvData, export_pdf};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    pub fn text(&self) -> String {
        pdf_assertions::extract_text(&self.doc)
    }

    /// Save PDF to a file for manual debugging
    #[allow(dead_code)]
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Run the full export pipeline and parse the result back.
pub fn generate_pdf(cv: &CvData) -> Result<GeneratedPdf, Box<dyn std::error::Error>> {
    let exported = export_pdf(cv)?;
    GeneratedPdf::from_bytes(exported.bytes)
}

/// Export and also return the derived filename.
#[allow(dead_code)]
pub fn generate_named_pdf(
    cv: &CvData,
) -> Result<(String, GeneratedPdf), Box<dyn std::error::Error>> {
    let exported = export_pdf(cv)?;
    let pdf = GeneratedPdf::from_bytes(exported.bytes)?;
    Ok((exported.filename, pdf))
}
