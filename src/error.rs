//! Unified error type for the export pipeline.
//!
//! Document model updates and layout operations never fail; everything that
//! can go wrong happens between capturing the document for export and
//! serializing the PDF, and is reported through [`ExportError`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    /// The document could not be captured for export, e.g. the page
    /// geometry left no renderable content area.
    #[error("Could not capture the document for export: {0}")]
    Capture(String),

    /// Content stream or document serialization failed.
    #[error("Failed to encode the PDF output: {0}")]
    Encoding(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// An export is already in flight; the trigger is disabled until it
    /// completes.
    #[error("An export is already in progress")]
    Busy,
}

impl From<lopdf::Error> for ExportError {
    fn from(e: lopdf::Error) -> Self {
        ExportError::Encoding(e.to_string())
    }
}
