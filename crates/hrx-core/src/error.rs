//! Error types for the hrx-core library.

use thiserror::Error;

/// Main error type for the hrx library.
#[derive(Error, Debug)]
pub enum HrxError {
    /// PDF decoding error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Report extraction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF decoding.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to report field extraction.
///
/// Per-field problems (pattern not matched, matched value that fails
/// conversion, missing department section, malformed roster group) are not
/// errors: they surface as absent fields, per-field statuses and warnings on
/// the extraction result. The only hard failure is input that is not a
/// document at all.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The input text is empty or whitespace-only.
    #[error("document text is empty")]
    EmptyDocument,
}

/// Result type for the hrx library.
pub type Result<T> = std::result::Result<T, HrxError>;
