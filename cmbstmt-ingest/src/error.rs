//! Error types for statement ingestion

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("invalid reference period: {0:?} (expected YYYY-MM)")]
    InvalidPeriod(String),

    #[error("invalid file type, please supply a PDF: {0}")]
    NotPdf(String),

    #[error("PDF text extraction failed: {0}")]
    Extraction(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
