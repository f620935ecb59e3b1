//! cmbstmt-ingest: fragment ingestion (PDF text) and the CMB credit card statement parser.

pub mod amount;
pub mod error;
pub mod fragments;
pub mod headers;
pub mod parsers;
pub mod patterns;
pub mod period;
pub mod types;

#[cfg(feature = "pdf")]
pub mod pdf;

pub use error::IngestError;
pub use headers::{DEFAULT_HEADERS, HEADER_COUNT, HEADER_KEYWORDS, detect_headers};
pub use parsers::cmb_credit::{parse_cmb_credit, parse_cmb_credit_with_fallback};
pub use period::{ReferencePeriod, detect_reference_period};
pub use types::{ParsedStatement, Transaction};
