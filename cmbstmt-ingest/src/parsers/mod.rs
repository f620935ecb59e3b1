//! Bank-specific statement parsers over extracted text fragments.

pub mod cmb_credit;
