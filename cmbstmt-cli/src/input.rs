//! Load the fragment sequence for a statement file.

use anyhow::{Context, Result, bail};
use cmbstmt_ingest::ParsedStatement;
use cmbstmt_ingest::fragments::fragments_from_text;
use cmbstmt_ingest::pdf::{extract_fragments_from_path, is_pdf_path};
use std::fs;
use std::path::Path;
use tracing::debug;

/// `.pdf` files go through text extraction; anything else is read as
/// already-extracted text, one fragment per line.
pub fn load_fragments(path: &Path) -> Result<Vec<String>> {
    if !path.exists() {
        bail!("input not found: {}", path.display());
    }

    let fragments = if is_pdf_path(path) {
        extract_fragments_from_path(path)?
    } else {
        let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
        fragments_from_text(&text)
    };
    debug!(path = %path.display(), fragments = fragments.len(), "loaded input");

    if fragments.is_empty() {
        bail!(
            "no text found in {}; it may be an image-only scan",
            path.display()
        );
    }
    Ok(fragments)
}

/// An empty parse is the parser's only failure signal; surface it to the user.
pub fn ensure_transactions(statement: &ParsedStatement, path: &Path) -> Result<()> {
    if statement.is_empty() {
        bail!(
            "no transactions found in {}; is this a CMB credit card statement?",
            path.display()
        );
    }
    Ok(())
}
