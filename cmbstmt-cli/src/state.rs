use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$CMBSTMT_HOME`, else `~/.cmbstmt`.
pub fn cmbstmt_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("CMBSTMT_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".cmbstmt"))
}

pub fn ensure_cmbstmt_home() -> Result<PathBuf> {
    let dir = cmbstmt_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
