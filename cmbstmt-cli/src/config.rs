use anyhow::{Context, Result};
use cmbstmt_export::DEFAULT_CSV_NAME;
use cmbstmt_ingest::ReferencePeriod;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::{cmbstmt_home, ensure_cmbstmt_home};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub parse: ParseSection,
    pub export: ExportSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseSection {
    /// Period used when the statement does not print one (default: current month)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_period: Option<ReferencePeriod>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    /// File written by `parse --csv` without a path
    pub default_csv: PathBuf,
    /// Prefix CSV output with a UTF-8 BOM
    pub bom: bool,
}

impl Default for ExportSection {
    fn default() -> Self {
        Self {
            default_csv: PathBuf::from(DEFAULT_CSV_NAME),
            bom: true,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(cmbstmt_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}

pub fn save_config_to(cfg: &Config, p: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = ensure_cmbstmt_home()?.join("config.toml");
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config_to(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}
