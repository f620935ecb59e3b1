use anyhow::{Context, Result};
use clap::Args;
use cmbstmt_export::{CsvOptions, SortDirection, SortField, TableView, export_csv_file, render_table};
use cmbstmt_ingest::{ReferencePeriod, Transaction, parse_cmb_credit_with_fallback};
use serde::Serialize;
use std::path::PathBuf;

use crate::config::Config;
use crate::input::{ensure_transactions, load_fragments};

#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Statement PDF, or a text file with one extracted fragment per line
    pub input: PathBuf,

    /// Also export CSV (default path: config export.default_csv)
    #[arg(long, value_name = "PATH")]
    pub csv: Option<Option<PathBuf>>,

    /// Print JSON instead of a table
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Only show rows whose description, amount or card contains this text
    #[arg(long)]
    pub filter: Option<String>,

    /// Sort by: index, trans-date, post-date, amount, description
    #[arg(long, default_value_t = SortField::OriginalIndex)]
    pub sort: SortField,

    /// Sort descending
    #[arg(long, default_value_t = false)]
    pub desc: bool,

    /// Fallback statement period (YYYY-MM) when none is printed in the statement
    #[arg(long, value_name = "YYYY-MM")]
    pub period: Option<ReferencePeriod>,

    /// Write CSV without the UTF-8 byte-order mark
    #[arg(long, default_value_t = false)]
    pub no_bom: bool,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    headers: &'a [String],
    transactions: Vec<&'a Transaction>,
}

impl ParseArgs {
    fn view(&self) -> TableView {
        TableView {
            filter: self.filter.clone(),
            sort_field: self.sort,
            direction: if self.desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            },
        }
    }

    fn fallback_period(&self, cfg: &Config) -> ReferencePeriod {
        self.period
            .or(cfg.parse.fallback_period)
            .unwrap_or_else(ReferencePeriod::current)
    }

    fn csv_path(&self, cfg: &Config) -> Option<PathBuf> {
        self.csv
            .as_ref()
            .map(|p| p.clone().unwrap_or_else(|| cfg.export.default_csv.clone()))
    }
}

pub fn run_parse(args: &ParseArgs, cfg: &Config) -> Result<()> {
    let fragments = load_fragments(&args.input)?;
    let statement = parse_cmb_credit_with_fallback(&fragments, args.fallback_period(cfg));
    ensure_transactions(&statement, &args.input)?;

    let rows = args.view().apply(&statement.transactions);

    if args.json {
        let out = JsonOutput {
            headers: &statement.headers,
            transactions: rows,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("serialize transactions")?
        );
    } else {
        print!("{}", render_table(&statement.headers, &rows));
    }

    if let Some(path) = args.csv_path(cfg) {
        let options = CsvOptions {
            bom: cfg.export.bom && !args.no_bom,
        };
        export_csv_file(&path, &statement, options)?;
        eprintln!(
            "Wrote {} transactions to {}",
            statement.len(),
            path.display()
        );
    }

    Ok(())
}
