//! CSV export for spreadsheet tools.
//!
//! Column order: transaction date, post date, description, RMB amount,
//! card last four, original amount. The header row uses the statement's
//! resolved labels.

use anyhow::{Context, Result};
use cmbstmt_ingest::{HEADER_COUNT, ParsedStatement, Transaction};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

pub const DEFAULT_CSV_NAME: &str = "transactions.csv";

/// Excel only detects UTF-8 when the file starts with a BOM.
const UTF8_BOM: &str = "\u{FEFF}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    pub bom: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { bom: true }
    }
}

/// Write every transaction of `statement` with a leading BOM.
pub fn write_csv<W: Write>(writer: W, statement: &ParsedStatement) -> Result<()> {
    write_csv_with(
        writer,
        &statement.headers,
        &statement.transactions,
        CsvOptions::default(),
    )
}

pub fn write_csv_with<'a, W, I>(
    mut writer: W,
    headers: &[String; HEADER_COUNT],
    transactions: I,
    options: CsvOptions,
) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Transaction>,
{
    if options.bom {
        writer
            .write_all(UTF8_BOM.as_bytes())
            .context("write byte-order mark")?;
    }

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(headers).context("write header row")?;

    for txn in transactions {
        let amount = txn.amount_rmb.to_string();
        let original = txn
            .original_amount
            .map(|a| a.to_string())
            .unwrap_or_default();

        wtr.write_record([
            txn.trans_date.as_str(),
            txn.post_date.as_str(),
            txn.description.as_str(),
            amount.as_str(),
            txn.card_last_four.as_str(),
            original.as_str(),
        ])
        .with_context(|| format!("write row {}", txn.original_index))?;
    }

    wtr.flush().context("flush csv")?;
    Ok(())
}

/// Export to a file, creating or truncating it.
pub fn export_csv_file(
    path: impl AsRef<Path>,
    statement: &ParsedStatement,
    options: CsvOptions,
) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;

    write_csv_with(
        BufWriter::new(file),
        &statement.headers,
        &statement.transactions,
        options,
    )
    .with_context(|| format!("export {}", path.display()))?;

    info!(path = %path.display(), rows = statement.len(), "csv exported");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmbstmt_ingest::headers::default_headers;

    fn txn(idx: usize, amount: f64, original: Option<f64>) -> Transaction {
        Transaction {
            original_index: idx,
            trans_date: "2025-11-02".to_string(),
            post_date: "2025-11-03".to_string(),
            description: "支付宝-特约商户".to_string(),
            amount_rmb: amount,
            card_last_four: "5445".to_string(),
            original_amount: original,
        }
    }

    fn render(statement: &ParsedStatement, options: CsvOptions) -> String {
        let mut buf = Vec::new();
        write_csv_with(&mut buf, &statement.headers, &statement.transactions, options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_bom_header_and_rows() {
        let stmt = ParsedStatement {
            headers: default_headers(),
            transactions: vec![txn(1, 38.2, Some(38.2)), txn(2, -68.0, None)],
        };

        let out = render(&stmt, CsvOptions::default());
        assert!(out.starts_with('\u{FEFF}'));

        let lines: Vec<&str> = out.trim_start_matches('\u{FEFF}').lines().collect();
        assert_eq!(
            lines[0],
            "Transaction Date,Post Date,Description,Amount (RMB),Card #,Original Amount"
        );
        assert_eq!(lines[1], "2025-11-02,2025-11-03,支付宝-特约商户,38.2,5445,38.2");
        assert_eq!(lines[2], "2025-11-02,2025-11-03,支付宝-特约商户,-68,5445,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_without_bom() {
        let stmt = ParsedStatement::empty();
        let out = render(&stmt, CsvOptions { bom: false });
        assert_eq!(
            out,
            "Transaction Date,Post Date,Description,Amount (RMB),Card #,Original Amount\n"
        );
    }

    #[test]
    fn test_description_with_comma_is_quoted() {
        let mut t = txn(1, 10.0, None);
        t.description = "STARBUCKS, SHANGHAI".to_string();
        let stmt = ParsedStatement {
            headers: default_headers(),
            transactions: vec![t],
        };

        let out = render(&stmt, CsvOptions { bom: false });
        assert!(out.contains("\"STARBUCKS, SHANGHAI\""));
    }
}
