//! Fragment dump for diagnosing layouts the parser does not recognize.

use anyhow::Result;
use clap::Args;
use cmbstmt_ingest::parsers::cmb_credit::REPAYMENT_MARKERS;
use std::ops::Range;
use std::path::PathBuf;

use crate::input::load_fragments;

#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Statement PDF or extracted text file
    pub input: PathBuf,

    /// Only show the neighbourhood of fragments containing this text (repeatable)
    #[arg(long)]
    pub find: Vec<String>,

    /// Also search for the automatic repayment markers
    #[arg(long, default_value_t = false)]
    pub repayments: bool,

    /// Fragments shown before and after each hit
    #[arg(long, default_value_t = 5)]
    pub context: usize,
}

impl DumpArgs {
    fn needles(&self) -> Vec<&str> {
        let mut needles: Vec<&str> = self.find.iter().map(String::as_str).collect();
        if self.repayments {
            needles.extend(REPAYMENT_MARKERS);
        }
        needles
    }
}

/// Indices of fragments containing any needle.
pub fn find_hits<S: AsRef<str>>(fragments: &[S], needles: &[&str]) -> Vec<usize> {
    fragments
        .iter()
        .enumerate()
        .filter(|(_, f)| needles.iter().any(|n| f.as_ref().contains(n)))
        .map(|(i, _)| i)
        .collect()
}

pub fn context_range(hit: usize, len: usize, context: usize) -> Range<usize> {
    hit.saturating_sub(context)..hit.saturating_add(context).saturating_add(1).min(len)
}

fn print_range(fragments: &[String], range: Range<usize>) {
    for idx in range {
        println!("{idx:>6}  {}", fragments[idx]);
    }
}

pub fn run_dump(args: &DumpArgs) -> Result<()> {
    let fragments = load_fragments(&args.input)?;
    let needles = args.needles();

    println!("{} fragments in {}", fragments.len(), args.input.display());

    if needles.is_empty() {
        print_range(&fragments, 0..fragments.len());
        return Ok(());
    }

    let hits = find_hits(&fragments, &needles);
    if hits.is_empty() {
        println!("no fragment contains {:?}", needles);
    }
    for hit in hits {
        println!("--- hit at {hit}: {:?}", fragments[hit]);
        print_range(&fragments, context_range(hit, fragments.len(), args.context));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_hits() {
        let frags = ["11/06", "信用卡自动还款", "200.00", "5678", "Automatic Repayment"];
        assert_eq!(find_hits(&frags, &REPAYMENT_MARKERS), vec![1, 4]);
        assert_eq!(find_hits(&frags, &["5678"]), vec![3]);
        assert!(find_hits(&frags, &["NaN"]).is_empty());
    }

    #[test]
    fn test_context_range_clamps() {
        assert_eq!(context_range(1, 10, 5), 0..7);
        assert_eq!(context_range(8, 10, 5), 3..10);
        assert_eq!(context_range(4, 10, 0), 4..5);
        assert_eq!(context_range(4, 10, usize::MAX), 0..10);
    }

    #[test]
    fn test_needles() {
        let args = DumpArgs {
            input: PathBuf::from("x.pdf"),
            find: vec!["NaN".to_string()],
            repayments: true,
            context: 5,
        };
        assert_eq!(args.needles(), vec!["NaN", "自动还款", "Automatic Repayment"]);
    }
}
