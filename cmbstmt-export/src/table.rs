//! Plain-text table for terminal output.

use cmbstmt_ingest::{HEADER_COUNT, Transaction};

/// Column widths are measured in terminal cells. This approximates East Asian
/// Width for the scripts statements carry: CJK and fullwidth forms take two
/// cells, combining marks take none, everything else takes one. Emoji are
/// counted as one and may misalign.
fn display_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

fn char_width(c: char) -> usize {
    match c as u32 {
        0x0300..=0x036F | 0x200B..=0x200F | 0xFE00..=0xFE0F => 0,
        0x1100..=0x115F
        | 0x2E80..=0x303E
        | 0x3041..=0x33FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0xA000..=0xA4CF
        | 0xAC00..=0xD7A3
        | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F
        | 0xFF00..=0xFF60
        | 0xFFE0..=0xFFE6
        | 0x20000..=0x3FFFD => 2,
        _ => 1,
    }
}

fn pad(s: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(display_width(s)));
    if right_align {
        format!("{fill}{s}")
    } else {
        format!("{s}{fill}")
    }
}

/// `1234.5` -> `1,234.50`
pub fn format_amount(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Render rows under the resolved headers.
///
/// Column order follows the statement view: index, transaction date, post
/// date, description, card, RMB amount, original amount.
pub fn render_table(headers: &[String; HEADER_COUNT], rows: &[&Transaction]) -> String {
    let titles = [
        "#",
        headers[0].as_str(),
        headers[1].as_str(),
        headers[2].as_str(),
        headers[4].as_str(),
        headers[3].as_str(),
        headers[5].as_str(),
    ];
    let right_aligned = [true, false, false, false, false, true, true];

    let cells: Vec<[String; 7]> = rows
        .iter()
        .map(|t| {
            [
                t.original_index.to_string(),
                t.trans_date.clone(),
                t.post_date.clone(),
                t.description.clone(),
                t.card_last_four.clone(),
                format_amount(t.amount_rmb),
                t.original_amount.map(format_amount).unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths = titles.map(display_width);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(display_width(cell));
        }
    }

    let line = |values: [&str; 7]| -> String {
        values
            .iter()
            .zip(widths.iter().zip(right_aligned))
            .map(|(v, (w, right))| pad(v, *w, right))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = format!("Parsed transactions ({})\n\n", rows.len());
    out.push_str(&line(titles));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    out.push('\n');

    if cells.is_empty() {
        out.push_str("(no transactions found)\n");
    }
    for row in &cells {
        out.push_str(&line(row.each_ref().map(String::as_str)));
        out.push('\n');
    }
    out
}
