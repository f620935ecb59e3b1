//! Input boundary: turn extracted text into the ordered fragment sequence.

/// Split text into trimmed, non-empty lines, keeping reading order.
pub fn fragments_from_text(text: &str) -> Vec<String> {
    fragments_from_runs(text.lines())
}

/// Trim each text run and drop the blank ones, keeping order.
pub fn fragments_from_runs<I>(runs: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    runs.into_iter()
        .filter_map(|run| {
            let run = run.as_ref().trim();
            (!run.is_empty()).then(|| run.to_string())
        })
        .collect()
}
