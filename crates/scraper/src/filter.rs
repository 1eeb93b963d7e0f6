//! Shop & establishment filtering
//!
//! The shop & establishment page carries one multi-state table. A data row is kept
//! for a state when the joined, lowercased row text contains the state's name or one
//! of its variants as a whole word, as a space-padded phrase, as an unpadded
//! multi-word phrase, or as the entire row.

use std::collections::HashSet;

use compliance_agent_core::TableMatrix;

/// Rows of `tables` relevant to `state`.
///
/// The header row is always kept. A table survives only when at least one data
/// row matched, otherwise it is treated as "no data for this state".
pub fn filter_tables_for_state(
    tables: &[TableMatrix],
    state: &str,
    variants: &[&str],
) -> Vec<TableMatrix> {
    let state = state.trim().to_lowercase();
    let mut needles: Vec<String> = variants.iter().map(|v| v.to_lowercase()).collect();
    if !needles.contains(&state) {
        needles.insert(0, state);
    }

    tables
        .iter()
        .filter_map(|table| {
            let (header, body) = table.split_first()?;
            let matched: Vec<Vec<String>> = body
                .iter()
                .filter(|row| row_matches(row, &needles))
                .cloned()
                .collect();
            if matched.is_empty() {
                return None;
            }
            let mut kept = Vec::with_capacity(matched.len() + 1);
            kept.push(header.clone());
            kept.extend(matched);
            Some(kept)
        })
        .collect()
}

fn row_matches(row: &[String], needles: &[String]) -> bool {
    let text = row.join(" ").to_lowercase();
    let words: HashSet<&str> = text
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect();
    let padded = format!(" {} ", text);
    let trimmed = text.trim();

    needles.iter().any(|needle| {
        words.contains(needle.as_str())
            || padded.contains(&format!(" {} ", needle))
            || needle == trimmed
            || (needle.contains(' ') && text.contains(needle.as_str()))
    })
}
