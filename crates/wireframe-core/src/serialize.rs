//! Wireframe serialization and reference-label parsing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::snapshot::RefId;

static REF_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(\d+)\]").expect("reference label pattern is valid"));

/// Right-trim each row, drop trailing empty rows, join with `\n`.
pub fn serialize_rows<I, R>(rows: I) -> String
where
    I: IntoIterator<Item = R>,
    R: ToString,
{
    let mut lines: Vec<String> = rows
        .into_iter()
        .map(|row| row.to_string().trim_end().to_string())
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Reference ids in the order their labels appear in `wireframe`.
pub fn parse_ref_ids(wireframe: &str) -> Vec<RefId> {
    REF_LABEL
        .captures_iter(wireframe)
        .filter_map(|caps| caps.get(1)?.as_str().parse().ok())
        .map(RefId)
        .collect()
}
