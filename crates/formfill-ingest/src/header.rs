//! Header row normalization.

use std::collections::BTreeSet;

/// Trims a raw header, strips a BOM and collapses inner whitespace runs.
pub(crate) fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

/// Builds the final column names for a header row.
///
/// Blank headers become `Unnamed: <idx>`; repeated names get `.1`, `.2`, ...
/// suffixes so that every column stays addressable.
pub(crate) fn build_headers<I>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen: BTreeSet<String> = BTreeSet::new();
    let mut headers = Vec::new();
    for (idx, value) in raw.into_iter().enumerate() {
        let base = match normalize_header(&value) {
            name if name.is_empty() => format!("Unnamed: {idx}"),
            name => name,
        };
        let mut name = base.clone();
        let mut suffix = 1usize;
        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }
        seen.insert(name.clone());
        headers.push(name);
    }
    headers
}
