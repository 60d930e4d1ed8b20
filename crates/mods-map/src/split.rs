//! Splitting raw cell values into entries and divisions.

/// Divides the sections of a multi-part value inside one entry.
pub const SECTION_DIVIDER: char = '#';
/// Escapes a literal [`SECTION_DIVIDER`] inside data.
pub const ESCAPE_CHAR: char = '\\';
/// Default separator between independent values within one cell.
/// Historically a single `|`, which collided with real data too often.
pub const DEFAULT_ENTRY_SEPARATOR: &str = "||";

/// Split a cell into independent entries on the repeat-separator.
///
/// Entries are trimmed; entries that are empty after trimming are dropped.
pub fn split_entries(raw: &str, separator: &str) -> Vec<String> {
    raw.split(separator)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(ToString::to_string)
        .collect()
}

/// Split one entry into its per-section divisions.
///
/// When the path is not sectioned the whole entry is a single division and
/// `#` characters inside it stay literal. Otherwise the entry is split on
/// each unescaped `#`; `\#` yields a literal `#` with the backslash
/// removed, and a backslash not followed by `#` is kept as-is. Empty
/// divisions, including trailing ones, are preserved.
pub fn split_divisions(entry: &str, sectioned: bool) -> Vec<String> {
    if !sectioned {
        return vec![entry.to_string()];
    }
    let mut divisions = Vec::new();
    let mut current = String::new();
    let mut chars = entry.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == ESCAPE_CHAR && chars.peek() == Some(&SECTION_DIVIDER) {
            current.push(SECTION_DIVIDER);
            chars.next();
        } else if ch == SECTION_DIVIDER {
            divisions.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    divisions.push(current);
    divisions
}
