use crate::domain::{StyleMap, WIDTH_KEY};

/// Formats a style map as an inline CSS declaration list.
///
/// Pairs are joined as `key: value` with `"; "` in map order. The `width`
/// entry is skipped because callers emit it as an HTML attribute. Values are
/// inserted verbatim.
pub fn format_styles(styles: &StyleMap) -> String {
    styles
        .iter()
        .filter(|(key, _)| *key != WIDTH_KEY)
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}
