use std::sync::LazyLock;

use regex::Regex;

/// An ASCII capital that is not at the start of a word.
static INNER_CAPITAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B([A-Z])").expect("valid hardcoded regex"));

/// Turns an identifier-style key into a display heading.
///
/// `firstName` becomes `First name`, `zip_code` becomes `Zip code`. Used for
/// table headings only, never for storage keys.
pub fn format_heading(key: &str) -> String {
    let spaced = INNER_CAPITAL_RE.replace_all(key, " $1");
    let lowered = spaced.replace('_', " ").to_lowercase();
    let mut chars = lowered.chars();
    match chars.next() {
        Some(first) if first.is_alphanumeric() => first.to_uppercase().chain(chars).collect(),
        _ => lowered,
    }
}
