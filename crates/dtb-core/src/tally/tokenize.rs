use std::sync::OnceLock;

use regex::Regex;

static DELIMITERS: OnceLock<Regex> = OnceLock::new();

fn delimiters() -> &'static Regex {
    // Runs of whitespace, `+` and `,` collapse into a single split point.
    // U+FEFF counts as whitespace too; `\s` alone does not cover it.
    DELIMITERS.get_or_init(|| Regex::new(r"[+\s,\x{FEFF}]+").expect("valid regex"))
}

/// Split a raw chat message into duration tokens.
///
/// Pieces are trimmed and empty pieces are dropped, so a message made only of
/// separators yields no tokens at all.
pub fn tokenize(text: &str) -> Vec<&str> {
    delimiters()
        .split(text)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}
