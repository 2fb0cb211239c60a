//! Formatting utilities used for CLI outputs.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI regex"));

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Pad to `width` terminal columns, ignoring ANSI escape sequences.
pub fn pad_right(s: &str, width: usize) -> String {
    let visible = visible_width(s);
    format!("{}{}", s, " ".repeat(width.saturating_sub(visible)))
}

/// Text with ANSI colour codes removed.
pub fn strip_ansi(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Terminal width of `s` once ANSI colour codes are stripped.
pub fn visible_width(s: &str) -> usize {
    UnicodeWidthStr::width(strip_ansi(s).as_str())
}
