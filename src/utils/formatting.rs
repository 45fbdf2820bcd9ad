//! Formatting utilities used for CLI and export outputs.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Hours with three decimals, as shown everywhere in reports ("12.500").
pub fn fmt_hours(h: f64) -> String {
    format!("{:.3}", h)
}

/// Hours with a trailing unit ("12.500h").
pub fn fmt_hours_unit(h: f64) -> String {
    format!("{:.3}h", h)
}

/// Cut `s` to at most `max` display columns, marking the cut with "…".
/// Wide characters (CJK, emoji) count as two columns.
pub fn truncate(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let budget = max - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
