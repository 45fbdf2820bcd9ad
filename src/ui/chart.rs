//! Horizontal bar charts for the terminal.

use crate::utils::colors::{BLUE, GREY, RED, RESET};
use crate::utils::formatting::truncate;
use crate::utils::fmt_hours;
use unicode_width::UnicodeWidthStr;

const FULL: char = '█';
const LIGHT: char = '░';
const MAX_LABEL: usize = 28;

fn label_width(labels: impl Iterator<Item = usize>) -> usize {
    labels.max().unwrap_or(0).min(MAX_LABEL)
}

fn pad_label(label: &str, width: usize) -> String {
    let label = truncate(label, width);
    let pad = width.saturating_sub(UnicodeWidthStr::width(label.as_str()));
    format!("{}{}", label, " ".repeat(pad))
}

fn scale(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

/// One bar per `(label, value)`, scaled so the largest fills `width` cells.
pub fn bar_chart(series: &[(String, f64)], width: usize) -> String {
    let lw = label_width(series.iter().map(|(l, _)| UnicodeWidthStr::width(l.as_str())));
    let max = series.iter().map(|(_, v)| *v).fold(0.0, f64::max);

    let mut out = String::new();
    for (label, value) in series {
        let n = scale(*value, max, width);
        out.push_str(&format!(
            "{} │{BLUE}{}{RESET} {}\n",
            pad_label(label, lw),
            FULL.to_string().repeat(n),
            fmt_hours(*value)
        ));
    }
    out
}

/// Stacked bars: `spent` in solid blocks, `remaining` in light blocks.
pub fn stacked_chart(series: &[(String, f64, f64)], width: usize) -> String {
    let lw = label_width(series.iter().map(|(l, _, _)| UnicodeWidthStr::width(l.as_str())));
    let max = series.iter().map(|(_, a, b)| a + b).fold(0.0, f64::max);

    let mut out = String::new();
    for (label, spent, remaining) in series {
        let a = scale(*spent, max, width);
        let b = scale(*remaining, max, width);
        out.push_str(&format!(
            "{} │{BLUE}{}{RESET}{RED}{}{RESET} {} {GREY}+{}{RESET}\n",
            pad_label(label, lw),
            FULL.to_string().repeat(a),
            LIGHT.to_string().repeat(b),
            fmt_hours(*spent),
            fmt_hours(*remaining)
        ));
    }
    out
}
