//! Self-contained HTML document builder: inline CSS, no scripts, no external assets.

use crate::models::table::format_number;
use crate::utils::fmt_hours;
use std::fs;
use std::io;
use std::path::Path;

const STYLE: &str = r#"
body { font-family: -apple-system, "Segoe UI", Helvetica, Arial, sans-serif; margin: 32px; color: #1f2933; background: #f7f9fb; }
h1 { margin-bottom: 4px; }
h2 { margin-top: 36px; border-bottom: 2px solid #4c78a8; padding-bottom: 4px; }
.meta { color: #6b7280; font-size: 0.9em; }
.kpis { display: flex; gap: 16px; margin: 20px 0; }
.kpi { background: #fff; border-radius: 8px; padding: 14px 22px; box-shadow: 0 1px 3px rgba(0,0,0,.12); }
.kpi .label { color: #6b7280; font-size: 0.85em; }
.kpi .value { font-size: 1.6em; font-weight: bold; }
.chart { background: #fff; border-radius: 8px; padding: 12px 16px; box-shadow: 0 1px 3px rgba(0,0,0,.12); }
.bar-row { display: flex; align-items: center; margin: 4px 0; }
.bar-label { width: 240px; flex-shrink: 0; font-size: 0.9em; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
.bar-track { flex-grow: 1; display: flex; }
.bar { height: 22px; color: #fff; font-size: 0.8em; font-weight: bold; line-height: 22px; text-align: right; padding-right: 4px; box-sizing: border-box; white-space: nowrap; }
.spent { background: #4c78a8; }
.remaining { background: #e45756; }
.legend span { display: inline-block; width: 12px; height: 12px; margin: 0 4px 0 12px; vertical-align: middle; }
table { border-collapse: collapse; background: #fff; font-size: 0.85em; margin-top: 8px; }
th { background: #2f75b5; color: #fff; padding: 6px 10px; text-align: left; }
td { padding: 4px 10px; border-bottom: 1px solid #e5e7eb; }
td.num { text-align: right; font-variant-numeric: tabular-nums; }
tr:nth-child(even) td { background: #eaf3fb; }
"#;

/// Escape text for HTML element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn percent(value: f64, max: f64) -> f64 {
    if max <= 0.0 || value <= 0.0 {
        0.0
    } else {
        (value / max * 100.0).min(100.0)
    }
}

pub struct HtmlReport {
    title: String,
    body: String,
}

impl HtmlReport {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            body: String::new(),
        }
    }

    pub fn heading(&mut self, text: &str) {
        self.body.push_str(&format!("<h2>{}</h2>\n", escape(text)));
    }

    pub fn note(&mut self, text: &str) {
        self.body
            .push_str(&format!("<p class=\"meta\">{}</p>\n", escape(text)));
    }

    pub fn kpis(&mut self, items: &[(&str, String)]) {
        self.body.push_str("<div class=\"kpis\">\n");
        for (label, value) in items {
            self.body.push_str(&format!(
                "<div class=\"kpi\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
                escape(label),
                escape(value)
            ));
        }
        self.body.push_str("</div>\n");
    }

    /// Horizontal bars, widths relative to the largest value.
    pub fn bar_chart(&mut self, series: &[(String, f64)]) {
        let max = series.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        self.body.push_str("<div class=\"chart\">\n");
        for (label, value) in series {
            self.body.push_str(&format!(
                "<div class=\"bar-row\"><div class=\"bar-label\" title=\"{l}\">{l}</div>\
                 <div class=\"bar-track\"><div class=\"bar spent\" style=\"width:{w:.2}%\">{v}</div></div></div>\n",
                l = escape(label),
                w = percent(*value, max),
                v = fmt_hours(*value)
            ));
        }
        self.body.push_str("</div>\n");
    }

    /// Two-segment bars (spent, remaining) sharing one scale.
    pub fn stacked_chart(&mut self, series: &[(String, f64, f64)]) {
        let max = series.iter().map(|(_, a, b)| a + b).fold(0.0, f64::max);
        self.body.push_str(
            "<div class=\"chart\">\n<div class=\"legend meta\"><span class=\"spent\"></span>Spent\
             <span class=\"remaining\"></span>Remaining</div>\n",
        );
        for (label, spent, remaining) in series {
            let mut bars = String::new();
            for (class, value) in [("spent", spent), ("remaining", remaining)] {
                if *value > 0.0 {
                    bars.push_str(&format!(
                        "<div class=\"bar {class}\" style=\"width:{:.2}%\">{:.1}</div>",
                        percent(*value, max),
                        value
                    ));
                }
            }
            self.body.push_str(&format!(
                "<div class=\"bar-row\"><div class=\"bar-label\" title=\"{l}\">{l}</div>\
                 <div class=\"bar-track\">{bars}</div></div>\n",
                l = escape(label)
            ));
        }
        self.body.push_str("</div>\n");
    }

    /// Plain table; cells flagged in `numeric` are right-aligned.
    pub fn table(&mut self, headers: &[String], rows: &[Vec<String>], numeric: &[bool]) {
        self.body.push_str("<table>\n<tr>");
        for h in headers {
            self.body.push_str(&format!("<th>{}</th>", escape(h)));
        }
        self.body.push_str("</tr>\n");

        for row in rows {
            self.body.push_str("<tr>");
            for (i, cell) in row.iter().enumerate() {
                let class = if numeric.get(i).copied().unwrap_or(false) {
                    " class=\"num\""
                } else {
                    ""
                };
                self.body
                    .push_str(&format!("<td{class}>{}</td>", escape(cell)));
            }
            self.body.push_str("</tr>\n");
        }
        self.body.push_str("</table>\n");
    }

    /// Convenience for number grids (cross-tabs).
    pub fn number_grid(&mut self, corner: &str, rows: &[String], columns: &[String], values: &[Vec<f64>]) {
        let mut headers = vec![corner.to_string()];
        headers.extend(columns.iter().cloned());

        let body: Vec<Vec<String>> = rows
            .iter()
            .zip(values)
            .map(|(r, vals)| {
                let mut line = vec![r.clone()];
                line.extend(vals.iter().map(|v| format_number(*v)));
                line
            })
            .collect();

        let mut numeric = vec![false];
        numeric.extend(std::iter::repeat_n(true, columns.len()));
        self.table(&headers, &body, &numeric);
    }

    pub fn render(&self) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{t}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<h1>{t}</h1>\n{body}</body>\n</html>\n",
            t = escape(&self.title),
            body = self.body
        )
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.render())
    }
}
