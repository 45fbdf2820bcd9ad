//! Reading delimiter-separated text files whose separator is not known upfront.

use crate::errors::{AppError, AppResult};
use crate::models::table::DataTable;
use std::io::Read;

const CANDIDATES: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Pick the candidate delimiter that occurs most often outside quotes in
/// `line`. Ties resolve in candidate order; no occurrence at all gives `,`.
pub fn sniff_delimiter(line: &str) -> u8 {
    let mut counts = [0usize; CANDIDATES.len()];
    let mut in_quotes = false;

    for b in line.bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
            continue;
        }
        if in_quotes {
            continue;
        }
        if let Some(i) = CANDIDATES.iter().position(|&c| c == b) {
            counts[i] += 1;
        }
    }

    let mut best = 0;
    for i in 1..CANDIDATES.len() {
        if counts[i] > counts[best] {
            best = i;
        }
    }
    CANDIDATES[best]
}

/// Read a whole delimited document into a text-only table.
/// The first record is the header; blank lines are skipped.
pub fn read_delimited<R: Read>(mut reader: R, source: &str) -> AppResult<DataTable> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    let content = content.trim_start_matches('\u{feff}');

    let first_line = content
        .lines()
        .find(|l| !l.trim().is_empty())
        .ok_or_else(|| AppError::EmptyWorksheet(source.to_string()))?;
    let delimiter = sniff_delimiter(first_line);
    log::debug!("detected delimiter {:?} for {}", delimiter as char, source);

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(content.as_bytes());

    let header: Vec<String> = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut body = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        if rec.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        body.push(rec.iter().map(str::to_string).collect());
    }

    Ok(DataTable::from_strings(header, body))
}
