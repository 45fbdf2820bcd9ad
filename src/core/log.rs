use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

static ANSI: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ansi regex"));

const MAX_OP_WIDTH: usize = 60;

fn visible_len(s: &str) -> usize {
    ANSI.replace_all(s, "").chars().count()
}

/// ANSI colour for an operation name.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "fetch" => Colour::Green,
        "upload" => Colour::Cyan,
        "export" | "report" => Colour::Blue,
        "init" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        _ => Colour::White,
    }
}

struct Entry {
    id: i64,
    date: String,
    operation: String,
    target: String,
    message: String,
}

pub struct LogLogic;

impl LogLogic {
    /// Print the internal `log` table, oldest first. `limit` keeps only the newest N.
    pub fn print_log(pool: &DbPool, limit: Option<usize>) -> AppResult<()> {
        let mut stmt = pool.conn.prepare_cached(
            "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
        )?;

        let mut entries = stmt
            .query_map([], |row| {
                let raw_date: String = row.get(1)?;
                let date = chrono::DateTime::parse_from_rfc3339(&raw_date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or(raw_date);
                Ok(Entry {
                    id: row.get(0)?,
                    date,
                    operation: row.get(2)?,
                    target: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                    message: row.get(4)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        if let Some(n) = limit
            && entries.len() > n
        {
            entries.drain(..entries.len() - n);
        }

        if entries.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = entries.iter().map(|e| e.id.to_string().len()).max().unwrap_or(1);
        let date_w = entries.iter().map(|e| e.date.len()).max().unwrap_or(10);

        let labels: Vec<String> = entries
            .iter()
            .map(|e| {
                let color = color_for_operation(&e.operation);
                let mut label = color.paint(e.operation.as_str()).to_string();
                if !e.target.is_empty() {
                    let room = MAX_OP_WIDTH.saturating_sub(e.operation.chars().count() + 3);
                    let target = if e.target.chars().count() > room {
                        let mut t: String = e.target.chars().take(room.saturating_sub(3)).collect();
                        t.push_str("...");
                        t
                    } else {
                        e.target.clone()
                    };
                    label.push_str(&format!(" ({target})"));
                }
                label
            })
            .collect();

        let op_w = labels
            .iter()
            .map(|l| visible_len(l))
            .max()
            .unwrap_or(10)
            .min(MAX_OP_WIDTH);

        println!("📜 Internal log:\n");

        for (e, label) in entries.iter().zip(&labels) {
            let padding = " ".repeat(op_w.saturating_sub(visible_len(label)));
            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                e.id,
                e.date,
                label,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
