use crate::db::pool::DbPool;
use crate::db::store::{get_last_update, list_tables};
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) LAST INGEST
    //
    let last = get_last_update(pool)?.unwrap_or_else(|| format!("{GREY}never{RESET}"));
    println!("{}• Last update:{} {}", CYAN, RESET, last);

    //
    // 3) TABLES
    //
    println!("{}• Tables:{}", CYAN, RESET);
    for t in list_tables(pool)? {
        let padded = format!("{:<12}", t.name);
        let name = if t.internal {
            format!("{GREY}{padded}{RESET}")
        } else {
            padded
        };
        println!("    {} {}{:>8}{} rows", name, GREEN, t.rows, RESET);
    }

    println!();
    Ok(())
}
