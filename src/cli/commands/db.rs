use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::db::store::list_tables;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RED, RESET};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
        tables,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let n = run_pending_migrations(&pool.conn)?;
            println!("{}✔ Migration completed ({} applied).{}\n", GREEN, n, RESET);
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        //
        // 3) TABLES
        //
        if *tables {
            let rows: Vec<Vec<String>> = list_tables(&pool)?
                .into_iter()
                .map(|t| {
                    vec![
                        t.name,
                        t.rows.to_string(),
                        t.columns.to_string(),
                        if t.internal { "internal" } else { "data" }.to_string(),
                    ]
                })
                .collect();
            let table = Table::auto(
                &["table", "rows", "columns", "kind"],
                rows,
                &[false, true, true, false],
            );
            print!("{}", table.render());
        }

        //
        // 4) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        //
        // 5) VACUUM
        //
        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            pool.conn.execute_batch("VACUUM;")?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }

        if !(*migrate || *info || *tables || *check || *vacuum) {
            println!("{}Nothing to do. Try --info or --tables.{}", GREY, RESET);
        }
    }

    Ok(())
}
