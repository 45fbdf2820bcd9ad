use hourboard::core::normalize::normalize_hours;
use hourboard::db::pool::DbPool;
use hourboard::db::store::{
    get_last_update, list_tables, load_hours, load_table, save_hours, save_table, table_exists,
};
use hourboard::errors::AppError;
use hourboard::models::table::{CellValue, DataTable};
use tempfile::TempDir;

fn open(dir: &TempDir) -> DbPool {
    let path = dir.path().join("nested").join("store.sqlite");
    DbPool::new(&path.to_string_lossy()).expect("open db")
}

fn hours_table() -> DataTable {
    let raw = DataTable::from_strings(
        ["PROFISSIONAL", "MES", "ANO", "HORAS_EM_MINUTOS"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        vec![
            vec!["Ana".into(), "7".into(), "2024".into(), "1,5".into()],
            vec!["Bruno".into(), "13".into(), "2024".into(), "3".into()],
            vec!["Carla".into(), "1".into(), "2025".into(), "2".into()],
        ],
    );
    normalize_hours(raw).expect("normalize")
}

#[test]
fn last_update_is_none_before_first_ingest() {
    let dir = TempDir::new().unwrap();
    let pool = open(&dir);

    assert!(get_last_update(&pool).unwrap().is_none());
    assert!(load_hours(&pool).unwrap().is_none());
    assert!(table_exists(&pool.conn, "metadata").unwrap());
    assert!(!table_exists(&pool.conn, "hours").unwrap());
}

#[test]
fn save_hours_stamps_metadata() {
    let dir = TempDir::new().unwrap();
    let mut pool = open(&dir);

    let stamp = save_hours(&mut pool, &hours_table()).unwrap();
    assert_eq!(get_last_update(&pool).unwrap(), Some(stamp.clone()));
    assert_eq!(stamp.len(), "2024-07-01 10:00:00".len());

    let rows: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM metadata", [], |r| r.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn invalid_period_rows_are_excluded_on_read() {
    let dir = TempDir::new().unwrap();
    let mut pool = open(&dir);
    save_hours(&mut pool, &hours_table()).unwrap();

    let hours = load_hours(&pool).unwrap().unwrap();
    assert_eq!(hours.len(), 2);
    let periods: Vec<String> = (0..hours.len()).map(|i| hours.text(i, "MES_ANO")).collect();
    assert_eq!(periods, vec!["07/2024", "01/2025"]);

    // the raw table keeps every row
    let raw = load_table(&pool, "hours", None).unwrap();
    assert_eq!(raw.len(), 3);
}

#[test]
fn full_replace_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let mut pool = open(&dir);
    let table = hours_table();

    save_table(&mut pool, "snapshot", &table).unwrap();
    let first = load_table(&pool, "snapshot", None).unwrap();
    save_table(&mut pool, "snapshot", &table).unwrap();
    let second = load_table(&pool, "snapshot", None).unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[test]
fn numeric_columns_come_back_as_numbers() {
    let dir = TempDir::new().unwrap();
    let mut pool = open(&dir);
    save_hours(&mut pool, &hours_table()).unwrap();

    let hours = load_hours(&pool).unwrap().unwrap();
    let idx = hours.column_index("HORAS_EM_MINUTOS").unwrap();
    assert_eq!(hours.rows[0][idx], CellValue::Number(1.5));
    let ano = hours.column_index("ANO").unwrap();
    assert_eq!(hours.rows[0][ano], CellValue::Text("2024".into()));
}

#[test]
fn failed_save_keeps_previous_table() {
    let dir = TempDir::new().unwrap();
    let mut pool = open(&dir);
    save_table(&mut pool, "snapshot", &hours_table()).unwrap();

    let empty = DataTable::new(vec![]);
    assert!(save_table(&mut pool, "snapshot", &empty).is_err());
    assert_eq!(load_table(&pool, "snapshot", None).unwrap().len(), 3);
}

#[test]
fn table_names_are_validated() {
    let dir = TempDir::new().unwrap();
    let mut pool = open(&dir);
    let table = hours_table();

    assert!(matches!(
        save_table(&mut pool, "bad name; DROP", &table),
        Err(AppError::InvalidTable(_))
    ));
    assert!(matches!(
        save_table(&mut pool, "metadata", &table),
        Err(AppError::InvalidTable(_))
    ));
    assert!(matches!(
        load_table(&pool, "missing", None),
        Err(AppError::TableNotFound(_))
    ));
}

#[test]
fn list_tables_reports_row_counts() {
    let dir = TempDir::new().unwrap();
    let mut pool = open(&dir);
    save_hours(&mut pool, &hours_table()).unwrap();

    let tables = list_tables(&pool).unwrap();
    let hours = tables.iter().find(|t| t.name == "hours").unwrap();
    assert_eq!(hours.rows, 3);
    assert_eq!(hours.columns, 5);
    assert!(!hours.internal);
    assert!(tables.iter().any(|t| t.name == "metadata" && t.internal));
}

#[test]
fn reopening_does_not_reapply_migrations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("again.sqlite");
    let path = path.to_string_lossy().to_string();

    drop(DbPool::new(&path).unwrap());
    let pool = DbPool::new(&path).unwrap();

    let applied: i64 = pool
        .conn
        .query_row(
            "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(applied, 2);
}
