use hourboard::core::normalize::{
    is_valid_period_key, normalize_hours, pad_month, parse_decimal, period_key, period_sort_key,
    round3,
};
use hourboard::errors::AppError;
use hourboard::models::table::{CellValue, DataTable};

fn raw(columns: &[&str], rows: &[&[&str]]) -> DataTable {
    DataTable::from_strings(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

#[test]
fn period_key_pads_month() {
    assert_eq!(period_key("7", "2024"), "07/2024");
    assert_eq!(period_key(" 11 ", " 2023 "), "11/2023");
    assert_eq!(pad_month("3"), "03");
    assert_eq!(pad_month("12"), "12");
}

#[test]
fn decimal_comma_and_garbage() {
    assert_eq!(parse_decimal("1,5"), 1.5);
    assert_eq!(parse_decimal(" 2.25 "), 2.25);
    assert_eq!(parse_decimal("abc"), 0.0);
    assert_eq!(parse_decimal(""), 0.0);
    assert_eq!(parse_decimal("NaN"), 0.0);
    assert_eq!(round3(1.23456), 1.235);
}

#[test]
fn rounding_ties_go_to_even() {
    assert_eq!(round3(2.0625), 2.062);
    assert_eq!(round3(2.1875), 2.188);
    assert_eq!(round3(0.0625), 0.062);
    assert_eq!(round3(-2.0625), -2.062);

    let table = raw(&["MES", "ANO", "HORAS_EM_MINUTOS"], &[&["1", "2024", "2,0625"]]);
    let out = normalize_hours(table).expect("normalize");
    assert_eq!(out.rows[0][2], CellValue::Number(2.062));
}

#[test]
fn period_key_validation() {
    assert!(is_valid_period_key("07/2024"));
    assert!(is_valid_period_key("12/2023"));
    assert!(!is_valid_period_key("13/2024"));
    assert!(!is_valid_period_key("00/2024"));
    assert!(!is_valid_period_key("7/2024"));
    assert!(!is_valid_period_key("07/24"));
}

#[test]
fn periods_sort_by_year_then_month() {
    let mut keys = vec!["01/2024", "12/2023", "03/2024"];
    keys.sort_by_key(|k| period_sort_key(k));
    assert_eq!(keys, vec!["12/2023", "01/2024", "03/2024"]);
}

#[test]
fn normalize_hours_coerces_and_derives_period() {
    let table = raw(
        &["PROFISSIONAL", "MES", "ANO", "HORAS_EM_MINUTOS", "MINUTO"],
        &[&["Ana", " 7", "2024 ", "1,5", "90"], &["Bob", "10", "2024", "oops", ""]],
    );

    let out = normalize_hours(table).expect("normalize");

    assert_eq!(out.columns.last().map(String::as_str), Some("MES_ANO"));
    assert_eq!(out.text(0, "MES_ANO"), "07/2024");
    assert_eq!(out.text(0, "MES"), "7");
    assert_eq!(out.text(0, "ANO"), "2024");
    assert_eq!(out.rows[0][3], CellValue::Number(1.5));
    assert_eq!(out.rows[0][4], CellValue::Number(90.0));
    assert_eq!(out.rows[1][3], CellValue::Number(0.0));
    assert_eq!(out.rows[1][4], CellValue::Number(0.0));
    assert_eq!(out.text(1, "MES_ANO"), "10/2024");
}

#[test]
fn normalize_overwrites_existing_period_column() {
    let table = raw(
        &["MES", "ANO", "MES_ANO", "HORAS_EM_MINUTOS"],
        &[&["5", "2024", "stale", "1"]],
    );
    let out = normalize_hours(table).expect("normalize");
    assert_eq!(out.columns.len(), 4);
    assert_eq!(out.text(0, "MES_ANO"), "05/2024");
}

#[test]
fn normalize_requires_hours_column() {
    let table = raw(&["MES", "ANO"], &[&["5", "2024"]]);
    match normalize_hours(table) {
        Err(AppError::MissingColumn(c)) => assert_eq!(c, "HORAS_EM_MINUTOS"),
        other => panic!("expected MissingColumn, got {other:?}"),
    }
}

#[test]
fn ragged_rows_and_blank_headers() {
    let table = raw(&["A", "", "A"], &[&["1"], &["1", "2", "3", "4"]]);
    assert_eq!(table.columns, vec!["A", "column_2", "A_2"]);
    assert_eq!(table.rows[0].len(), 3);
    assert_eq!(table.rows[1].len(), 3);
    assert_eq!(table.text(0, "A_2"), "");
}
