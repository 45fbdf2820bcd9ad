use predicates::prelude::*;
use predicates::str::contains;
use std::fs;

mod common;
use common::{ALLOCATION_CSV, HOURS_CSV, hb, init_db_with_data, setup_test_db, temp_out, write_fixture};

#[test]
fn test_init_creates_database() {
    let db_path = setup_test_db("init_creates");

    hb().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success()
        .stdout(contains("Database initialized"));

    assert!(std::path::Path::new(&db_path).exists());
}

#[test]
fn test_status_before_first_fetch() {
    let db_path = setup_test_db("status_empty");

    hb().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Hours: no data found"))
        .stdout(contains("Allocation: none loaded"));
}

#[test]
fn test_summary_without_data_warns() {
    let db_path = setup_test_db("summary_empty");

    hb().args(["--db", &db_path, "summary"])
        .assert()
        .success()
        .stdout(contains("No data available"));
}

#[test]
fn test_fetch_from_file_reports_rows() {
    let db_path = setup_test_db("fetch_file");
    let hours = write_fixture("fetch_file_hours.csv", HOURS_CSV);

    hb().args(["--db", &db_path, "fetch", "--from-file", &hours])
        .assert()
        .success()
        .stdout(contains("Data updated successfully. 5 records loaded"));

    hb().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Hours: last update"));
}

#[test]
fn test_fetch_without_credentials_fails() {
    let db_path = setup_test_db("fetch_no_creds");

    hb().args(["--db", &db_path, "fetch"])
        .assert()
        .failure()
        .stderr(contains("Missing credentials"));
}

#[test]
fn test_fetch_missing_required_column_fails() {
    let db_path = setup_test_db("fetch_bad_cols");
    let bad = write_fixture("fetch_bad_cols.csv", "PROFISSIONAL,MES,ANO\nAna,7,2024\n");

    hb().args(["--db", &db_path, "fetch", "--from-file", &bad])
        .assert()
        .failure()
        .stderr(contains("HORAS_EM_MINUTOS"));
}

#[test]
fn test_summary_totals_and_chronological_periods() {
    let db_path = init_db_with_data("summary_totals");

    let output = hb()
        .args(["--db", &db_path, "summary"])
        .output()
        .expect("run summary");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    // 13/2024 is dropped on read: 1.5 + 2.25 + 4 + 0
    assert!(stdout.contains("7.750h"), "stdout: {stdout}");
    assert!(!stdout.contains("13/2024"));

    let p2023 = stdout.find("12/2023").expect("12/2023 present");
    let p07 = stdout.find("07/2024").expect("07/2024 present");
    let p08 = stdout.find("08/2024").expect("08/2024 present");
    assert!(p2023 < p07 && p07 < p08);
}

#[test]
fn test_summary_with_professional_filter() {
    let db_path = init_db_with_data("summary_filter");

    hb().args(["--db", &db_path, "summary", "-p", "Ana", "--rows"])
        .assert()
        .success()
        .stdout(contains("3.750h"))
        .stdout(contains("Bruno").not());
}

#[test]
fn test_compare_allocated_vs_spent() {
    let db_path = init_db_with_data("compare_basic");

    hb().args(["--db", &db_path, "compare"])
        .assert()
        .success()
        .stdout(contains("Ana / ACME"))
        .stdout(contains("20.000"))
        .stdout(contains("16.250"))
        .stdout(contains("Initech").not());
}

#[test]
fn test_compare_without_allocation_warns() {
    let db_path = setup_test_db("compare_no_alloc");
    let hours = write_fixture("compare_no_alloc.csv", HOURS_CSV);
    hb().args(["--db", &db_path, "fetch", "--from-file", &hours])
        .assert()
        .success();

    hb().args(["--db", &db_path, "compare"])
        .assert()
        .success()
        .stdout(contains("No allocation loaded"));
}

#[test]
fn test_upload_preview_does_not_save() {
    let db_path = setup_test_db("upload_preview");
    let alloc = write_fixture("upload_preview.csv", ALLOCATION_CSV);

    hb().args(["--db", &db_path, "upload", &alloc, "--preview"])
        .assert()
        .success()
        .stdout(contains("Preview"))
        .stdout(contains("nothing saved"));

    hb().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Allocation: none loaded"));
}

#[test]
fn test_upload_replaces_allocation() {
    let db_path = init_db_with_data("upload_replace");
    let smaller = write_fixture(
        "upload_replace_small.csv",
        "PROFISSIONAL,CLIENTE,MES_ATUAL,HORAS_MES\nAna,ACME,100,10\n",
    );

    hb().args(["--db", &db_path, "upload", &smaller])
        .assert()
        .success()
        .stdout(contains("Allocation updated successfully. 1 records loaded."));

    hb().args(["--db", &db_path, "status"])
        .assert()
        .success()
        .stdout(contains("Allocation: 1 records loaded."));
}

#[test]
fn test_upload_missing_file_fails() {
    let db_path = setup_test_db("upload_missing");

    hb().args(["--db", &db_path, "upload", "/definitely/not/here.csv"])
        .assert()
        .failure()
        .stderr(contains("Error reading CSV"))
        .stderr(contains("Internal error").not());
}

#[test]
fn test_upload_empty_file_reports_the_file() {
    let db_path = setup_test_db("upload_empty");
    let csv = write_fixture("empty_allocation.csv", "\n\n");

    hb().args(["--db", &db_path, "upload", &csv])
        .assert()
        .failure()
        .stderr(contains("Error reading CSV"))
        .stderr(contains("Empty worksheet"))
        .stderr(contains("Internal error").not());
}

#[test]
fn test_show_with_filters_and_columns() {
    let db_path = init_db_with_data("show_filters");

    hb().args([
        "--db",
        &db_path,
        "show",
        "hours",
        "-f",
        "PROFISSIONAL=Ana",
        "--columns",
        "PROFISSIONAL,MES_ANO",
    ])
    .assert()
    .success()
    .stdout(contains("07/2024"))
    .stdout(contains("2 of 2 rows"))
    .stdout(contains("Bruno").not())
    .stdout(contains("HORAS_EM_MINUTOS").not());
}

#[test]
fn test_show_limit_and_distinct() {
    let db_path = init_db_with_data("show_limit");

    hb().args(["--db", &db_path, "show", "hours", "--limit", "1"])
        .assert()
        .success()
        .stdout(contains("1 of 4 rows"));

    hb().args(["--db", &db_path, "show", "allocation", "--distinct", "CLIENTE"])
        .assert()
        .success()
        .stdout(contains("ACME"))
        .stdout(contains("Initech"));
}

#[test]
fn test_show_unknown_column_fails() {
    let db_path = init_db_with_data("show_bad_filter");

    hb().args(["--db", &db_path, "show", "hours", "-f", "BOGUS=1"])
        .assert()
        .failure()
        .stderr(contains("unknown column"));
}

#[test]
fn test_show_unknown_table_fails() {
    let db_path = init_db_with_data("show_bad_table");

    hb().args(["--db", &db_path, "show", "nothing_here"])
        .assert()
        .failure()
        .stderr(contains("Table not found"));
}

#[test]
fn test_db_tables_lists_row_counts() {
    let db_path = init_db_with_data("db_tables");

    hb().args(["--db", &db_path, "db", "--tables"])
        .assert()
        .success()
        .stdout(contains("allocation"))
        .stdout(contains("hours"))
        .stdout(contains("metadata"));
}

#[test]
fn test_db_check_and_info() {
    let db_path = init_db_with_data("db_check");

    hb().args(["--db", &db_path, "db", "--check", "--info"])
        .assert()
        .success()
        .stdout(contains("Integrity check passed"));
}

#[test]
fn test_log_records_operations() {
    let db_path = init_db_with_data("log_ops");

    hb().args(["--db", &db_path, "log", "--print"])
        .assert()
        .success()
        .stdout(contains("init"))
        .stdout(contains("fetch"))
        .stdout(contains("upload"));
}

#[test]
fn test_config_print_shows_defaults() {
    hb().args(["config", "--print"])
        .assert()
        .success()
        .stdout(contains("worksheet"))
        .stdout(contains("bar_width"));
}

#[test]
fn test_report_writes_html() {
    let db_path = init_db_with_data("report_html");
    let out = temp_out("report_html", "html");

    hb().args(["--db", &db_path, "report", "--file", &out])
        .assert()
        .success();

    let html = fs::read_to_string(&out).expect("report written");
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("Hours Dashboard"));
    assert!(html.contains("Allocated vs spent"));
    assert!(html.contains("16.250"));
    assert!(html.contains("<style>"));
    assert!(!html.contains("13/2024"));
}

#[test]
fn test_report_escapes_html() {
    let db_path = setup_test_db("report_escape");
    let hours = write_fixture(
        "report_escape.csv",
        "PROFISSIONAL,CLIENTE_CONCATENADO,AREA,MES,ANO,HORAS_EM_MINUTOS\n<b>Eve</b>,A&B,Dev,1,2024,1\n",
    );
    hb().args(["--db", &db_path, "fetch", "--from-file", &hours])
        .assert()
        .success();

    let out = temp_out("report_escape", "html");
    hb().args(["--db", &db_path, "report", "--file", &out])
        .assert()
        .success();

    let html = fs::read_to_string(&out).unwrap();
    assert!(html.contains("&lt;b&gt;Eve&lt;/b&gt;"));
    assert!(html.contains("A&amp;B"));
    assert!(!html.contains("<b>Eve"));
}
