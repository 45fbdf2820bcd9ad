#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub const HOURS_CSV: &str = "\
PROFISSIONAL,CLIENTE_CONCATENADO,AREA,MES,ANO,HORAS_EM_MINUTOS,MINUTO
Ana,ACME,Dev,7,2024,\"1,5\",90
Ana,ACME,Dev, 7 ,2024,\"2,25\",135
Bruno,Globex,Ops,8,2024,4,240
Bruno,ACME,Ops,13,2024,3,180
Carla,Globex,Dev,12,2023,abc,x
";

pub const ALLOCATION_CSV: &str = "\
PROFISSIONAL;CLIENTE;MES_ANTERIOR;MES_ATUAL;PROXIMO_MES;HORAS_TOTAIS;HORAS_MES
Ana;ACME;40;50;50;160;40
Bruno;Globex;100;10;0;160;20
Zed;Initech;0;100;0;160;abc
";

/// Scratch config directory so tests never touch the real home.
pub fn test_home() -> PathBuf {
    let mut path = env::temp_dir();
    path.push("hourboard_test_home");
    fs::create_dir_all(&path).ok();
    path
}

pub fn hb() -> Command {
    let mut cmd = cargo_bin_cmd!("hourboard");
    cmd.env("HOURBOARD_HOME", test_home())
        .env_remove("HOURBOARD_ACCESS_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_hourboard.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Create a temporary output file path inside tempdir and ensure it's removed
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}

/// Write `content` to a temp file and return its path.
pub fn write_fixture(name: &str, content: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("hourboard_{}", name));
    fs::write(&path, content).expect("write fixture");
    path.to_string_lossy().to_string()
}

/// Initialize DB, ingest the hours fixture and upload the allocation fixture.
pub fn init_db_with_data(name: &str) -> String {
    let db_path = setup_test_db(name);

    hb().args(["--db", &db_path, "--test", "init"])
        .assert()
        .success();

    let hours = write_fixture(&format!("{name}_hours.csv"), HOURS_CSV);
    hb().args(["--db", &db_path, "fetch", "--from-file", &hours])
        .assert()
        .success();

    let alloc = write_fixture(&format!("{name}_alloc.csv"), ALLOCATION_CSV);
    hb().args(["--db", &db_path, "upload", &alloc])
        .assert()
        .success();

    db_path
}
