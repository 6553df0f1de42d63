//! Integration tests for the unireport binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PAYMENTS: &str = r#"[
    {"studentId": "S-1001", "studentName": "Grace Hopper", "amount": 1250.5, "date": "2024-02-01", "method": "Card", "status": "PAID"},
    {"studentId": "S-1002", "studentName": "Alan Turing", "amount": 300, "date": "2024-02-03", "method": "Transfer", "status": "PENDING"}
]"#;

fn unireport(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("unireport").unwrap();
    cmd.env("UNIREPORT_DATA_DIR", data_dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_columns_lists_schema() {
    let dir = TempDir::new().unwrap();
    unireport(&dir)
        .args(["columns", "payments"])
        .assert()
        .success()
        .stdout(predicate::str::contains("studentName"))
        .stdout(predicate::str::contains("currency"));
}

#[test]
fn test_render_pdf_and_excel() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("payments.json");
    std::fs::write(&input, PAYMENTS).unwrap();

    let pdf = dir.path().join("out").join("payments.pdf");
    unireport(&dir)
        .arg("render")
        .arg("payments")
        .arg("--input")
        .arg(&input)
        .arg("--output")
        .arg(&pdf)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rows"));
    assert!(std::fs::read(&pdf).unwrap().starts_with(b"%PDF-"));

    unireport(&dir)
        .arg("render")
        .arg("payments")
        .arg("--input")
        .arg(&input)
        .args(["--format", "excel"])
        .assert()
        .success();
    let xlsx = dir.path().join("reports").join("payments.xlsx");
    assert!(std::fs::read(&xlsx).unwrap().starts_with(b"PK"));
}

#[test]
fn test_statement_requires_student() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("ledger.json");
    std::fs::write(&input, r#"[{"description": "Tuition", "amount": -3200}]"#).unwrap();

    unireport(&dir)
        .arg("render")
        .arg("statement")
        .arg("--input")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("student's name"));

    unireport(&dir)
        .arg("render")
        .arg("statement")
        .arg("--input")
        .arg(&input)
        .args(["--student", "Ada Lovelace", "--format", "pdf"])
        .assert()
        .success();
    assert!(dir
        .path()
        .join("reports")
        .join("statement-ada-lovelace.pdf")
        .exists());
}

#[test]
fn test_preview_prints_formatted_rows() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("payments.json");
    std::fs::write(&input, PAYMENTS).unwrap();

    unireport(&dir)
        .arg("preview")
        .arg("payments")
        .arg("--input")
        .arg(&input)
        .args(["--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("$1250.50"))
        .stdout(predicate::str::contains("02/01/2024"))
        .stdout(predicate::str::contains("1 more rows"));
}

#[test]
fn test_table_renders_ad_hoc_columns() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("fees.csv");
    std::fs::write(&input, "item,amount\nLab fee,45\nParking,120.5\n").unwrap();

    let xlsx = dir.path().join("fees.xlsx");
    unireport(&dir)
        .arg("table")
        .arg("--input")
        .arg(&input)
        .args(["--title", "Fee Schedule"])
        .args(["--column", "item=Item", "--column", "amount:currency=Amount"])
        .args(["--format", "excel", "--output"])
        .arg(&xlsx)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 rows, 2 columns"));
    assert!(std::fs::read(&xlsx).unwrap().starts_with(b"PK"));

    unireport(&dir)
        .arg("table")
        .arg("--input")
        .arg(&input)
        .args(["--title", "Fee Schedule", "--column", "amount:money"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown column kind"));
}

#[test]
fn test_bad_input_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("courses.txt");
    std::fs::write(&input, "code\nCS101\n").unwrap();

    unireport(&dir)
        .arg("render")
        .arg("courses")
        .arg("--input")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Import error"));

    unireport(&dir)
        .args(["render", "courses", "--input", "x.json", "--format", "docx"])
        .assert()
        .failure();
}

#[test]
fn test_init_and_config() {
    let dir = TempDir::new().unwrap();
    unireport(&dir).arg("init").assert().success();
    assert!(dir.path().join("config.json").exists());

    unireport(&dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Currency symbol:  $"))
        .stdout(predicate::str::contains("Default format:   pdf"));
}
