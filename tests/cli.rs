mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn facture_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("facture-pdf"))
}

#[test]
fn test_help() {
    facture_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Render a JSON invoice record"));
}

#[test]
fn test_output_defaults_to_pdf_extension() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("F-2024-001.json");
    fs::write(&input, common::sample_json()).unwrap();

    facture_cmd()
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Converted"));

    let pdf = fs::read(temp_dir.path().join("F-2024-001.pdf")).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
}

#[test]
fn test_explicit_output_path() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.json");
    let output = temp_dir.path().join("out").join("facture.pdf");
    fs::create_dir_all(output.parent().unwrap()).unwrap();
    fs::write(&input, common::sample_json()).unwrap();

    facture_cmd().arg(&input).arg(&output).assert().success();
    assert!(output.exists());
}

#[test]
fn test_invalid_record_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.json");
    fs::write(&input, common::sample_json_with("company_name", None)).unwrap();

    facture_cmd()
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("company_name"));
    assert!(!temp_dir.path().join("input.pdf").exists());
}
