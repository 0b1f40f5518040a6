//! Tests for the pdf-gridcat command-line tool

mod common;

use common::{write_cards, write_pdf};
use pdf_gridcat::pdf::count_pages;
use std::process::{Command, Output};
use tempfile::TempDir;

fn gridcat(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pdf-gridcat"))
        .args(args)
        .output()
        .expect("Failed to run pdf-gridcat")
}

#[test]
fn test_cli_writes_grid() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let inputs = write_cards(temp_dir.path(), 5, (100, 100));
    let output_path = temp_dir.path().join("sheet.pdf");

    let mut args = vec!["-c", "2", "-r", "2", "-o", output_path.to_str().unwrap(), "-i"];
    args.extend(inputs.iter().map(|p| p.to_str().unwrap()));

    let result = gridcat(&args);
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    assert_eq!(count_pages(&output_path).expect("count"), 2);
}

#[test]
fn test_cli_expands_globs_in_order() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    write_cards(temp_dir.path(), 3, (80, 120));
    let pattern = temp_dir.path().join("card-*.pdf");

    let result = gridcat(&["-c", "3", "--dry-run", "-i", pattern.to_str().unwrap()]);
    assert!(result.status.success());

    let stdout = String::from_utf8_lossy(&result.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "input\tpage\tcolumn\trow\tx\ty\tw\th\tpath");
    assert_eq!(lines.len(), 4, "stdout: {}", stdout);

    // input page column row x y w h, then the path
    assert!(lines[1].starts_with("0\t0\t0\t0\t0\t0\t80\t120\t"), "{}", lines[1]);
    assert!(lines[1].ends_with("card-00.pdf"));
    assert!(lines[3].starts_with("2\t0\t2\t0\t160\t0\t80\t120\t"), "{}", lines[3]);
    assert!(lines[3].ends_with("card-02.pdf"));
}

#[test]
fn test_cli_dry_run_warns_about_extra_pages() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let booklet = temp_dir.path().join("booklet.pdf");
    write_pdf(&booklet, &[(100, 100), (100, 100)]);

    let result = Command::new(env!("CARGO_BIN_EXE_pdf-gridcat"))
        .args(["--dry-run", "-i", booklet.to_str().unwrap()])
        .env("RUST_LOG", "warn")
        .output()
        .expect("Failed to run pdf-gridcat");

    assert!(result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("only the first is used"), "stderr: {}", stderr);
}

#[test]
fn test_cli_rejects_zero_columns() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let inputs = write_cards(temp_dir.path(), 1, (100, 100));
    let output_path = temp_dir.path().join("out.pdf");

    let result = gridcat(&[
        "-c",
        "0",
        "-o",
        output_path.to_str().unwrap(),
        "-i",
        inputs[0].to_str().unwrap(),
    ]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Invalid grid"), "stderr: {}", stderr);
    assert!(!output_path.exists());
}

#[test]
fn test_cli_rejects_grid_too_large() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let inputs = write_cards(temp_dir.path(), 1, (100, 100));
    let huge = usize::MAX.to_string();

    let result = gridcat(&[
        "-c",
        huge.as_str(),
        "-r",
        "2",
        "--dry-run",
        "-i",
        inputs[0].to_str().unwrap(),
    ]);

    assert_eq!(result.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Invalid grid"), "stderr: {}", stderr);
}

#[test]
fn test_cli_missing_input_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_path = temp_dir.path().join("out.pdf");

    let result = gridcat(&["-o", output_path.to_str().unwrap(), "-i", "nonexistent.pdf"]);

    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("not found"), "stderr: {}", stderr);
}

#[test]
fn test_cli_unmatched_glob_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let pattern = temp_dir.path().join("*.pdf");

    let result = gridcat(&["--dry-run", "-i", pattern.to_str().unwrap()]);
    assert!(!result.status.success());
}
