//! Integration tests for the dedupe utility

use pdf_harvest::dedupe::{dedupe_folder, DedupeReport, DEFAULT_DUPES_DIR};
use pdf_harvest::digest::sha256_file;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, content: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn file_count(dir: &Path) -> usize {
    fs::read_dir(dir)
        .unwrap()
        .filter(|e| e.as_ref().unwrap().file_type().unwrap().is_file())
        .count()
}

#[test]
fn test_identical_pair_is_split() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("2023").join("order.pdf"), b"%PDF same bytes");
    write(&input.path().join("2024").join("order-copy.pdf"), b"%PDF same bytes");

    let report = dedupe_folder(input.path(), output.path(), DEFAULT_DUPES_DIR).unwrap();

    assert_eq!(
        report,
        DedupeReport {
            scanned: 2,
            unique: 1,
            duplicates: 1,
            skipped: 0,
        }
    );
    assert_eq!(file_count(output.path()), 1);
    assert_eq!(file_count(&output.path().join(DEFAULT_DUPES_DIR)), 1);
    assert!(output.path().join("order.pdf").exists());
    assert!(output.path().join("DUPES").join("order-copy.pdf").exists());
}

#[test]
fn test_all_distinct_leaves_dupes_empty() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    for i in 0..5 {
        write(
            &input.path().join(format!("doc{}.pdf", i)),
            format!("%PDF {}", i).as_bytes(),
        );
    }

    let report = dedupe_folder(input.path(), output.path(), DEFAULT_DUPES_DIR).unwrap();

    assert_eq!(report.unique, 5);
    assert_eq!(report.duplicates, 0);
    assert_eq!(file_count(&output.path().join(DEFAULT_DUPES_DIR)), 0);
}

#[test]
fn test_copies_preserve_content() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let source = input.path().join("a.pdf");
    write(&source, b"%PDF content");

    dedupe_folder(input.path(), output.path(), "dupes").unwrap();

    assert_eq!(
        sha256_file(&source).unwrap(),
        sha256_file(&output.path().join("a.pdf")).unwrap()
    );
}

#[test]
fn test_three_copies_number_duplicates() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    write(&input.path().join("a").join("x.pdf"), b"same");
    write(&input.path().join("b").join("x.pdf"), b"same");
    write(&input.path().join("c").join("x.pdf"), b"same");

    let report = dedupe_folder(input.path(), output.path(), DEFAULT_DUPES_DIR).unwrap();

    assert_eq!(report.duplicates, 2);
    let dupes = output.path().join(DEFAULT_DUPES_DIR);
    assert!(dupes.join("x.pdf").exists());
    assert!(dupes.join("x (2).pdf").exists());
}
