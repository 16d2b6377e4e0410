//! Integration tests for the text extraction utility

use pdf_harvest::extract::{extract_folder, ExtractReport, NO_TEXT_MARKER};
use std::fs;
use tempfile::TempDir;

/// Builds a valid one-page PDF with an empty content stream
fn blank_pdf() -> Vec<u8> {
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Resources << >> /Contents 4 0 R >>"
            .to_string(),
        "<< /Length 0 >>\nstream\n\nendstream".to_string(),
    ];

    let mut out = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::new();
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        out.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
    }

    let xref_offset = out.len();
    out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
    out.extend_from_slice(b"0000000000 65535 f \n");
    for offset in offsets {
        out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
    }
    out.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref_offset
        )
        .as_bytes(),
    );
    out
}

#[test]
fn test_blank_pdf_gets_no_text_marker() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("scan.pdf"), blank_pdf()).unwrap();

    let report = extract_folder(input.path(), output.path(), false).unwrap();

    assert_eq!(
        report,
        ExtractReport {
            processed: 1,
            with_text: 0,
            no_text: 1,
            failed: 0,
        }
    );
    let text = fs::read_to_string(output.path().join("scan.txt")).unwrap();
    assert!(text.starts_with(NO_TEXT_MARKER));
}

#[test]
fn test_broken_pdf_does_not_stop_batch() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("a_broken.pdf"), b"not a pdf at all").unwrap();
    fs::write(input.path().join("b_blank.pdf"), blank_pdf()).unwrap();

    let report = extract_folder(input.path(), output.path(), false).unwrap();

    assert_eq!(report.processed, 2);
    assert_eq!(report.failed, 1);

    let broken = fs::read_to_string(output.path().join("a_broken.txt")).unwrap();
    assert!(broken.starts_with("[ERROR] "));
    assert!(output.path().join("b_blank.txt").exists());
}

#[test]
fn test_recursive_flag_controls_subfolders() {
    let input = TempDir::new().unwrap();
    fs::create_dir_all(input.path().join("nested")).unwrap();
    fs::write(input.path().join("top.pdf"), blank_pdf()).unwrap();
    fs::write(input.path().join("nested").join("deep.pdf"), blank_pdf()).unwrap();

    let flat = TempDir::new().unwrap();
    let report = extract_folder(input.path(), flat.path(), false).unwrap();
    assert_eq!(report.processed, 1);
    assert!(!flat.path().join("deep.txt").exists());

    let recursive = TempDir::new().unwrap();
    let report = extract_folder(input.path(), recursive.path(), true).unwrap();
    assert_eq!(report.processed, 2);
    assert!(recursive.path().join("deep.txt").exists());
}

#[test]
fn test_missing_input_folder_is_an_error() {
    let output = TempDir::new().unwrap();
    let result = extract_folder(
        &output.path().join("does-not-exist"),
        output.path(),
        false,
    );
    assert!(result.is_err());
}
