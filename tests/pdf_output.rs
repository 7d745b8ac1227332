mod common;

use facture_pdf::{
    Error, StandardMetrics, convert_json_bytes_to_pdf, convert_json_to_pdf, layout, render,
    write_pdf,
};
use tempfile::TempDir;

use common::*;

#[test]
fn render_produces_a_pdf_with_standard_fonts() {
    let bytes = render(&sample_record()).expect("render");
    assert!(bytes.starts_with(b"%PDF-"));
    assert!(find(&bytes, b"/BaseFont /Helvetica-Bold", 0).is_some());
    assert!(find(&bytes, b"/WinAnsiEncoding", 0).is_some());
    assert!(find(&bytes, b"/FlateDecode", 0).is_some());
    assert!(find(&bytes, b"/Count 1", 0).is_some());
}

#[test]
fn metadata_carries_title_and_author() {
    let bytes = render(&sample_record()).expect("render");
    assert!(find(&bytes, b"(Facture_F-2024-001)", 0).is_some());
    assert!(find(&bytes, b"(Atelier Dupont SARL)", 0).is_some());
}

#[test]
fn page_count_matches_layout() {
    let _ = env_logger::try_init();
    let record = record_with_items(60);
    let doc = layout(&record, &StandardMetrics).expect("layout");
    let bytes = write_pdf(&doc).expect("write");
    let count = format!("/Count {}", doc.pages.len());
    assert!(find(&bytes, count.as_bytes(), 0).is_some());
    assert_eq!(count_media_boxes(&bytes), doc.pages.len());
}

#[test]
fn content_streams_hold_the_drawn_text() {
    let bytes = render(&sample_record()).expect("render");
    let streams = inflated_streams(&bytes);
    assert!(!streams.is_empty());
    let all = streams.join("\n");
    assert!(all.contains("(Page 1/1) Tj"));
    assert!(all.contains("(Taux de TVA) Tj"));
    assert!(all.contains("/F2"));
}

#[test]
fn logo_is_embedded_once_as_a_form() {
    let mut record = sample_record();
    record.company.logo = WIDE_LOGO.to_string();
    let bytes = render(&record).expect("render");
    assert_eq!(count(&bytes, b"/Subtype /Form"), 1);
    let streams = inflated_streams(&bytes);
    assert!(streams.iter().any(|s| s.contains("/Logo Do")));

    let without = render(&sample_record()).expect("render");
    assert_eq!(count(&without, b"/Subtype /Form"), 0);
}

#[test]
fn invalid_record_writes_nothing() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("facture.pdf");
    let json = sample_json_with("invoice_number", None);
    let err = convert_json_bytes_to_pdf(json.as_bytes(), &output).unwrap_err();
    assert!(matches!(err, Error::MissingField(_)));
    assert!(!output.exists());
}

#[test]
fn converts_a_json_file() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("facture.json");
    let output = dir.path().join("facture.pdf");
    std::fs::write(&input, sample_json()).expect("write input");

    convert_json_to_pdf(&input, &output).expect("convert");
    let bytes = std::fs::read(&output).expect("read output");
    assert!(bytes.starts_with(b"%PDF-"));
}

#[test]
fn missing_input_file_is_an_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let err = convert_json_to_pdf(&dir.path().join("absent.json"), &dir.path().join("out.pdf"))
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got {err:?}");
}

fn count_media_boxes(pdf: &[u8]) -> usize {
    count(pdf, b"/MediaBox")
}
