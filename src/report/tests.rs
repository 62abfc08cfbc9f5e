#![allow(clippy::unwrap_used, clippy::panic)]

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use pdf_writer::Ref;
use rust_xlsxwriter::ExcelDateTime;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::io::Cursor;

use super::*;
use crate::models::SalesRecord;

fn rec(category: &str, amount: Decimal, date: &str) -> SalesRecord {
    SalesRecord::new(category.into(), amount, date.into())
}

fn sample_table() -> SalesTable {
    SalesTable::new(vec![
        rec("Electronica", dec!(5000), "2024-02-01"),
        rec("Ropa", dec!(2000.5), "2024-02-02"),
        rec("Alimentos", dec!(3000), "2024-02-03"),
        rec("Juguetes", dec!(-15.25), "2024-02-04"),
    ])
}

fn numbered_table(n: usize) -> SalesTable {
    SalesTable::new(
        (0..n)
            .map(|i| rec("Ropa", Decimal::from(i as i64 * 10), "2024-02-02"))
            .collect(),
    )
}

fn read_back(bytes: Vec<u8>) -> Vec<Vec<Data>> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec![SHEET_NAME.to_string()]);
    let range = workbook.worksheet_range(SHEET_NAME).unwrap();
    range.rows().map(|r| r.to_vec()).collect()
}

fn as_string(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => panic!("expected string cell, got {other:?}"),
    }
}

fn as_decimal(cell: &Data) -> Decimal {
    match cell {
        Data::Float(f) => Decimal::from_f64(*f).unwrap(),
        Data::Int(i) => Decimal::from(*i),
        other => panic!("expected number cell, got {other:?}"),
    }
}

fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

// ── Spreadsheet ───────────────────────────────────────────────

#[test]
fn test_spreadsheet_roundtrip() {
    let table = sample_table();
    let rows = read_back(generate_spreadsheet(&table).unwrap());

    assert_eq!(rows.len(), table.len() + 1);
    let header: Vec<String> = rows[0].iter().map(as_string).collect();
    assert_eq!(header, vec!["category", "amount", "date"]);

    let parsed: Vec<SalesRecord> = rows[1..]
        .iter()
        .map(|r| SalesRecord::new(as_string(&r[0]), as_decimal(&r[1]), as_string(&r[2])))
        .collect();
    assert_eq!(parsed.as_slice(), table.records());
}

#[test]
fn test_spreadsheet_empty_table_is_header_only() {
    let rows = read_back(generate_spreadsheet(&SalesTable::empty()).unwrap());
    assert_eq!(rows.len(), 1);
    let header: Vec<String> = rows[0].iter().map(as_string).collect();
    assert_eq!(header, vec!["category", "amount", "date"]);
}

#[test]
fn test_spreadsheet_is_deterministic_for_fixed_creation_time() {
    let created = ExcelDateTime::from_ymd(2024, 2, 1).unwrap();
    let table = sample_table();
    let first = spreadsheet::generate_spreadsheet_at(&table, &created).unwrap();
    let second = spreadsheet::generate_spreadsheet_at(&table, &created).unwrap();
    assert_eq!(first, second);

    let other = spreadsheet::generate_spreadsheet_at(&numbered_table(3), &created).unwrap();
    assert_ne!(first, other);
}

#[test]
fn test_spreadsheet_creation_time_is_only_difference() {
    let table = sample_table();
    let early = ExcelDateTime::from_ymd(2024, 2, 1).unwrap();
    let late = ExcelDateTime::from_ymd(2030, 12, 31).unwrap();
    let a = spreadsheet::generate_spreadsheet_at(&table, &early).unwrap();
    let b = spreadsheet::generate_spreadsheet_at(&table, &late).unwrap();
    assert_eq!(read_back(a), read_back(b));
}

#[test]
fn test_spreadsheet_is_zip_container() {
    let bytes = generate_spreadsheet(&sample_table()).unwrap();
    assert!(bytes.starts_with(b"PK"));
}

#[test]
fn test_page_refs_follow_fixed_objects() {
    assert_eq!(pdf::page_ref(0, 0).unwrap(), Ref::new(4));
    assert_eq!(pdf::page_ref(0, 1).unwrap(), Ref::new(5));
    assert_eq!(pdf::page_ref(3, 1).unwrap(), Ref::new(11));
}

#[test]
fn test_page_ref_out_of_range_is_error() {
    assert!(pdf::page_ref(usize::MAX, 0).is_err());
    assert!(pdf::page_ref(i32::MAX as usize / 2, 1).is_err());
}

// ── PDF layout ────────────────────────────────────────────────

#[test]
fn test_layout_empty_table_is_title_only() {
    let pages = layout_pages(&SalesTable::empty());
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].lines.len(), 1);
    assert_eq!(pages[0].lines[0].text, REPORT_TITLE);
    assert_eq!(pages[0].lines[0].y, 750.0);
}

#[test]
fn test_layout_lines_step_down_from_title() {
    let pages = layout_pages(&sample_table());
    assert_eq!(pages.len(), 1);
    let ys: Vec<f32> = pages[0].lines.iter().map(|l| l.y).collect();
    assert_eq!(ys, vec![750.0, 730.0, 710.0, 690.0, 670.0]);
    assert_eq!(pages[0].lines[1].text, "Electronica - 5000 - 2024-02-01");
    assert_eq!(pages[0].lines[2].text, "Ropa - 2000.5 - 2024-02-02");
}

#[test]
fn test_layout_paginates_at_bottom_margin() {
    // First page fits records at y = 730..=50, i.e. 35 of them
    let pages = layout_pages(&numbered_table(35));
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].lines.last().unwrap().y, 50.0);

    let pages = layout_pages(&numbered_table(36));
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].lines.len(), 1);
    assert_eq!(pages[1].lines[0].y, 750.0);
    assert_ne!(pages[1].lines[0].text, REPORT_TITLE);
}

#[test]
fn test_layout_keeps_every_record_once() {
    let table = numbered_table(120);
    let pages = layout_pages(&table);
    let record_lines: usize = pages.iter().map(|p| p.lines.len()).sum::<usize>() - 1;
    assert_eq!(record_lines, 120);
    for page in &pages {
        assert!(page.lines.iter().all(|l| l.y >= 50.0 && l.y <= 750.0));
    }
}

// ── PDF bytes ─────────────────────────────────────────────────

#[test]
fn test_pdf_empty_table_has_title() {
    let bytes = generate_pdf(&SalesTable::empty()).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    assert_eq!(count_occurrences(&bytes, b"(Sales Report)"), 1);
}

#[test]
fn test_pdf_contains_record_lines() {
    let bytes = generate_pdf(&sample_table()).unwrap();
    assert_eq!(
        count_occurrences(&bytes, b"(Electronica - 5000 - 2024-02-01)"),
        1
    );
    assert_eq!(count_occurrences(&bytes, b"(Juguetes - -15.25 - 2024-02-04)"), 1);
}

#[test]
fn test_pdf_grows_monotonically() {
    let mut previous = 0;
    for n in 0..80 {
        let len = generate_pdf(&numbered_table(n)).unwrap().len();
        assert!(len >= previous, "{n} records: {len} < {previous}");
        previous = len;
    }
}

#[test]
fn test_pdf_title_only_on_first_page() {
    let table = numbered_table(80);
    assert_eq!(layout_pages(&table).len(), 3);
    let bytes = generate_pdf(&table).unwrap();
    assert_eq!(count_occurrences(&bytes, b"(Sales Report)"), 1);
    assert_eq!(count_occurrences(&bytes, b"(Ropa - 790 - 2024-02-02)"), 1);
}

#[test]
fn test_encode_win_ansi() {
    assert_eq!(pdf::encode_win_ansi("Ropa"), b"Ropa".to_vec());
    assert_eq!(pdf::encode_win_ansi("Electrónica"), b"Electr\xf3nica".to_vec());
    assert_eq!(pdf::encode_win_ansi("€ 5"), b"? 5".to_vec());
}

// ── ReportKind ────────────────────────────────────────────────

#[test]
fn test_report_kind_parse() {
    assert_eq!(ReportKind::parse("xlsx"), Some(ReportKind::Spreadsheet));
    assert_eq!(ReportKind::parse("Excel"), Some(ReportKind::Spreadsheet));
    assert_eq!(ReportKind::parse("PDF"), Some(ReportKind::Pdf));
    assert_eq!(ReportKind::parse("csv"), None);
}

#[test]
fn test_report_kind_file_name() {
    assert_eq!(ReportKind::Spreadsheet.file_name(), "Sales.xlsx");
    assert_eq!(ReportKind::Pdf.file_name(), "Sales.pdf");
}

#[test]
fn test_write_report_to_disk() {
    let dir = tempfile::tempdir().unwrap();
    let table = sample_table();
    for kind in [ReportKind::Spreadsheet, ReportKind::Pdf] {
        let path = dir.path().join(kind.file_name());
        let written = write_report(kind, &table, &path).unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len() as usize, written);
    }
}

#[test]
fn test_write_report_bad_directory_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("Sales.pdf");
    assert!(write_report(ReportKind::Pdf, &sample_table(), &path).is_err());
}
