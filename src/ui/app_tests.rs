#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::SalesRecord;

fn sample_table() -> SalesTable {
    let rows = [
        ("Electronica", dec!(5000), "2024-02-01"),
        ("Ropa", dec!(2000), "2024-02-02"),
        ("Alimentos", dec!(3000), "2024-02-03"),
        ("Electronica", dec!(6000), "2024-02-05"),
    ];
    SalesTable::new(
        rows.iter()
            .map(|(c, a, d)| SalesRecord::new(c.to_string(), *a, d.to_string()))
            .collect(),
    )
}

#[test]
fn test_new_selects_first_category() {
    let table = sample_table();
    let app = App::new(&table, PathBuf::from(".")).unwrap();
    assert!(app.running);
    assert_eq!(app.categories, vec!["Electronica", "Ropa", "Alimentos"]);
    assert_eq!(app.selected_category(), "Electronica");
    assert_eq!(app.view.filtered.len(), 2);
}

#[test]
fn test_new_on_empty_table_uses_placeholder() {
    let table = SalesTable::empty();
    let app = App::new(&table, PathBuf::from(".")).unwrap();
    assert_eq!(app.selected_category(), "N/A");
    assert!(app.view.filtered.is_empty());
}

#[test]
fn test_category_cycling_wraps() {
    let table = sample_table();
    let mut app = App::new(&table, PathBuf::from(".")).unwrap();

    app.next_category(&table).unwrap();
    assert_eq!(app.selected_category(), "Ropa");
    assert_eq!(app.view.category, "Ropa");
    assert_eq!(app.view.filtered.len(), 1);

    app.next_category(&table).unwrap();
    app.next_category(&table).unwrap();
    assert_eq!(app.selected_category(), "Electronica");

    app.prev_category(&table).unwrap();
    assert_eq!(app.selected_category(), "Alimentos");
    assert_eq!(app.view.figures.sales_by_date.len(), 1);
}

#[test]
fn test_select_category_out_of_range_is_ignored() {
    let table = sample_table();
    let mut app = App::new(&table, PathBuf::from(".")).unwrap();
    app.select_category(&table, 42).unwrap();
    assert_eq!(app.category_index, 0);
}

#[test]
fn test_row_navigation() {
    let table = sample_table();
    let mut app = App::new(&table, PathBuf::from(".")).unwrap();
    app.visible_rows = 2;

    app.row_down(&table);
    app.row_down(&table);
    assert_eq!((app.row_index, app.row_scroll), (2, 1));

    app.rows_bottom(&table);
    assert_eq!(app.row_index, 3);
    app.row_down(&table);
    assert_eq!(app.row_index, 3);

    app.row_up();
    assert_eq!(app.row_index, 2);
    app.rows_top();
    assert_eq!((app.row_index, app.row_scroll), (0, 0));
}

#[test]
fn test_export_writes_full_table() {
    let dir = tempfile::tempdir().unwrap();
    let table = sample_table();
    let mut app = App::new(&table, dir.path().to_path_buf()).unwrap();
    app.next_category(&table).unwrap();

    let path = app.export(ReportKind::Spreadsheet, &table).unwrap();
    assert_eq!(path, dir.path().join("Sales.xlsx"));
    assert!(path.exists());
    assert!(app.status_message.contains("Exported 4 records"));

    let path = app.export(ReportKind::Pdf, &table).unwrap();
    assert_eq!(path, dir.path().join("Sales.pdf"));
    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF-"));
}

#[test]
fn test_export_failure_goes_to_status() {
    let dir = tempfile::tempdir().unwrap();
    let table = sample_table();
    let mut app = App::new(&table, dir.path().join("missing")).unwrap();

    app.export_or_report(ReportKind::Pdf, &table);
    assert!(app.running);
    assert!(app.status_message.starts_with("Export failed"));
}

fn overflowing_day_table() -> SalesTable {
    let huge = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
    SalesTable::new(vec![
        SalesRecord::new("Ropa".into(), dec!(1), "2024-02-03".into()),
        SalesRecord::new("A".into(), -huge, "2024-02-02".into()),
        SalesRecord::new("A".into(), huge, "2024-02-01".into()),
        SalesRecord::new("A".into(), huge, "2024-02-01".into()),
    ])
}

#[test]
fn test_failed_selection_keeps_previous_view() {
    let table = overflowing_day_table();
    let mut app = App::new(&table, PathBuf::from(".")).unwrap();
    assert_eq!(app.selected_category(), "Ropa");

    assert!(app.next_category(&table).is_err());
    assert_eq!(app.category_index, 0);
    assert_eq!(app.view.category, "Ropa");
}

#[test]
fn test_new_fails_when_totals_overflow() {
    let huge = Decimal::from_i128_with_scale(50_000_000_000_000_000_000_000_000_000, 0);
    let table = SalesTable::new(vec![
        SalesRecord::new("A".into(), huge, "2024-01-01".into()),
        SalesRecord::new("A".into(), huge, "2024-01-02".into()),
    ]);
    assert!(App::new(&table, PathBuf::from(".")).is_err());
}
