use anyhow::{Context, Result};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook};

use super::SHEET_NAME;
use crate::models::SalesTable;

/// Serialize every record into a single `Sales` worksheet, stamped with the current time.
pub(crate) fn generate_spreadsheet(table: &SalesTable) -> Result<Vec<u8>> {
    build_workbook(table, None)
}

/// Like `generate_spreadsheet`, with a fixed creation time. The output is then
/// a pure function of `table` and `created`.
#[cfg(test)]
pub(crate) fn generate_spreadsheet_at(
    table: &SalesTable,
    created: &ExcelDateTime,
) -> Result<Vec<u8>> {
    build_workbook(table, Some(created))
}

/// Row 0 holds the field names; each following row is one record in table
/// order. Amounts are written as numbers, everything else as strings.
fn build_workbook(table: &SalesTable, created: Option<&ExcelDateTime>) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    if let Some(created) = created {
        workbook.set_properties(&DocProperties::new().set_creation_datetime(created));
    }
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in table.fields().iter().enumerate() {
        sheet.write_string(0, u16::try_from(col)?, *name)?;
    }

    for (i, record) in table.iter().enumerate() {
        let row = u32::try_from(i + 1)?;
        let amount = record
            .amount
            .to_f64()
            .with_context(|| format!("Amount {} has no numeric cell value", record.amount))?;
        sheet.write_string(row, 0, &record.category)?;
        sheet.write_number(row, 1, amount)?;
        sheet.write_string(row, 2, &record.date)?;
    }

    workbook
        .save_to_buffer()
        .context("Failed to serialize spreadsheet")
}
