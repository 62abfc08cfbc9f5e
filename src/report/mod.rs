mod pdf;
mod spreadsheet;

use anyhow::{Context, Result};
use std::path::Path;

use crate::models::SalesTable;

pub(crate) use pdf::{generate_pdf, layout_pages};
pub(crate) use spreadsheet::generate_spreadsheet;

pub(crate) const SHEET_NAME: &str = "Sales";
pub(crate) const REPORT_TITLE: &str = "Sales Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReportKind {
    Spreadsheet,
    Pdf,
}

impl ReportKind {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Spreadsheet => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "xlsx" | "excel" | "spreadsheet" => Some(Self::Spreadsheet),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    /// Default download name, e.g. `Sales.xlsx`.
    pub(crate) fn file_name(&self) -> String {
        format!("{SHEET_NAME}.{}", self.as_str())
    }

    pub(crate) fn generate(&self, table: &SalesTable) -> Result<Vec<u8>> {
        match self {
            Self::Spreadsheet => generate_spreadsheet(table),
            Self::Pdf => generate_pdf(table),
        }
    }
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Render `table` as `kind` and write it to `path`. Returns the number of bytes written.
pub(crate) fn write_report(kind: ReportKind, table: &SalesTable, path: &Path) -> Result<usize> {
    let bytes = kind
        .generate(table)
        .with_context(|| format!("Failed to generate {kind} report"))?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("Failed to write report: {}", path.display()))?;
    tracing::info!(kind = %kind, bytes = bytes.len(), path = %path.display(), "wrote report");
    Ok(bytes.len())
}

#[cfg(test)]
mod tests;
