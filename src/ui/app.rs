use anyhow::Result;
use std::path::PathBuf;

use crate::charts::DashboardView;
use crate::models::SalesTable;
use crate::report::{self, ReportKind};
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

/// Dashboard state. The sales table itself is owned by the caller and
/// passed into every handler that needs it.
pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) show_help: bool,
    pub(crate) status_message: String,

    // Category selector
    pub(crate) categories: Vec<String>,
    pub(crate) category_index: usize,
    pub(crate) view: DashboardView,

    // Data table
    pub(crate) row_index: usize,
    pub(crate) row_scroll: usize,

    pub(crate) export_dir: PathBuf,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(table: &SalesTable, export_dir: PathBuf) -> Result<Self> {
        let categories = table.distinct_categories();
        let view = DashboardView::build(table, &categories[0])?;
        Ok(Self {
            running: true,
            show_help: false,
            status_message: String::new(),
            categories,
            category_index: 0,
            view,
            row_index: 0,
            row_scroll: 0,
            export_dir,
            visible_rows: 10,
        })
    }

    pub(crate) fn selected_category(&self) -> &str {
        &self.categories[self.category_index]
    }

    pub(crate) fn next_category(&mut self, table: &SalesTable) -> Result<()> {
        let next = (self.category_index + 1) % self.categories.len();
        self.select_category(table, next)
    }

    pub(crate) fn prev_category(&mut self, table: &SalesTable) -> Result<()> {
        let prev = if self.category_index == 0 {
            self.categories.len() - 1
        } else {
            self.category_index - 1
        };
        self.select_category(table, prev)
    }

    /// Selector change handler: rebuild every chart for the chosen category.
    ///
    /// On error the previous selection and view stay in place.
    pub(crate) fn select_category(&mut self, table: &SalesTable, index: usize) -> Result<()> {
        if index >= self.categories.len() {
            return Ok(());
        }
        self.view = DashboardView::build(table, &self.categories[index])?;
        self.category_index = index;
        Ok(())
    }

    pub(crate) fn row_down(&mut self, table: &SalesTable) {
        scroll_down(
            &mut self.row_index,
            &mut self.row_scroll,
            table.len(),
            self.visible_rows,
        );
    }

    pub(crate) fn row_up(&mut self) {
        scroll_up(&mut self.row_index, &mut self.row_scroll);
    }

    pub(crate) fn rows_top(&mut self) {
        scroll_to_top(&mut self.row_index, &mut self.row_scroll);
    }

    pub(crate) fn rows_bottom(&mut self, table: &SalesTable) {
        scroll_to_bottom(
            &mut self.row_index,
            &mut self.row_scroll,
            table.len(),
            self.visible_rows,
        );
    }

    /// Export handler: always writes the full table, whatever the selection.
    pub(crate) fn export(&mut self, kind: ReportKind, table: &SalesTable) -> Result<PathBuf> {
        let path = self.export_dir.join(kind.file_name());
        let bytes = report::write_report(kind, table, &path)?;
        self.set_status(format!(
            "Exported {} records to {} ({bytes} bytes)",
            table.len(),
            path.display()
        ));
        Ok(path)
    }

    /// Like `export`, but failures land in the status bar instead of ending the session.
    pub(crate) fn export_or_report(&mut self, kind: ReportKind, table: &SalesTable) {
        if let Err(e) = self.export(kind, table) {
            tracing::warn!(error = %format!("{e:#}"), "export failed");
            self.set_status(format!("Export failed: {e:#}"));
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

#[cfg(test)]
#[path = "app_tests.rs"]
mod tests;
