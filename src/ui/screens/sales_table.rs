use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::models::SalesTable;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

/// The full data table, one row per record, independent of the selected category.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, table: &SalesTable) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Sales ({}) ", table.len()),
            theme::title_style(),
        ));

    if table.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No sales recorded", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Seed example data with `salesboard init`",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let header_cells = std::iter::once("#")
        .chain(table.fields().iter().copied())
        .map(|h| Cell::from(h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = table
        .iter()
        .enumerate()
        .skip(app.row_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, record)| {
            let style = if i == app.row_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let id = record.id.map(|id| id.to_string()).unwrap_or_default();
            Row::new(vec![
                Cell::from(id),
                Cell::from(truncate(&record.category, 24)),
                Cell::from(Span::styled(
                    format_amount(record.amount),
                    theme::amount_style(record.amount < Decimal::ZERO),
                )),
                Cell::from(record.date.clone()),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Min(16),
        Constraint::Length(16),
        Constraint::Length(12),
    ];

    f.render_widget(Table::new(rows, widths).header(header).block(block), area);
}
