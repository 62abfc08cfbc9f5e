use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::App;
use super::theme;
use crate::models::SalesTable;

pub(crate) const TITLE: &str = "Sales Dashboard";

/// Approximate number of data-table body rows for a terminal `total` rows high.
pub(crate) fn table_body_height(total: u16) -> usize {
    let main = total.saturating_sub(3);
    let table = main.saturating_sub((u32::from(main) * 55 / 100) as u16);
    table.saturating_sub(3).max(1) as usize
}

pub(crate) fn render(f: &mut Frame, app: &App, table: &SalesTable) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title + category selector
            Constraint::Min(10),   // Charts + data table
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Key hints / messages
        ])
        .split(f.area());

    render_selector(f, chunks[0], app);
    render_main(f, chunks[1], app, table);
    render_status_bar(f, chunks[2], app, table);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_selector(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = app
        .categories
        .iter()
        .map(|c| Line::from(Span::styled(c.clone(), theme::dim_style())))
        .collect();

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(TITLE.len() as u16 + 4), Constraint::Min(10)])
        .split(area);

    let title = Paragraph::new(Line::from(Span::styled(
        format!(" {TITLE} "),
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    )))
    .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(title, cols[0]);

    let tabs = Tabs::new(titles)
        .select(app.category_index)
        .highlight_style(
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(tabs, cols[1]);
}

fn render_main(f: &mut Frame, area: Rect, app: &App, table: &SalesTable) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    super::screens::dashboard::render(f, chunks[0], app);
    super::screens::sales_table::render(f, chunks[1], app, table);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App, table: &SalesTable) {
    let mode_label = " DASHBOARD ";
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(theme::ACCENT)
        .add_modifier(Modifier::BOLD);

    let info = format!(
        " {} | {} of {} records ",
        app.selected_category(),
        app.view.filtered.len(),
        table.len()
    );
    let right = " h/l category | x excel | p pdf | ? help ";

    let available = area.width as usize;
    let used = mode_label.len() + info.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(mode_label, mode_style),
        Span::styled(info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let content = if app.status_message.is_empty() {
        Line::from(Span::styled(
            " Press ? for help, q to quit",
            theme::dim_style(),
        ))
    } else {
        Line::from(Span::styled(
            format!(" {}", app.status_message),
            theme::command_bar_style(),
        ))
    };
    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };
    let entry = |text: &'static str| Line::from(Span::styled(text, theme::normal_style()));

    let help_text = vec![
        Line::from(Span::styled(
            format!(" {TITLE} Help "),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" Category"),
        entry("  h/l or Left/Right   Previous/next category"),
        entry("  Tab/Shift-Tab       Previous/next category"),
        Line::from(""),
        section(" Data table"),
        entry("  j/k or Up/Down      Move cursor"),
        entry("  g/G                 Top/Bottom"),
        Line::from(""),
        section(" Export (full table)"),
        entry("  x                   Excel (Sales.xlsx)"),
        entry("  p                   PDF (Sales.pdf)"),
        Line::from(""),
        entry("  q, Ctrl-q, Ctrl-c   Quit"),
        Line::from(""),
        Line::from(Span::styled(" Press any key to close ", theme::dim_style())),
    ];

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 56.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}
