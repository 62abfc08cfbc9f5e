use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::models::SalesTable;
use crate::report::ReportKind;
use crate::ui::app::App;
use crate::ui::render::{render, table_body_height};

pub(crate) fn as_tui(table: &SalesTable, config: &Config) -> Result<()> {
    let mut app = App::new(table, config.export_dir.clone())?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, table);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    table: &SalesTable,
) -> Result<()> {
    tracing::info!(records = table.len(), "dashboard started");
    while app.running {
        terminal.draw(|f| {
            app.visible_rows = table_body_height(f.area().height);
            render(f, app, table);
        })?;

        if let Event::Key(key) = event::read()? {
            // Windows reports releases too
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            handle_key(key, app, table);
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

pub(crate) fn handle_key(key: KeyEvent, app: &mut App, table: &SalesTable) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => {
            let result = app.next_category(table);
            report_selection(app, result);
        }
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => {
            let result = app.prev_category(table);
            report_selection(app, result);
        }
        KeyCode::Char('j') | KeyCode::Down => app.row_down(table),
        KeyCode::Char('k') | KeyCode::Up => app.row_up(),
        KeyCode::Char('g') | KeyCode::Home => app.rows_top(),
        KeyCode::Char('G') | KeyCode::End => app.rows_bottom(table),
        KeyCode::Char('x') => app.export_or_report(ReportKind::Spreadsheet, table),
        KeyCode::Char('p') => app.export_or_report(ReportKind::Pdf, table),
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
}

fn report_selection(app: &mut App, result: Result<()>) {
    match result {
        Ok(()) => tracing::debug!(category = app.selected_category(), "category selected"),
        Err(e) => {
            tracing::warn!(error = %format!("{e:#}"), "chart update failed");
            app.set_status(format!("Chart update failed: {e:#}"));
        }
    }
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;
