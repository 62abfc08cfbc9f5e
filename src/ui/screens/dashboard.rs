use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::charts::{bounds, day_label, Figures};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, short_amount, truncate};

/// The 2×2 chart grid.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = halves(rows[0]);
    let bottom = halves(rows[1]);

    let figures = &app.view.figures;
    render_sales_by_date(f, top[0], figures, &app.view.category);
    render_trend(f, top[1], figures, &app.view.category);
    render_distribution(f, bottom[0], figures);
    render_scatter(f, bottom[1], figures);
}

fn halves(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area)
}

fn chart_block(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn render_empty(f: &mut Frame, area: Rect, title: &str, message: String) {
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::dim_style())),
    ])
    .centered()
    .block(chart_block(title));
    f.render_widget(msg, area);
}

fn render_sales_by_date(f: &mut Frame, area: Rect, figures: &Figures, category: &str) {
    let title = "Sales by Date";
    if figures.sales_by_date.is_empty() {
        render_empty(f, area, title, format!("No sales for {category}"));
        return;
    }

    let bars: Vec<Bar> = figures
        .sales_by_date
        .iter()
        .map(|(date, amount)| {
            // "2024-02-01" → "02-01"
            let label = date.get(5..).unwrap_or(date.as_str());
            Bar::default()
                .value(amount.to_u64().unwrap_or(0))
                .text_value(short_amount(amount.to_f64().unwrap_or_default()))
                .label(Line::from(truncate(label, 7)))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(title))
        .data(BarGroup::default().bars(&bars))
        .bar_width(7)
        .bar_gap(1);
    f.render_widget(chart, area);
}

fn render_trend(f: &mut Frame, area: Rect, figures: &Figures, category: &str) {
    let title = "Sales Trend";
    if figures.trend.is_empty() {
        render_empty(f, area, title, format!("No dated sales for {category}"));
        return;
    }

    let x = bounds(figures.trend.iter().map(|p| p.0));
    let y = bounds(figures.trend.iter().map(|p| p.1));
    let line = Dataset::default()
        .name(category.to_string())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme::GREEN))
        .data(&figures.trend);
    let points = Dataset::default()
        .marker(Marker::Dot)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(theme::YELLOW))
        .data(&figures.trend);

    let chart = Chart::new(vec![line, points])
        .block(chart_block(title))
        .x_axis(date_axis(x))
        .y_axis(amount_axis(y));
    f.render_widget(chart, area);
}

/// Pie chart stand-in: one horizontal bar per category labelled with its share.
fn render_distribution(f: &mut Frame, area: Rect, figures: &Figures) {
    let title = "Sales Distribution by Category";
    if figures.category_share.is_empty() {
        render_empty(f, area, title, "No sales recorded".to_string());
        return;
    }

    let bars: Vec<Bar> = figures
        .category_share
        .iter()
        .enumerate()
        .map(|(i, share)| {
            let color = theme::SERIES[i % theme::SERIES.len()];
            Bar::default()
                .value(share.total.to_u64().unwrap_or(0))
                .text_value(format!(
                    "{} ({:.1}%)",
                    format_amount(share.total),
                    share.percent
                ))
                .label(Line::from(truncate(&share.category, 12)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(chart_block(title))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1);
    f.render_widget(chart, area);
}

fn render_scatter(f: &mut Frame, area: Rect, figures: &Figures) {
    let title = "Date vs Sales";
    if figures.scatter.is_empty() {
        render_empty(f, area, title, "No dated sales".to_string());
        return;
    }

    let x = bounds(figures.scatter.iter().map(|p| p.0));
    let y = bounds(figures.scatter.iter().map(|p| p.1));
    let points = Dataset::default()
        .marker(Marker::Braille)
        .graph_type(GraphType::Scatter)
        .style(Style::default().fg(theme::MAUVE))
        .data(&figures.scatter);

    let chart = Chart::new(vec![points])
        .block(chart_block(title))
        .x_axis(date_axis(x))
        .y_axis(amount_axis(y));
    f.render_widget(chart, area);
}

fn date_axis(x: [f64; 2]) -> Axis<'static> {
    Axis::default()
        .style(theme::dim_style())
        .bounds(x)
        .labels(vec![day_label(x[0]), day_label(x[1])])
}

fn amount_axis(y: [f64; 2]) -> Axis<'static> {
    Axis::default()
        .style(theme::dim_style())
        .bounds(y)
        .labels(vec![
            short_amount(y[0]),
            short_amount((y[0] + y[1]) / 2.0),
            short_amount(y[1]),
        ])
}
