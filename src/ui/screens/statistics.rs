use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use super::{render_card, titled_block};
use crate::report::DetailKind;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(6),    // Breakdown
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_category_rows(f, body[0], app);
    render_chart(f, body[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let view = &app.statistics;
    render_card(
        f,
        cards[0],
        "Initial balance",
        app.money(view.starting_initial),
        theme::ACCENT,
    );
    render_card(
        f,
        cards[1],
        "Income added",
        app.money(view.income_added),
        theme::GREEN,
    );
    render_card(f, cards[2], "Spent", app.money(view.total), theme::RED);
    render_card(
        f,
        cards[3],
        "Balance",
        app.money(view.balance),
        theme::balance_color(view.balance),
    );
}

fn render_category_rows(f: &mut Frame, area: Rect, app: &App) {
    let rows = &app.statistics.rows;
    let block = titled_block(" By category ".into());

    if rows.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No expenses to show for the current month.",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(app.category_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, row)| {
            let badge_style = match row.kind {
                DetailKind::WithoutDetails => theme::dim_style(),
                DetailKind::WithDetails => Style::default().fg(theme::YELLOW),
            };
            let mut spans = vec![
                Span::styled(
                    format!("{:<16}", truncate(&row.category, 16)),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("[{}] ", row.kind.label()), badge_style),
                Span::styled(app.money(row.amount), theme::expense_style()),
            ];
            if !row.examples.is_empty() {
                spans.push(Span::styled(
                    format!("  e.g. {}", row.examples.join(", ")),
                    theme::dim_style(),
                ));
            }

            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            ListItem::new(Line::from(spans)).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

fn render_chart(f: &mut Frame, area: Rect, app: &App) {
    let chart_data = &app.statistics.chart;
    let block = titled_block(" Expenses by category ".into());

    if chart_data.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No chart data for the current month.",
            theme::dim_style(),
        )))
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = chart_data
        .labels
        .iter()
        .zip(&chart_data.values)
        .zip(&chart_data.colors)
        .map(|((label, value), color)| {
            let color = theme::palette(*color);
            Bar::default()
                .value(value.round().to_u64().unwrap_or(0))
                .text_value(format!("{value:.0}"))
                .label(Line::from(truncate(label, 8)))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(8)
        .bar_gap(1)
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}
