use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use super::{render_card, titled_block};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::truncate;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(5),    // Expense table
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_expenses(f, chunks[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let view = &app.summary;
    render_card(
        f,
        cards[0],
        "Starting balance",
        app.money(view.starting_balance),
        theme::ACCENT,
    );
    render_card(f, cards[1], "Spent", app.money(view.total), theme::RED);
    render_card(
        f,
        cards[2],
        "Balance",
        app.money(view.balance),
        theme::balance_color(view.balance),
    );
}

fn render_expenses(f: &mut Frame, area: Rect, app: &App) {
    let expenses = &app.summary.expenses;
    if expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses yet.", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add <amount> <category>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(titled_block(" Expenses (0) ".into())),
            area,
        );
        return;
    }

    let header_cells = ["Date", "Category", "Amount", "Details"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, line)| {
            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", line.date_label)),
                Cell::from(truncate(&line.category, 18)),
                Cell::from(Span::styled(app.money(line.amount), theme::expense_style())),
                Cell::from(Span::styled(truncate(&line.details, 40), theme::dim_style())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(format!(" Expenses ({}) ", expenses.len())));

    f.render_widget(table, area);
}
