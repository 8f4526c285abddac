use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme::TEXT_DIM)),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(theme::TEXT_DIM),
                ))
            }
        })
        .collect();
    titles.push(Line::from(Span::styled(
        format!("Current month: {}", app.summary.month_label),
        Style::default().fg(theme::YELLOW),
    )));

    let tabs = Tabs::new(titles)
        .select(Screen::all().iter().position(|s| *s == app.screen).unwrap_or(0))
        .highlight_style(Style::default())
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Tracker => super::screens::tracker::render(f, area, app),
        Screen::Statistics => super::screens::statistics::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = theme::mode_style(app.input_mode);

    let info = format!(
        " {} | {} | {} expenses",
        app.screen,
        app.summary.month,
        app.summary.expenses.len()
    );

    let right = match app.screen {
        Screen::Tracker => " :add | D delete | :clear | ? help ",
        Screen::Statistics => " :income | :balance | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.len() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// Centered yes/no box over whatever is on screen.
pub(crate) fn render_confirm_popup(f: &mut Frame, area: Rect, title: &str, message: &str) {
    let popup_width = 60u16.min(area.width.saturating_sub(4));
    let popup_height = 7u16.min(area.height);
    let popup_area = centered(area, popup_width, popup_height);

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::normal_style())),
        Line::from(""),
        Line::from(vec![
            Span::styled(" y ", theme::selected_style()),
            Span::styled(" yes   ", theme::dim_style()),
            Span::styled(" n ", Style::default().fg(theme::HEADER_BG).bg(theme::RED)),
            Span::styled(" no", theme::dim_style()),
        ]),
    ];

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(text)
        .centered()
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .title(Span::styled(
                    format!(" {title} "),
                    Style::default()
                        .fg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                ))
                .style(Style::default().bg(theme::HEADER_BG)),
        );
    f.render_widget(popup, popup_area);
}

/// Key bindings listed in the help overlay, grouped by section.
const KEY_HELP: &[(&str, &[(&str, &str)])] = &[
    (
        "Navigation",
        &[
            ("j/k, Up/Down", "Move cursor"),
            ("1-2, Tab", "Switch screens"),
            ("g/G", "Top/Bottom"),
            ("Ctrl-d/u", "Half page down/up"),
            ("Ctrl-q", "Quit"),
        ],
    ),
    (
        "Actions",
        &[
            (":", "Command mode"),
            ("D", "Delete selected expense (Tracker)"),
            ("y/n", "Answer a confirmation"),
            ("Esc", "Cancel / clear status"),
        ],
    ),
];

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {text}"),
        Style::default()
            .fg(theme::YELLOW)
            .add_modifier(Modifier::BOLD),
    ))
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut help_text = vec![
        Line::from(Span::styled(" MonthBudget Help ", theme::title_style().fg(theme::ACCENT))),
        Line::from(""),
    ];
    for (section, keys) in KEY_HELP {
        help_text.push(heading(section));
        help_text.extend(keys.iter().map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("  {key:<14}"), Style::default().fg(theme::ACCENT)),
                Span::styled(*what, theme::normal_style()),
            ])
        }));
        help_text.push(Line::from(""));
    }
    help_text.push(heading("Commands"));

    // one line per command, aliases folded into their long name
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 1 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<12} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    let popup_height = (help_text.len() as u16 + 2).min(area.height.saturating_sub(2));
    let popup_width = 72u16.min(area.width.saturating_sub(4));
    let popup_area = centered(area, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}
