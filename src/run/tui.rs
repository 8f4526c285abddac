use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::config::Config;
use crate::db::Database;
use crate::ledger::Session;
use crate::models::MonthKey;
use crate::ui::app::{App, InputMode, Screen};
use crate::ui::commands;
use crate::ui::prompt::TuiPrompt;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database, config: &Config) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = open_and_run(&mut terminal, db, config);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = ?e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn open_and_run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    db: &mut Database,
    config: &Config,
) -> Result<()> {
    let session = {
        let mut prompt = TuiPrompt::new(terminal, &config.currency);
        Session::open(db, MonthKey::current(), &mut prompt)?
    };
    let mut app = App::new(session, config);
    run_app(terminal, &mut app, db)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // tab bar, status bar, command bar and the summary cards
            let content_height = f.area().height.saturating_sub(8) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Confirm => handle_confirm_input(key, app, db)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, Screen::Tracker),
        KeyCode::Char('2') => switch_screen(app, Screen::Statistics),
        KeyCode::Tab | KeyCode::BackTab => {
            // two screens: forward and backward cycling land on the same one
            let next = match app.screen {
                Screen::Tracker => Screen::Statistics,
                Screen::Statistics => Screen::Tracker,
            };
            switch_screen(app, next);
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.page() / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.page() / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('D') if app.screen == Screen::Tracker => {
            commands::handle_command("delete", app, db)?;
        }
        KeyCode::Esc => app.set_status(""),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => commands::confirm_pending(app, db)?,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => commands::cancel_pending(app),
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, screen: Screen) {
    app.screen = screen;
    app.set_status(format!("{screen}"));
}

fn handle_move_down(app: &mut App) {
    let page = app.page();
    match app.screen {
        Screen::Tracker => scroll_down(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.summary.expenses.len(),
            page,
        ),
        Screen::Statistics => scroll_down(
            &mut app.category_index,
            &mut app.category_scroll,
            app.statistics.rows.len(),
            page,
        ),
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Tracker => scroll_up(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Statistics => scroll_up(&mut app.category_index, &mut app.category_scroll),
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Tracker => scroll_to_top(&mut app.expense_index, &mut app.expense_scroll),
        Screen::Statistics => scroll_to_top(&mut app.category_index, &mut app.category_scroll),
    }
}

fn handle_goto_bottom(app: &mut App) {
    let page = app.page();
    match app.screen {
        Screen::Tracker => scroll_to_bottom(
            &mut app.expense_index,
            &mut app.expense_scroll,
            app.summary.expenses.len(),
            page,
        ),
        Screen::Statistics => scroll_to_bottom(
            &mut app.category_index,
            &mut app.category_scroll,
            app.statistics.rows.len(),
            page,
        ),
    }
}
