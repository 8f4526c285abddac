use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use rust_decimal::Decimal;
use std::io;

use crate::ledger::RolloverPrompt;
use crate::ui::{render, util::format_amount};

/// Rollover question as a modal, shown before the main screen exists.
pub(crate) struct TuiPrompt<'a> {
    terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
    currency: &'a str,
}

impl<'a> TuiPrompt<'a> {
    pub(crate) fn new(
        terminal: &'a mut Terminal<CrosstermBackend<io::Stdout>>,
        currency: &'a str,
    ) -> Self {
        Self { terminal, currency }
    }
}

impl RolloverPrompt for TuiPrompt<'_> {
    fn confirm_rollover(&mut self, previous_balance: Decimal) -> Result<bool> {
        let message = format!(
            "Carry over last month's remaining balance ({}) as this month's starting balance?",
            format_amount(previous_balance, self.currency)
        );
        loop {
            self.terminal
                .draw(|f| render::render_confirm_popup(f, f.area(), "Rollover", &message))?;
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return Ok(true),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                    _ => {}
                }
            }
        }
    }
}
