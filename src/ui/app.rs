use crate::config::Config;
use crate::ledger::{RolloverOutcome, Session};
use crate::report::{self, StatisticsView, SummaryView};
use crate::ui::util::{clamp_cursor, format_amount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Tracker,
    Statistics,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Tracker, Self::Statistics]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tracker => write!(f, "Tracker"),
            Self::Statistics => write!(f, "Statistics"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PendingAction {
    DeleteExpense { id: String, label: String },
    ClearExpenses,
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    pub(crate) session: Session,
    pub(crate) currency: String,
    pub(crate) categories: Vec<String>,

    // Projections of the session, rebuilt after every mutation
    pub(crate) summary: SummaryView,
    pub(crate) statistics: StatisticsView,

    // Tracker
    pub(crate) expense_index: usize,
    pub(crate) expense_scroll: usize,

    // Statistics
    pub(crate) category_index: usize,
    pub(crate) category_scroll: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(session: Session, config: &Config) -> Self {
        let summary = report::summary(&session);
        let statistics = report::statistics(&session);
        let status_message = rollover_note(session.rollover(), &config.currency);
        Self {
            running: true,
            screen: Screen::Tracker,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message,
            show_help: false,

            session,
            currency: config.currency.clone(),
            categories: config.categories.clone(),

            summary,
            statistics,

            expense_index: 0,
            expense_scroll: 0,

            category_index: 0,
            category_scroll: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Rebuild both views from the session and keep cursors in range.
    pub(crate) fn refresh(&mut self) {
        self.summary = report::summary(&self.session);
        self.statistics = report::statistics(&self.session);
        clamp_cursor(
            &mut self.expense_index,
            &mut self.expense_scroll,
            self.summary.expenses.len(),
        );
        clamp_cursor(
            &mut self.category_index,
            &mut self.category_scroll,
            self.statistics.rows.len(),
        );
    }

    /// Table rows that fit once the header and borders are taken out.
    pub(crate) fn page(&self) -> usize {
        self.visible_rows.saturating_sub(3).max(1)
    }

    pub(crate) fn money(&self, amount: rust_decimal::Decimal) -> String {
        format_amount(amount, &self.currency)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    pub(crate) fn ask(&mut self, message: impl Into<String>, action: PendingAction) {
        self.confirm_message = message.into();
        self.pending_action = Some(action);
        self.input_mode = InputMode::Confirm;
    }
}

fn rollover_note(outcome: &RolloverOutcome, currency: &str) -> String {
    match outcome {
        RolloverOutcome::FirstRun => {
            "Welcome! Set this month's starting balance with :balance <amount>".into()
        }
        RolloverOutcome::Accepted { carried, .. } => {
            format!("Carried over {} from last month", format_amount(*carried, currency))
        }
        RolloverOutcome::Declined { .. } => {
            "Rollover declined. Set a starting balance with :balance <amount>".into()
        }
        RolloverOutcome::AlreadyResolved | RolloverOutcome::NoPreviousData => String::new(),
    }
}
