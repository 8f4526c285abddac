use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, InputMode, PendingAction, Screen};
use crate::db::Database;
use crate::errors::LedgerError;
use crate::models::{amount, find_by_name};
use crate::ui::util::{format_amount, shellexpand, truncate};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit", cmd_quit, r);
    register_command!("quit", "Quit", cmd_quit, r);
    register_command!("t", "Go to Tracker", cmd_tracker, r);
    register_command!("tracker", "Go to Tracker", cmd_tracker, r);
    register_command!("s", "Go to Statistics", cmd_stats, r);
    register_command!("stats", "Go to Statistics", cmd_stats, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "add",
        "Add expense (e.g. :add 12,50 Food | milk)",
        cmd_add,
        r
    );
    register_command!("a", "Add expense (e.g. :a 12,50 Food)", cmd_add, r);
    register_command!(
        "income",
        "Add income to the balance (e.g. :income 200)",
        cmd_income,
        r
    );
    register_command!(
        "balance",
        "Set the starting balance (e.g. :balance 1500)",
        cmd_balance,
        r
    );
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!("clear", "Delete all expenses of the month", cmd_clear, r);
    register_command!(
        "export",
        "Export the month to CSV (e.g. :export ~/budget.csv)",
        cmd_export,
        r
    );
    register_command!("categories", "List expense categories", cmd_categories, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Show a ledger outcome in the status bar. Rejections stay in the UI;
/// storage failures propagate.
fn finish(app: &mut App, result: Result<String, LedgerError>) -> anyhow::Result<()> {
    match result {
        Ok(msg) => {
            app.refresh();
            app.set_status(msg);
            Ok(())
        }
        Err(e) if e.is_rejection() => {
            app.set_status(e.to_string());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

// ── Confirmation ─────────────────────────────────────────────

pub(crate) fn confirm_pending(app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    let Some(action) = app.pending_action.take() else {
        return Ok(());
    };

    let result = match action {
        PendingAction::DeleteExpense { id, label } => app
            .session
            .remove_expense(db, &id)
            .map(|removed| {
                if removed {
                    format!("Deleted: {label}")
                } else {
                    "Expense no longer exists".to_string()
                }
            }),
        PendingAction::ClearExpenses => app
            .session
            .clear_expenses(db)
            .map(|n| format!("Deleted {n} expense{}", if n == 1 { "" } else { "s" })),
    };
    finish(app, result)
}

pub(crate) fn cancel_pending(app: &mut App) {
    app.pending_action = None;
    app.input_mode = InputMode::Normal;
    app.confirm_message.clear();
    app.set_status("Cancelled");
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_tracker(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Tracker;
    app.set_status(Screen::Tracker.to_string());
    Ok(())
}

fn cmd_stats(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.screen = Screen::Statistics;
    app.set_status(Screen::Statistics.to_string());
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_add(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    const USAGE: &str = "Usage: :add <amount> <category> [| details]";

    let (head, details) = match args.split_once('|') {
        Some((head, details)) => (head.trim(), details.trim()),
        None => (args, ""),
    };
    let mut parts = head.splitn(2, ' ');
    let amount_str = parts.next().unwrap_or("");
    let category_name = parts.next().unwrap_or("").trim();
    if amount_str.is_empty() || category_name.is_empty() {
        app.set_status(USAGE);
        return Ok(());
    }

    let result = match find_by_name(&app.categories, category_name) {
        Some(category) => app
            .session
            .add_expense(db, category, amount::normalize(Some(amount_str)), details)
            .map(|e| {
                format!(
                    "Added: {} {}",
                    e.category,
                    format_amount(e.amount, &app.currency)
                )
            }),
        None => Err(LedgerError::InvalidCategory(format!(
            "'{category_name}' (use one of: {})",
            app.categories.join(", ")
        ))),
    };
    if result.is_ok() {
        app.screen = Screen::Tracker;
        app.expense_index = app.session.expenses().len().saturating_sub(1);
        app.expense_scroll = app.expense_index.saturating_sub(app.page().saturating_sub(1));
    }
    finish(app, result)
}

fn cmd_income(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :income <amount>");
        return Ok(());
    }
    let amount = amount::normalize(Some(args));
    let result = app.session.add_income(db, amount).map(|balance| {
        format!(
            "Income added. Balance is now {}",
            format_amount(balance, &app.currency)
        )
    });
    finish(app, result)
}

fn cmd_balance(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :balance <amount>");
        return Ok(());
    }
    let amount = amount::normalize(Some(args));
    let result = app.session.set_balance(db, amount).map(|()| {
        format!(
            "Starting balance set to {}",
            format_amount(app.session.ledger().starting_balance, &app.currency)
        )
    });
    finish(app, result)
}

fn cmd_delete(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    if app.screen != Screen::Tracker {
        app.set_status("Navigate to Tracker first");
        return Ok(());
    }
    let Some(line) = app.summary.expenses.get(app.expense_index) else {
        app.set_status("No expenses yet.");
        return Ok(());
    };

    let label = format!(
        "{} {}",
        line.category,
        format_amount(line.amount, &app.currency)
    );
    let id = line.id.clone();
    app.ask(
        format!("Delete {}?", truncate(&label, 40)),
        PendingAction::DeleteExpense { id, label },
    );
    Ok(())
}

fn cmd_clear(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let count = app.session.expenses().len();
    if count == 0 {
        app.set_status("No expenses to clear");
        return Ok(());
    }
    app.ask(
        format!(
            "Delete all {count} expense{} of {}?",
            if count == 1 { "" } else { "s" },
            app.summary.month_label
        ),
        PendingAction::ClearExpenses,
    );
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let month = app.session.month();
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/monthbudget-export-{month}.csv")
    } else {
        shellexpand(args)
    };

    let count = db.export_to_csv(std::path::Path::new(&path), month)?;
    if count == 0 {
        app.set_status("No expenses to export");
    } else {
        app.set_status(format!("Exported {count} expenses to {path}"));
    }
    Ok(())
}

fn cmd_categories(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.set_status(format!("Categories: {}", app.categories.join(", ")));
    Ok(())
}
