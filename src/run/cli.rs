use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::config::Config;
use crate::db::Database;
use crate::errors::LedgerError;
use crate::ledger::{RolloverPrompt, Session};
use crate::models::{amount, find_by_name, MonthKey};
use crate::report;
use crate::ui::util::{format_amount, shellexpand};

/// Yes/no questions on stdin, defaulting to "no".
///
/// A closed input is an error rather than an answer.
pub(crate) struct StdinPrompt<'a, R = io::StdinLock<'static>> {
    input: R,
    currency: &'a str,
}

impl<'a> StdinPrompt<'a> {
    pub(crate) fn new(currency: &'a str) -> Self {
        Self::with_input(io::stdin().lock(), currency)
    }
}

impl<'a, R: BufRead> StdinPrompt<'a, R> {
    pub(crate) fn with_input(input: R, currency: &'a str) -> Self {
        Self { input, currency }
    }

    pub(crate) fn ask(&mut self, question: &str) -> Result<bool> {
        print!("{question} [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        let read = self
            .input
            .read_line(&mut answer)
            .context("Failed to read answer from stdin")?;
        if read == 0 {
            println!();
            anyhow::bail!("No answer given: standard input is closed");
        }
        Ok(matches!(
            answer.trim().to_lowercase().as_str(),
            "y" | "yes"
        ))
    }
}

impl<R: BufRead> RolloverPrompt for StdinPrompt<'_, R> {
    fn confirm_rollover(&mut self, previous_balance: Decimal) -> Result<bool> {
        self.ask(&format!(
            "Carry over last month's remaining balance ({}) as this month's starting balance?",
            format_amount(previous_balance, self.currency)
        ))
    }
}

/// Commands that operate on the current month's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LedgerCommand {
    Summary,
    Stats,
    Add,
    Remove,
    Clear,
    Balance,
    Income,
    Export,
}

impl LedgerCommand {
    fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "summary" | "s" => Self::Summary,
            "stats" => Self::Stats,
            "add" => Self::Add,
            "remove" | "rm" => Self::Remove,
            "clear" => Self::Clear,
            "balance" => Self::Balance,
            "income" => Self::Income,
            "export" => Self::Export,
            _ => return None,
        })
    }
}

pub(crate) fn as_cli(args: &[String], db: &mut Database, config: &Config) -> Result<()> {
    match args[1].as_str() {
        "--help" | "-h" | "help" => {
            print_usage();
            return Ok(());
        }
        "--version" | "-V" | "version" => {
            println!("monthbudget {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        "categories" => {
            for name in &config.categories {
                println!("{name}");
            }
            return Ok(());
        }
        _ => {}
    }

    // Unknown commands must not open the month or trigger the rollover question.
    let Some(command) = LedgerCommand::parse(&args[1]) else {
        print_usage();
        anyhow::bail!("Unknown command: {}", args[1]);
    };

    let mut prompt = StdinPrompt::new(&config.currency);
    let mut session = Session::open(db, MonthKey::current(), &mut prompt)?;
    let rest = &args[2..];

    match command {
        LedgerCommand::Summary => cli_summary(&session, config),
        LedgerCommand::Stats => cli_stats(&session, config),
        LedgerCommand::Add => cli_add(rest, &mut session, db, config),
        LedgerCommand::Remove => cli_remove(rest, &mut session, db),
        LedgerCommand::Clear => cli_clear(rest, &mut session, db, &mut prompt),
        LedgerCommand::Balance => cli_balance(rest, &mut session, db, config),
        LedgerCommand::Income => cli_income(rest, &mut session, db, config),
        LedgerCommand::Export => cli_export(rest, &session, db),
    }
}

fn print_usage() {
    println!("MonthBudget - monthly budget tracker");
    println!();
    println!("Usage: monthbudget [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary                       Balance and expenses of the current month");
    println!("  stats                         Income added and spending by category");
    println!("  add <amount> <category> [details...]");
    println!("                                Record an expense");
    println!("  remove <id>                   Delete an expense");
    println!("  clear [--yes]                 Delete all expenses of the month");
    println!("  balance <amount>              Set the starting balance");
    println!("  income <amount>               Add income to the balance");
    println!("  export [path]                 Export the month's expenses to CSV");
    println!("  categories                    List expense categories");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
}

/// Print a rejected action and carry on; anything else is a real failure.
fn report_outcome(result: Result<String, LedgerError>) -> Result<()> {
    match result {
        Ok(msg) => {
            println!("{msg}");
            Ok(())
        }
        Err(e) if e.is_rejection() => {
            eprintln!("{e}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn cli_summary(session: &Session, config: &Config) -> Result<()> {
    let view = report::summary(session);
    let money = |d| format_amount(d, &config.currency);

    println!("Current month: {}", view.month_label);
    println!("{}", "─".repeat(40));
    println!("  Starting balance: {}", money(view.starting_balance));
    println!("  Spent:            {}", money(view.total));
    println!("  Balance:          {}", money(view.balance));
    println!();

    if view.expenses.is_empty() {
        println!("No expenses yet.");
        return Ok(());
    }
    for line in &view.expenses {
        let details = if line.details.is_empty() {
            String::new()
        } else {
            format!("  ({})", line.details)
        };
        println!(
            "  {}  {:<16} {:>16}{details}  [{}]",
            line.date_label,
            line.category,
            money(line.amount),
            line.id
        );
    }
    Ok(())
}

fn cli_stats(session: &Session, config: &Config) -> Result<()> {
    let view = report::statistics(session);
    let money = |d| format_amount(d, &config.currency);

    println!("Current month: {}", session.month().label());
    println!("{}", "─".repeat(40));
    println!("  Initial balance: {}", money(view.starting_initial));
    println!("  Income added:    {}", money(view.income_added));
    println!("  Spent:           {}", money(view.total));
    println!("  Balance:         {}", money(view.balance));
    println!();

    if view.rows.is_empty() {
        println!("No expenses to show for the current month.");
        return Ok(());
    }
    println!("By category:");
    for row in &view.rows {
        let examples = if row.examples.is_empty() {
            String::new()
        } else {
            format!("  e.g. {}", row.examples.join(", "))
        };
        println!(
            "  {:<16} {:<14} {:>16}{examples}",
            row.category,
            format!("[{}]", row.kind.label()),
            money(row.amount)
        );
    }
    println!();
    println!("Totals:");
    for (label, value) in view.chart.labels.iter().zip(&view.chart.values) {
        println!("  {label:<16} {:>16}", money(*value));
    }
    Ok(())
}

fn cli_add(
    args: &[String],
    session: &mut Session,
    db: &mut Database,
    config: &Config,
) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: monthbudget add <amount> <category> [details...]");
    }
    let amount = amount::normalize(Some(&args[0]));
    let details = args[2..].join(" ");

    let result = match find_by_name(&config.categories, &args[1]) {
        Some(category) => session
            .add_expense(db, category, amount, &details)
            .map(|e| {
                format!(
                    "Added {} {} [{}]",
                    e.category,
                    format_amount(e.amount, &config.currency),
                    e.id
                )
            }),
        None => Err(LedgerError::InvalidCategory(format!(
            "'{}' (use one of: {})",
            args[1],
            config.categories.join(", ")
        ))),
    };
    report_outcome(result)
}

fn cli_remove(args: &[String], session: &mut Session, db: &mut Database) -> Result<()> {
    let Some(id) = args.first() else {
        anyhow::bail!("Usage: monthbudget remove <id>");
    };
    let result = session.remove_expense(db, id).map(|removed| {
        if removed {
            format!("Removed {id}")
        } else {
            format!("No expense with id {id} this month")
        }
    });
    report_outcome(result)
}

fn cli_clear(
    args: &[String],
    session: &mut Session,
    db: &mut Database,
    prompt: &mut StdinPrompt<'_, impl BufRead>,
) -> Result<()> {
    let count = session.expenses().len();
    if count == 0 {
        println!("No expenses to clear");
        return Ok(());
    }
    let confirmed = args.iter().any(|a| a == "--yes" || a == "-y")
        || prompt.ask(&format!(
            "Delete all {count} expenses of {}?",
            session.month().label()
        ))?;
    if !confirmed {
        println!("Cancelled");
        return Ok(());
    }
    let result = session
        .clear_expenses(db)
        .map(|n| format!("Deleted {n} expenses"));
    report_outcome(result)
}

fn cli_balance(
    args: &[String],
    session: &mut Session,
    db: &mut Database,
    config: &Config,
) -> Result<()> {
    let Some(raw) = args.first() else {
        anyhow::bail!("Usage: monthbudget balance <amount>");
    };
    let result = session
        .set_balance(db, amount::normalize(Some(raw)))
        .map(|()| {
            format!(
                "Starting balance set to {}",
                format_amount(session.ledger().starting_balance, &config.currency)
            )
        });
    report_outcome(result)
}

fn cli_income(
    args: &[String],
    session: &mut Session,
    db: &mut Database,
    config: &Config,
) -> Result<()> {
    let Some(raw) = args.first() else {
        anyhow::bail!("Usage: monthbudget income <amount>");
    };
    let result = session
        .add_income(db, amount::normalize(Some(raw)))
        .map(|balance| {
            format!(
                "Income added. Balance is now {}",
                format_amount(balance, &config.currency)
            )
        });
    report_outcome(result)
}

fn cli_export(args: &[String], session: &Session, db: &Database) -> Result<()> {
    let month = session.month();
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/monthbudget-export-{month}.csv")
        });

    let count = db.export_to_csv(Path::new(&output_path), month)?;
    if count == 0 {
        println!("No expenses for {month}");
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}
