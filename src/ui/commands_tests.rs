#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::app::{App, InputMode, PendingAction, Screen};
use super::commands::*;
use crate::config::Config;
use crate::db::{Database, LedgerStore};
use crate::ledger::Session;
use crate::models::MonthKey;

fn setup() -> (App, Database) {
    let mut db = Database::open_in_memory().unwrap();
    let month = MonthKey::parse("2026-10").unwrap();
    let session = Session::open(&mut db, month, &mut |_: Decimal| false).unwrap();
    (App::new(session, &Config::default()), db)
}

fn run(input: &str, app: &mut App, db: &mut Database) {
    handle_command(input, app, db).unwrap();
}

#[test]
fn test_first_run_greets_in_status_bar() {
    let (app, _db) = setup();
    assert!(app.status_message.starts_with("Welcome!"));
    assert_eq!(app.screen, Screen::Tracker);
}

#[test]
fn test_add_expense_with_details() {
    let (mut app, mut db) = setup();
    run("add 12,50 food | milk and eggs", &mut app, &mut db);

    let stored = db.expenses(app.session.month()).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].category, "Food");
    assert_eq!(stored[0].amount, dec!(12.50));
    assert_eq!(stored[0].details, "milk and eggs");
    assert_eq!(app.status_message, "Added: Food 12.50 lei");
    assert_eq!(app.summary.expenses.len(), 1);
    assert_eq!(app.statistics.chart.labels, vec!["Food".to_string()]);
}

#[test]
fn test_add_rejects_unknown_category() {
    let (mut app, mut db) = setup();
    run("add 10 Yachts", &mut app, &mut db);
    assert!(app.status_message.starts_with("Invalid category: 'Yachts'"));
    assert!(db.expenses(app.session.month()).unwrap().is_empty());
}

#[test]
fn test_add_rejects_bad_amount() {
    let (mut app, mut db) = setup();
    for input in ["add abc Food", "add 0 Food", "add -4 Food"] {
        run(input, &mut app, &mut db);
        assert!(app.status_message.starts_with("Invalid amount"), "{input}");
    }
    assert!(app.session.expenses().is_empty());
}

#[test]
fn test_add_without_category_shows_usage() {
    let (mut app, mut db) = setup();
    run("add 10", &mut app, &mut db);
    assert!(app.status_message.starts_with("Usage: :add"));
}

#[test]
fn test_balance_and_income() {
    let (mut app, mut db) = setup();
    run("balance 300", &mut app, &mut db);
    assert_eq!(app.status_message, "Starting balance set to 300.00 lei");

    run("income 200", &mut app, &mut db);
    assert_eq!(app.status_message, "Income added. Balance is now 500.00 lei");
    assert_eq!(app.statistics.starting_initial, dec!(300));
    assert_eq!(app.statistics.income_added, dec!(200));
    assert_eq!(app.summary.balance, dec!(500));
}

#[test]
fn test_balance_rejects_negative() {
    let (mut app, mut db) = setup();
    run("balance -5", &mut app, &mut db);
    assert!(app.status_message.starts_with("Invalid amount"));
    assert_eq!(app.session.ledger().starting_balance, Decimal::ZERO);
}

#[test]
fn test_delete_asks_then_removes() {
    let (mut app, mut db) = setup();
    run("add 10 Food", &mut app, &mut db);
    run("add 20 Rent", &mut app, &mut db);
    app.expense_index = 0;

    run("delete", &mut app, &mut db);
    assert_eq!(app.input_mode, InputMode::Confirm);
    assert!(matches!(
        app.pending_action,
        Some(PendingAction::DeleteExpense { .. })
    ));
    assert_eq!(app.session.expenses().len(), 2);

    confirm_pending(&mut app, &mut db).unwrap();

    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "Deleted: Food 10.00 lei");
    let left = db.expenses(app.session.month()).unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].category, "Rent");
}

#[test]
fn test_delete_with_no_expenses() {
    let (mut app, mut db) = setup();
    run("delete", &mut app, &mut db);
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.status_message, "No expenses yet.");
}

#[test]
fn test_clear_can_be_cancelled() {
    let (mut app, mut db) = setup();
    run("add 10 Food", &mut app, &mut db);

    run("clear", &mut app, &mut db);
    assert_eq!(app.pending_action, Some(PendingAction::ClearExpenses));
    assert_eq!(app.confirm_message, "Delete all 1 expense of October 2026?");

    cancel_pending(&mut app);
    assert_eq!(app.pending_action, None);
    assert_eq!(app.session.expenses().len(), 1);
}

#[test]
fn test_clear_confirmed() {
    let (mut app, mut db) = setup();
    run("add 10 Food", &mut app, &mut db);
    run("add 5 Other", &mut app, &mut db);
    run("clear", &mut app, &mut db);
    confirm_pending(&mut app, &mut db).unwrap();

    assert_eq!(app.status_message, "Deleted 2 expenses");
    assert!(app.summary.expenses.is_empty());
    assert!(db.expenses(app.session.month()).unwrap().is_empty());
}

#[test]
fn test_screen_commands() {
    let (mut app, mut db) = setup();
    run("stats", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Statistics);
    run("t", &mut app, &mut db);
    assert_eq!(app.screen, Screen::Tracker);
    run("help", &mut app, &mut db);
    assert!(app.show_help);
    run("q", &mut app, &mut db);
    assert!(!app.running);
}

#[test]
fn test_unknown_command_suggests() {
    let (mut app, mut db) = setup();
    run("incme 5", &mut app, &mut db);
    assert_eq!(
        app.status_message,
        "Unknown command: :incme. Did you mean :income?"
    );
}

#[test]
fn test_export_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("month.csv");
    let (mut app, mut db) = setup();

    run(&format!("export {}", out.display()), &mut app, &mut db);
    assert_eq!(app.status_message, "No expenses to export");
    assert!(!out.exists());

    run("add 3 Food", &mut app, &mut db);
    run(&format!("export {}", out.display()), &mut app, &mut db);
    assert!(app.status_message.starts_with("Exported 1 expenses"));
    assert!(out.exists());
}
