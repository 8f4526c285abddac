//! Per-month balance state machine.
//!
//! A [`Session`] is the in-memory view of the active month: it establishes the
//! month's starting balance on open (first run, rollover, or stored values)
//! and then applies user mutations, persisting each one through the
//! [`LedgerStore`] before updating its cached [`MonthLedger`].

mod rollover;

pub(crate) use rollover::{RolloverOutcome, RolloverPrompt};

use anyhow::Result;
use rust_decimal::Decimal;

use crate::db::LedgerStore;
use crate::errors::LedgerError;
use crate::models::amount::{self, within_limit};
use crate::models::{Expense, MonthKey};
use crate::stats::{self, Totals};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BalanceState {
    /// The application has never run against this store.
    Uninitialized,
    /// New month: no balance stored and rollover not yet asked.
    FreshMonth,
    /// Balance established and rollover resolved for the month.
    Active,
}

impl std::fmt::Display for BalanceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uninitialized => write!(f, "uninitialized"),
            Self::FreshMonth => write!(f, "fresh month"),
            Self::Active => write!(f, "active"),
        }
    }
}

/// Where `month` stands before any initialization runs.
pub(crate) fn classify<S>(store: &S, month: MonthKey) -> Result<BalanceState>
where
    S: LedgerStore + ?Sized,
{
    if !store.is_initialized()? {
        return Ok(BalanceState::Uninitialized);
    }
    if store.starting_balance(month)?.is_none() && !store.rollover_asked(month)? {
        return Ok(BalanceState::FreshMonth);
    }
    Ok(BalanceState::Active)
}

/// Cached copy of one month's persisted ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct MonthLedger {
    pub(crate) expenses: Vec<Expense>,
    pub(crate) starting_balance: Decimal,
    pub(crate) starting_initial: Decimal,
    pub(crate) rollover_asked: bool,
}

pub(crate) struct Session {
    month: MonthKey,
    ledger: MonthLedger,
    entered_from: BalanceState,
    rollover: RolloverOutcome,
}

impl Session {
    /// Bring `month` to the active state and load it.
    ///
    /// On the first run ever the month starts at zero and rollover is not
    /// offered. Otherwise a month with no stored balance that has not been
    /// asked yet goes through rollover evaluation, which may block on
    /// `prompt`.
    pub(crate) fn open<S>(
        store: &mut S,
        month: MonthKey,
        prompt: &mut dyn RolloverPrompt,
    ) -> Result<Self>
    where
        S: LedgerStore + ?Sized,
    {
        let entered_from = classify(store, month)?;
        let rollover = match entered_from {
            BalanceState::Uninitialized => {
                store.set_starting_balance(month, Decimal::ZERO)?;
                store.set_starting_initial(month, Decimal::ZERO)?;
                store.mark_initialized()?;
                tracing::info!(%month, "first run: starting balance set to zero");
                RolloverOutcome::FirstRun
            }
            BalanceState::FreshMonth => rollover::evaluate(store, month, prompt)?,
            BalanceState::Active => RolloverOutcome::AlreadyResolved,
        };

        let ledger = load(store, month)?;
        tracing::info!(
            %month,
            %entered_from,
            starting_balance = %ledger.starting_balance,
            starting_initial = %ledger.starting_initial,
            expenses = ledger.expenses.len(),
            rollover_asked = ledger.rollover_asked,
            "session opened"
        );

        Ok(Self {
            month,
            ledger,
            entered_from,
            rollover,
        })
    }

    pub(crate) fn month(&self) -> MonthKey {
        self.month
    }

    pub(crate) fn ledger(&self) -> &MonthLedger {
        &self.ledger
    }

    pub(crate) fn expenses(&self) -> &[Expense] {
        &self.ledger.expenses
    }

    /// State the month was in when the session was opened.
    #[cfg(test)]
    pub(crate) fn entered_from(&self) -> BalanceState {
        self.entered_from
    }

    pub(crate) fn rollover(&self) -> &RolloverOutcome {
        &self.rollover
    }

    pub(crate) fn totals(&self) -> Totals {
        stats::totals(&self.ledger.expenses, self.ledger.starting_balance)
    }

    pub(crate) fn income_added(&self) -> Decimal {
        stats::income_added(self.ledger.starting_balance, self.ledger.starting_initial)
    }

    // ── Mutations ─────────────────────────────────────────────

    /// Record a new expense. The category must be non-blank and the amount
    /// strictly positive and below [`amount::limit`].
    pub(crate) fn add_expense<S>(
        &mut self,
        store: &mut S,
        category: &str,
        amount: Option<Decimal>,
        details: &str,
    ) -> Result<&Expense, LedgerError>
    where
        S: LedgerStore + ?Sized,
    {
        let category = category.trim();
        if category.is_empty() {
            return Err(LedgerError::InvalidCategory(
                "a category is required".into(),
            ));
        }
        let amount = match amount {
            Some(a) if a > Decimal::ZERO && within_limit(a) => a,
            Some(a) if a > Decimal::ZERO => return Err(too_large("expense")),
            Some(a) => {
                return Err(LedgerError::InvalidAmount(format!(
                    "expense must be greater than zero (got {a})"
                )))
            }
            None => return Err(LedgerError::InvalidAmount("expense amount is missing".into())),
        };

        let expense = Expense::new(category.to_string(), amount, details.trim().to_string());
        let mut next = self.ledger.expenses.clone();
        next.push(expense);
        store.set_expenses(self.month, &next)?;
        self.ledger.expenses = next;

        let added = &self.ledger.expenses[self.ledger.expenses.len() - 1];
        tracing::info!(month = %self.month, id = %added.id, category, %amount, "expense added");
        Ok(added)
    }

    /// Remove the expense with `id`. Returns false (and changes nothing) when
    /// no such expense exists.
    pub(crate) fn remove_expense<S>(&mut self, store: &mut S, id: &str) -> Result<bool, LedgerError>
    where
        S: LedgerStore + ?Sized,
    {
        if !self.ledger.expenses.iter().any(|e| e.id == id) {
            tracing::debug!(month = %self.month, id, "remove: no such expense");
            return Ok(false);
        }
        let next: Vec<Expense> = self
            .ledger
            .expenses
            .iter()
            .filter(|e| e.id != id)
            .cloned()
            .collect();
        store.set_expenses(self.month, &next)?;
        self.ledger.expenses = next;
        tracing::info!(month = %self.month, id, "expense removed");
        Ok(true)
    }

    /// Remove every expense of the month. Returns how many were removed.
    pub(crate) fn clear_expenses<S>(&mut self, store: &mut S) -> Result<usize, LedgerError>
    where
        S: LedgerStore + ?Sized,
    {
        let removed = self.ledger.expenses.len();
        store.set_expenses(self.month, &[])?;
        self.ledger.expenses.clear();
        tracing::info!(month = %self.month, removed, "expenses cleared");
        Ok(removed)
    }

    /// Explicit override: sets both the balance and the reference value.
    pub(crate) fn set_balance<S>(
        &mut self,
        store: &mut S,
        amount: Option<Decimal>,
    ) -> Result<(), LedgerError>
    where
        S: LedgerStore + ?Sized,
    {
        let amount = match amount {
            Some(a) if a >= Decimal::ZERO && within_limit(a) => a,
            Some(a) if a >= Decimal::ZERO => return Err(too_large("balance")),
            Some(a) => {
                return Err(LedgerError::InvalidAmount(format!(
                    "balance cannot be negative (got {a})"
                )))
            }
            None => return Err(LedgerError::InvalidAmount("balance amount is missing".into())),
        };

        store.set_starting_balance(self.month, amount)?;
        store.set_starting_initial(self.month, amount)?;
        self.ledger.starting_balance = amount;
        self.ledger.starting_initial = amount;
        tracing::info!(month = %self.month, %amount, "starting balance set");
        Ok(())
    }

    /// Add income to the balance. The reference value is left alone so that
    /// the difference reports as income added. Returns the new balance.
    pub(crate) fn add_income<S>(
        &mut self,
        store: &mut S,
        amount: Option<Decimal>,
    ) -> Result<Decimal, LedgerError>
    where
        S: LedgerStore + ?Sized,
    {
        let amount = match amount {
            Some(a) if a > Decimal::ZERO => a,
            Some(a) => {
                return Err(LedgerError::InvalidAmount(format!(
                    "income must be greater than zero (got {a})"
                )))
            }
            None => return Err(LedgerError::InvalidAmount("income amount is missing".into())),
        };

        let balance = match self.ledger.starting_balance.checked_add(amount) {
            Some(b) if within_limit(b) => b,
            _ => return Err(too_large("balance")),
        };
        store.set_starting_balance(self.month, balance)?;
        self.ledger.starting_balance = balance;
        tracing::info!(month = %self.month, %amount, %balance, "income added");
        Ok(balance)
    }
}

fn too_large(what: &str) -> LedgerError {
    LedgerError::InvalidAmount(format!("{what} must be below {}", amount::limit()))
}

/// Read a month's ledger, taking the one-time reference snapshot if the month
/// has none yet.
fn load<S>(store: &mut S, month: MonthKey) -> Result<MonthLedger>
where
    S: LedgerStore + ?Sized,
{
    let starting_balance = store.starting_balance(month)?.unwrap_or(Decimal::ZERO);
    let starting_initial = match store.starting_initial(month)? {
        Some(value) => value,
        None => {
            store.set_starting_initial(month, starting_balance)?;
            tracing::debug!(%month, %starting_balance, "reference balance recorded");
            starting_balance
        }
    };

    Ok(MonthLedger {
        expenses: store.expenses(month)?,
        starting_balance,
        starting_initial,
        rollover_asked: store.rollover_asked(month)?,
    })
}
