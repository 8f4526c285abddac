use anyhow::Result;
use rust_decimal::Decimal;

use crate::db::LedgerStore;
use crate::models::MonthKey;
use crate::stats;

/// The yes/no decision point for carrying last month's balance over.
///
/// Implementations block until the user has answered. The amount is the
/// literal previous balance and may be negative.
pub(crate) trait RolloverPrompt {
    fn confirm_rollover(&mut self, previous_balance: Decimal) -> Result<bool>;
}

impl<F> RolloverPrompt for F
where
    F: FnMut(Decimal) -> bool,
{
    fn confirm_rollover(&mut self, previous_balance: Decimal) -> Result<bool> {
        Ok(self(previous_balance))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RolloverOutcome {
    /// Very first run of the application; rollover is never offered.
    FirstRun,
    /// The month already has a balance or was already asked about.
    AlreadyResolved,
    /// Previous month has neither expenses nor a recorded balance.
    NoPreviousData,
    Accepted { offered: Decimal, carried: Decimal },
    Declined { offered: Decimal },
}

/// Ask about rollover into `month` and apply the answer.
///
/// An unset previous balance counts as zero; a previous month with no
/// expenses and no balance is not offered at all. Either way `month` is
/// marked as asked, exactly once.
pub(crate) fn evaluate<S>(
    store: &mut S,
    month: MonthKey,
    prompt: &mut dyn RolloverPrompt,
) -> Result<RolloverOutcome>
where
    S: LedgerStore + ?Sized,
{
    let previous = month.previous();
    let prev_expenses = store.expenses(previous)?;
    let prev_start = store.starting_balance(previous)?;

    let outcome = if prev_expenses.is_empty() && prev_start.is_none() {
        RolloverOutcome::NoPreviousData
    } else {
        let offered = stats::totals(&prev_expenses, prev_start.unwrap_or(Decimal::ZERO)).balance;
        if prompt.confirm_rollover(offered)? {
            let carried = offered.max(Decimal::ZERO);
            store.set_starting_balance(month, carried)?;
            store.set_starting_initial(month, carried)?;
            RolloverOutcome::Accepted { offered, carried }
        } else {
            RolloverOutcome::Declined { offered }
        }
    };

    store.mark_rollover_asked(month)?;
    tracing::info!(%month, %previous, ?outcome, "rollover evaluated");
    Ok(outcome)
}
