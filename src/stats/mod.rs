//! Totals and per-category breakdowns of a month's expenses.

use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::Expense;

/// Example detail strings kept per category.
pub(crate) const MAX_EXAMPLES: usize = 3;
/// Example detail strings are cut to this many characters.
pub(crate) const EXAMPLE_CHARS: usize = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Totals {
    pub(crate) total: Decimal,
    pub(crate) balance: Decimal,
}

/// Sums saturate at the `Decimal` range instead of overflowing.
pub(crate) fn total(expenses: &[Expense]) -> Decimal {
    expenses
        .iter()
        .fold(Decimal::ZERO, |acc, e| acc.saturating_add(e.amount))
}

pub(crate) fn totals(expenses: &[Expense], starting_balance: Decimal) -> Totals {
    let total = total(expenses);
    Totals {
        total,
        balance: starting_balance.saturating_sub(total),
    }
}

/// How far the balance has grown past its reference value. Never negative.
pub(crate) fn income_added(starting_balance: Decimal, starting_initial: Decimal) -> Decimal {
    starting_balance
        .saturating_sub(starting_initial)
        .max(Decimal::ZERO)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CategoryStats {
    pub(crate) name: String,
    pub(crate) total: Decimal,
    pub(crate) with_details: Decimal,
    pub(crate) without_details: Decimal,
    /// Distinct, trimmed, truncated detail strings in first-seen order.
    pub(crate) examples: Vec<String>,
}

impl CategoryStats {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    fn add(&mut self, expense: &Expense) {
        self.total = self.total.saturating_add(expense.amount);
        if !expense.has_details() {
            self.without_details = self.without_details.saturating_add(expense.amount);
            return;
        }
        self.with_details = self.with_details.saturating_add(expense.amount);
        if self.examples.len() < MAX_EXAMPLES {
            let example: String = expense.detail_text().chars().take(EXAMPLE_CHARS).collect();
            if !self.examples.contains(&example) {
                self.examples.push(example);
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct CategoryBreakdown {
    categories: Vec<CategoryStats>,
}

impl CategoryBreakdown {
    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &CategoryStats> {
        self.categories.iter()
    }

    #[cfg(test)]
    pub(crate) fn get(&self, name: &str) -> Option<&CategoryStats> {
        self.categories.iter().find(|c| c.name == name)
    }
}

/// Group expenses by category label, blank categories falling into "Unknown".
///
/// Categories come out ordered case-insensitively, with the raw label as the
/// tie-break so the order is total.
pub(crate) fn by_category(expenses: &[Expense]) -> CategoryBreakdown {
    let mut groups: BTreeMap<&str, CategoryStats> = BTreeMap::new();
    for expense in expenses {
        let name = expense.category_label();
        groups
            .entry(name)
            .or_insert_with(|| CategoryStats::new(name))
            .add(expense);
    }

    let mut categories: Vec<CategoryStats> = groups.into_values().collect();
    categories.sort_by(|a, b| compare_labels(&a.name, &b.name));
    CategoryBreakdown { categories }
}

fn compare_labels(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests;
