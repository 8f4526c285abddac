//! View models for the tracker and statistics surfaces.
//!
//! Both projections are plain data built from an open [`Session`]; the TUI
//! screens and the CLI printers only format what they are handed here.

use rust_decimal::Decimal;

use crate::ledger::Session;
use crate::models::MonthKey;
use crate::stats::{self, CategoryStats};

/// Number of distinct chart colours before the palette repeats.
pub(crate) const PALETTE_SIZE: usize = 12;

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExpenseLine {
    pub(crate) id: String,
    pub(crate) category: String,
    pub(crate) amount: Decimal,
    pub(crate) details: String,
    pub(crate) date_label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SummaryView {
    pub(crate) month: MonthKey,
    pub(crate) month_label: String,
    pub(crate) starting_balance: Decimal,
    pub(crate) total: Decimal,
    pub(crate) balance: Decimal,
    /// Insertion order.
    pub(crate) expenses: Vec<ExpenseLine>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DetailKind {
    WithoutDetails,
    WithDetails,
}

impl DetailKind {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::WithoutDetails => "no details",
            Self::WithDetails => "with details",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CategoryRow {
    pub(crate) category: String,
    pub(crate) kind: DetailKind,
    pub(crate) amount: Decimal,
    /// Only filled for `WithDetails` rows.
    pub(crate) examples: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ChartData {
    pub(crate) labels: Vec<String>,
    pub(crate) values: Vec<Decimal>,
    /// Palette index per label, `0..PALETTE_SIZE`.
    pub(crate) colors: Vec<usize>,
}

impl ChartData {
    pub(crate) fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct StatisticsView {
    pub(crate) starting_initial: Decimal,
    pub(crate) income_added: Decimal,
    pub(crate) total: Decimal,
    pub(crate) balance: Decimal,
    pub(crate) rows: Vec<CategoryRow>,
    pub(crate) chart: ChartData,
}

pub(crate) fn summary(session: &Session) -> SummaryView {
    let ledger = session.ledger();
    let totals = session.totals();
    SummaryView {
        month: session.month(),
        month_label: session.month().label(),
        starting_balance: ledger.starting_balance,
        total: totals.total,
        balance: totals.balance,
        expenses: ledger
            .expenses
            .iter()
            .map(|e| ExpenseLine {
                id: e.id.clone(),
                category: e.category_label().to_string(),
                amount: e.amount,
                details: e.detail_text().to_string(),
                date_label: e.date_label(),
            })
            .collect(),
    }
}

pub(crate) fn statistics(session: &Session) -> StatisticsView {
    let ledger = session.ledger();
    let totals = session.totals();
    let breakdown = stats::by_category(&ledger.expenses);

    let mut rows = Vec::new();
    let mut chart = ChartData::default();
    for (i, category) in breakdown.iter().enumerate() {
        rows.extend(category_rows(category));
        chart.labels.push(category.name.clone());
        chart.values.push(category.total);
        chart.colors.push(i % PALETTE_SIZE);
    }

    StatisticsView {
        starting_initial: ledger.starting_initial,
        income_added: session.income_added(),
        total: totals.total,
        balance: totals.balance,
        rows,
        chart,
    }
}

fn category_rows(category: &CategoryStats) -> Vec<CategoryRow> {
    let mut rows = Vec::with_capacity(2);
    if category.without_details > Decimal::ZERO {
        rows.push(CategoryRow {
            category: category.name.clone(),
            kind: DetailKind::WithoutDetails,
            amount: category.without_details,
            examples: Vec::new(),
        });
    }
    if category.with_details > Decimal::ZERO {
        rows.push(CategoryRow {
            category: category.name.clone(),
            kind: DetailKind::WithDetails,
            amount: category.with_details,
            examples: category.examples.clone(),
        });
    }
    rows
}
