//! Numeric input boundary.
//!
//! Every amount that reaches the ledger or the aggregation code comes through
//! here first: typed input, stored scalars and stored expense amounts alike.
//! Nothing in this module fails; unusable input becomes `None` or a fallback.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;

/// Parse an amount typed by a user or read back from storage.
///
/// Surrounding whitespace is ignored and a comma is accepted as the decimal
/// separator, so `" 12,50 "` and `"12.50"` are the same amount.
/// Anything other than digits, the separator and a sign is rejected, so
/// `"1_000"` and `"12abc"` are not amounts.
pub(crate) fn normalize(raw: Option<&str>) -> Option<Decimal> {
    let cleaned = raw?.trim().replacen(',', ".", 1);
    if cleaned.is_empty()
        || !cleaned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+'))
    {
        return None;
    }
    Decimal::from_str(&cleaned).ok()
}

/// Exclusive bound on the magnitude of any amount or balance the ledger
/// accepts.
pub(crate) fn limit() -> Decimal {
    Decimal::from(1_000_000_000_000_000_i64)
}

pub(crate) fn within_limit(value: Decimal) -> bool {
    value.abs() < limit()
}

pub(crate) fn normalize_or(raw: Option<&str>, fallback: Decimal) -> Decimal {
    normalize(raw).unwrap_or(fallback)
}

/// NaN, infinities and values outside the decimal range yield `fallback`.
pub(crate) fn from_f64(value: f64, fallback: Decimal) -> Decimal {
    if !value.is_finite() {
        return fallback;
    }
    Decimal::from_f64(value).unwrap_or(fallback)
}

/// Amount from an arbitrary JSON value (number, string, null, ...).
pub(crate) fn from_json(value: &Value, fallback: Decimal) -> Decimal {
    match value {
        Value::Number(n) => normalize(Some(&n.to_string()))
            .or_else(|| n.as_f64().map(|f| from_f64(f, fallback)))
            .unwrap_or(fallback),
        Value::String(s) => normalize_or(Some(s), fallback),
        _ => fallback,
    }
}
