#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

use super::amount::{from_f64, from_json, normalize, normalize_or};
use super::*;

// ── amount ────────────────────────────────────────────────────

#[test]
fn test_normalize_dot_and_comma_agree() {
    for x in [dec!(0), dec!(12.5), dec!(1234.56), dec!(-7.01), dec!(0.001)] {
        let dotted = x.to_string();
        let comma = dotted.replace('.', ",");
        assert_eq!(normalize(Some(&dotted)), Some(x));
        assert_eq!(normalize(Some(&comma)), Some(x));
    }
}

#[test]
fn test_normalize_trims_whitespace() {
    assert_eq!(normalize(Some("  42,75 \t")), Some(dec!(42.75)));
}

#[test]
fn test_normalize_rejects_garbage() {
    assert_eq!(normalize(None), None);
    assert_eq!(normalize(Some("")), None);
    assert_eq!(normalize(Some("   ")), None);
    assert_eq!(normalize(Some("abc")), None);
    assert_eq!(normalize(Some("NaN")), None);
    assert_eq!(normalize(Some("Infinity")), None);
}

#[test]
fn test_normalize_rejects_separators_and_suffixes() {
    assert_eq!(normalize(Some("1_000")), None);
    assert_eq!(normalize(Some("12abc")), None);
    assert_eq!(normalize(Some("1e3")), None);
    assert_eq!(normalize(Some("1 000")), None);
    assert_eq!(normalize(Some("+5")), Some(dec!(5)));
    assert_eq!(normalize(Some("-0,5")), Some(dec!(-0.5)));
}

#[test]
fn test_amount_limit_is_exclusive() {
    use super::amount::{limit, within_limit};

    assert!(within_limit(limit() - dec!(0.01)));
    assert!(!within_limit(limit()));
    assert!(!within_limit(-limit()));
    assert!(!within_limit(Decimal::MAX));
}

#[test]
fn test_normalize_or_uses_fallback() {
    assert_eq!(normalize_or(Some("oops"), dec!(9)), dec!(9));
    assert_eq!(normalize_or(None, Decimal::ZERO), Decimal::ZERO);
    assert_eq!(normalize_or(Some("3"), dec!(9)), dec!(3));
}

#[test]
fn test_from_f64_non_finite() {
    assert_eq!(from_f64(f64::NAN, dec!(1)), dec!(1));
    assert_eq!(from_f64(f64::INFINITY, dec!(1)), dec!(1));
    assert_eq!(from_f64(f64::NEG_INFINITY, Decimal::ZERO), Decimal::ZERO);
    assert_eq!(from_f64(2.5, Decimal::ZERO), dec!(2.5));
}

#[test]
fn test_from_json_variants() {
    assert_eq!(from_json(&json!(10.5), Decimal::ZERO), dec!(10.5));
    assert_eq!(from_json(&json!(7), Decimal::ZERO), dec!(7));
    assert_eq!(from_json(&json!("3,25"), Decimal::ZERO), dec!(3.25));
    assert_eq!(from_json(&json!(null), dec!(1)), dec!(1));
    assert_eq!(from_json(&json!("n/a"), Decimal::ZERO), Decimal::ZERO);
    assert_eq!(from_json(&json!([1, 2]), Decimal::ZERO), Decimal::ZERO);
}

// ── MonthKey ──────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_month_key_format_zero_padded() {
    assert_eq!(MonthKey::containing(date(2024, 3, 9)).to_string(), "2024-03");
    assert_eq!(MonthKey::containing(date(2024, 11, 30)).to_string(), "2024-11");
}

#[test]
fn test_previous_month_year_rollover() {
    let jan = MonthKey::containing(date(2025, 1, 15));
    assert_eq!(jan.previous().to_string(), "2024-12");
}

#[test]
fn test_previous_month_day_overflow() {
    // 31 March minus one month must still be February.
    let march = MonthKey::containing(date(2024, 3, 31));
    assert_eq!(march.previous().to_string(), "2024-02");
    let may = MonthKey::containing(date(2023, 5, 31));
    assert_eq!(may.previous().to_string(), "2023-04");
}

#[test]
fn test_month_key_parse() {
    assert_eq!(MonthKey::parse("2024-01"), Some(MonthKey::containing(date(2024, 1, 1))));
    assert_eq!(MonthKey::parse("2024-1").map(|m| m.to_string()).as_deref(), Some("2024-01"));
    assert_eq!(MonthKey::parse("2024-13"), None);
    assert_eq!(MonthKey::parse("january"), None);
}

#[test]
fn test_month_key_ordering() {
    let a = MonthKey::parse("2024-12").unwrap();
    let b = MonthKey::parse("2025-01").unwrap();
    assert!(a < b);
    assert_eq!(b.previous(), a);
}

#[test]
fn test_month_label() {
    assert_eq!(MonthKey::parse("2026-10").unwrap().label(), "October 2026");
}

// ── Expense ───────────────────────────────────────────────────

#[test]
fn test_new_expense_has_id_and_date() {
    let a = Expense::new("Food".into(), dec!(3), String::new());
    let b = Expense::new("Food".into(), dec!(3), String::new());
    assert!(!a.id.is_empty());
    assert_ne!(a.id, b.id);
    assert!(chrono::DateTime::parse_from_rfc3339(&a.date).is_ok());
}

#[test]
fn test_expense_lenient_amounts() {
    let raw = r#"[
        {"id":"a","category":"Food","amount":10.5,"details":"milk","date":"2024-01-01T10:00:00Z"},
        {"id":"b","category":"Food","amount":"4,5","date":"2024-01-02T10:00:00Z"},
        {"id":"c","category":"Food","amount":null,"details":null},
        {"id":"d","category":"Food","amount":"lots"},
        {"id":"e","category":"Food"}
    ]"#;
    let parsed: Vec<Expense> = serde_json::from_str(raw).unwrap();
    let amounts: Vec<Decimal> = parsed.iter().map(|e| e.amount).collect();
    assert_eq!(amounts, vec![dec!(10.5), dec!(4.5), dec!(0), dec!(0), dec!(0)]);
    assert_eq!(parsed[2].details, "");
}

#[test]
fn test_expense_missing_category_is_unknown() {
    let parsed: Expense = serde_json::from_str(r#"{"id":"x","amount":1}"#).unwrap();
    assert_eq!(parsed.category_label(), "Unknown");
    let blank: Expense = serde_json::from_str(r#"{"id":"y","category":"  ","amount":1}"#).unwrap();
    assert_eq!(blank.category_label(), "Unknown");
}

#[test]
fn test_expense_details() {
    let mut e = Expense::new("Food".into(), dec!(1), "  bread  ".into());
    assert!(e.has_details());
    assert_eq!(e.detail_text(), "bread");
    e.details = "   ".into();
    assert!(!e.has_details());
}

#[test]
fn test_expense_round_trips_through_json() {
    let e = Expense::new("Rent".into(), dec!(300.00), String::new());
    let json = serde_json::to_string(&[e.clone()]).unwrap();
    let back: Vec<Expense> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, vec![e]);
}

#[test]
fn test_date_label_falls_back_to_raw() {
    let mut e = Expense::new("Rent".into(), dec!(1), String::new());
    e.date = "yesterday".into();
    assert_eq!(e.date_label(), "yesterday");
}

// ── categories ────────────────────────────────────────────────

#[test]
fn test_find_category_case_insensitive() {
    let cats = vec!["Food".to_string(), "Rent".to_string()];
    assert_eq!(find_by_name(&cats, "food"), Some("Food"));
    assert_eq!(find_by_name(&cats, " RENT "), Some("Rent"));
    assert_eq!(find_by_name(&cats, "Travel"), None);
    assert_eq!(find_by_name(&cats, ""), None);
}
