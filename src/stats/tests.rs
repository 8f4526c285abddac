#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn expense(category: &str, amount: Decimal, details: &str) -> Expense {
    Expense::new(category.into(), amount, details.into())
}

fn names(breakdown: &CategoryBreakdown) -> Vec<&str> {
    breakdown.iter().map(|c| c.name.as_str()).collect()
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_totals_empty() {
    let t = totals(&[], dec!(250));
    assert_eq!(t.total, Decimal::ZERO);
    assert_eq!(t.balance, dec!(250));
}

#[test]
fn test_totals_sum_and_balance() {
    let list = vec![
        expense("Food", dec!(12.40), ""),
        expense("Rent", dec!(300), ""),
        expense("Food", dec!(0.10), "gum"),
    ];
    let t = totals(&list, dec!(1000));
    assert_eq!(t.total, dec!(312.50));
    assert_eq!(t.balance, dec!(687.50));
    assert_eq!(total(&list), t.total);
}

#[test]
fn test_balance_can_go_negative() {
    let t = totals(&[expense("Food", dec!(80), "")], dec!(50));
    assert_eq!(t.balance, dec!(-30));
}

#[test]
fn test_income_added_never_negative() {
    assert_eq!(income_added(dec!(500), dec!(300)), dec!(200));
    assert_eq!(income_added(dec!(300), dec!(300)), Decimal::ZERO);
    assert_eq!(income_added(dec!(100), dec!(300)), Decimal::ZERO);
}

// ── Category breakdown ────────────────────────────────────────

#[test]
fn test_by_category_empty() {
    let b = by_category(&[]);
    assert!(b.is_empty());
    assert_eq!(b.iter().count(), 0);
}

#[test]
fn test_by_category_splits_details() {
    let list = vec![
        expense("Food", dec!(10), ""),
        expense("Food", dec!(5), "bread"),
        expense("Rent", dec!(300), ""),
    ];
    let b = by_category(&list);

    assert_eq!(names(&b), vec!["Food", "Rent"]);
    let food = b.get("Food").unwrap();
    assert_eq!(food.total, dec!(15));
    assert_eq!(food.without_details, dec!(10));
    assert_eq!(food.with_details, dec!(5));
    assert_eq!(food.examples, vec!["bread".to_string()]);

    let rent = b.get("Rent").unwrap();
    assert_eq!(rent.total, dec!(300));
    assert_eq!(rent.with_details, Decimal::ZERO);
    assert!(rent.examples.is_empty());
}

#[test]
fn test_whitespace_details_count_as_none() {
    let b = by_category(&[expense("Food", dec!(4), "   ")]);
    let food = b.get("Food").unwrap();
    assert_eq!(food.without_details, dec!(4));
    assert!(food.examples.is_empty());
}

#[test]
fn test_blank_category_goes_to_unknown() {
    let list = vec![expense("", dec!(3), ""), expense("  ", dec!(2), "")];
    let b = by_category(&list);
    assert_eq!(names(&b), vec!["Unknown"]);
    assert_eq!(b.get("Unknown").unwrap().total, dec!(5));
}

#[test]
fn test_examples_distinct_capped_and_truncated() {
    let long = "a very long description that keeps on going";
    let list = vec![
        expense("Fun", dec!(1), "cinema"),
        expense("Fun", dec!(1), " cinema "),
        expense("Fun", dec!(1), long),
        expense("Fun", dec!(1), "bowling"),
        expense("Fun", dec!(1), "concert"),
    ];
    let fun = by_category(&list).get("Fun").unwrap().clone();

    assert_eq!(fun.with_details, dec!(5));
    assert_eq!(fun.examples.len(), MAX_EXAMPLES);
    assert_eq!(fun.examples[0], "cinema");
    assert_eq!(fun.examples[1], "a very long description that k");
    assert_eq!(fun.examples[1].chars().count(), EXAMPLE_CHARS);
    assert_eq!(fun.examples[2], "bowling");
}

#[test]
fn test_truncation_counts_characters_not_bytes() {
    let details = "ăîșțâ".repeat(10);
    let b = by_category(&[expense("Food", dec!(1), &details)]);
    let example = &b.get("Food").unwrap().examples[0];
    assert_eq!(example.chars().count(), EXAMPLE_CHARS);
}

#[test]
fn test_category_order_is_case_insensitive_and_stable() {
    let list = vec![
        expense("rent", dec!(1), ""),
        expense("Food", dec!(1), ""),
        expense("Rent", dec!(1), ""),
        expense("bills", dec!(1), ""),
    ];
    let b = by_category(&list);
    assert_eq!(names(&b), vec!["bills", "Food", "Rent", "rent"]);
}

#[test]
fn test_category_totals_sum_to_total() {
    let list = vec![
        expense("Food", dec!(10.25), "x"),
        expense("Rent", dec!(300), ""),
        expense("", dec!(4.75), ""),
        expense("Food", dec!(1), ""),
    ];
    let b = by_category(&list);
    let sum: Decimal = b.iter().map(|c| c.total).sum();
    assert_eq!(sum, total(&list));
    for c in b.iter() {
        assert_eq!(c.total, c.with_details + c.without_details);
    }
}

// ── Overflow ──────────────────────────────────────────────────

#[test]
fn test_totals_saturate_instead_of_overflowing() {
    let list = vec![
        expense("Food", Decimal::MAX, ""),
        expense("Food", Decimal::MAX, "big"),
    ];
    assert_eq!(total(&list), Decimal::MAX);

    let t = totals(&list, Decimal::MIN);
    assert_eq!(t.total, Decimal::MAX);
    assert_eq!(t.balance, Decimal::MIN);

    assert_eq!(income_added(Decimal::MAX, Decimal::MIN), Decimal::MAX);
}

#[test]
fn test_category_sums_saturate() {
    let list = vec![
        expense("Food", Decimal::MAX, ""),
        expense("Food", Decimal::MAX, ""),
        expense("Food", Decimal::MAX, "x"),
    ];
    let b = by_category(&list);
    let food = b.get("Food").unwrap();
    assert_eq!(food.total, Decimal::MAX);
    assert_eq!(food.without_details, Decimal::MAX);
    assert_eq!(food.with_details, Decimal::MAX);
}
