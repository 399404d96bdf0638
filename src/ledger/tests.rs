#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn month(y: i32, m: u32) -> MonthKey {
    MonthKey::new(y, m).unwrap()
}

/// Two months of data: Jan (salary, rent), Feb (coffee).
fn setup_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    ledger
        .add_on(date(2024, 1, 5), "Salary", "1000", Kind::Income)
        .unwrap();
    ledger
        .add_on(date(2024, 1, 6), "Rent", "300", Kind::Expense)
        .unwrap();
    ledger
        .add_on(date(2024, 2, 1), "Coffee", "4.50", Kind::Expense)
        .unwrap();
    ledger
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_basic() {
    assert_eq!(parse_amount("100.50").unwrap(), dec!(100.50));
    assert_eq!(parse_amount("42").unwrap(), dec!(42));
}

#[test]
fn test_parse_amount_tolerates_dollar_and_spaces() {
    assert_eq!(parse_amount(" $12.34 ").unwrap(), dec!(12.34));
    assert_eq!(parse_amount("$ 7").unwrap(), dec!(7));
}

#[test]
fn test_parse_amount_scientific() {
    assert_eq!(parse_amount("1e3").unwrap(), dec!(1000));
}

#[test]
fn test_parse_amount_rejects_non_numeric() {
    assert_eq!(
        parse_amount("abc"),
        Err(LedgerError::InvalidAmount("abc".into()))
    );
    assert!(parse_amount("").is_err());
    assert!(parse_amount("   ").is_err());
    assert!(parse_amount("$").is_err());
}

#[test]
fn test_parse_amount_rejects_thousands_separator() {
    assert!(parse_amount("1,5").is_err());
    assert!(parse_amount("1,000").is_err());
    assert!(parse_amount("1_000").is_err());
    assert!(parse_amount("1_5").is_err());
}

#[test]
fn test_parse_amount_caps_magnitude() {
    assert_eq!(parse_amount("1000000000000000").unwrap(), Decimal::from(MAX_AMOUNT));
    assert_eq!(
        parse_amount("1000000000000000.01"),
        Err(LedgerError::AmountTooLarge("1000000000000000.01".into()))
    );
    assert!(matches!(
        parse_amount("79228162514264337593543950335"),
        Err(LedgerError::AmountTooLarge(_))
    ));
}

#[test]
fn test_parse_amount_rejects_zero_and_negative() {
    assert!(parse_amount("0").is_err());
    assert!(parse_amount("0.00").is_err());
    assert!(parse_amount("-5").is_err());
}

#[test]
fn test_invalid_amount_message() {
    let err = parse_amount("ten").unwrap_err();
    assert_eq!(err.to_string(), "Enter a valid number: 'ten'");
}

// ── add ───────────────────────────────────────────────────────

#[test]
fn test_salary_minus_rent() {
    let mut ledger = Ledger::new();
    ledger
        .add_on(date(2024, 3, 1), "Salary", "1000", Kind::Income)
        .unwrap();
    ledger
        .add_on(date(2024, 3, 2), "Rent", "300", Kind::Expense)
        .unwrap();
    assert_eq!(ledger.total_balance(), dec!(700));
}

#[test]
fn test_add_returns_recorded_transaction() {
    let mut ledger = Ledger::new();
    let txn = ledger
        .add_on(date(2024, 3, 1), "Lunch", "12.5", Kind::Expense)
        .unwrap()
        .clone();
    assert_eq!(txn.label, "Lunch");
    assert_eq!(txn.amount, dec!(12.5));
    assert_eq!(txn.kind, Kind::Expense);
    assert_eq!(ledger.transactions_for(month(2024, 3)), &[txn]);
}

#[test]
fn test_add_uses_today() {
    let mut ledger = Ledger::new();
    let before = chrono::Local::now().date_naive();
    let recorded = ledger.add("Gift", "20", Kind::Income).unwrap().date;
    let after = chrono::Local::now().date_naive();
    assert!(recorded == before || recorded == after);
    assert_eq!(ledger.months().next(), Some(MonthKey::of(recorded)));
}

#[test]
fn test_add_invalid_leaves_ledger_unchanged() {
    let mut ledger = setup_ledger();
    let snapshot = ledger.clone();
    let err = ledger
        .add_on(date(2024, 3, 1), "Oops", "twelve", Kind::Income)
        .unwrap_err();
    assert_eq!(err, LedgerError::InvalidAmount("twelve".into()));
    assert_eq!(ledger, snapshot);
    assert_eq!(ledger.total_balance(), dec!(695.50));
    assert!(!ledger.contains_month(month(2024, 3)));
}

#[test]
fn test_add_huge_amount_twice_is_rejected() {
    let mut ledger = setup_ledger();
    let before = ledger.clone();
    for _ in 0..2 {
        let err = ledger
            .add_on(date(2024, 3, 1), "Lottery", "79228162514264337593543950335", Kind::Income)
            .unwrap_err();
        assert!(matches!(err, LedgerError::AmountTooLarge(_)));
    }
    assert_eq!(ledger, before);
}

#[test]
fn test_record_out_of_range_leaves_ledger_unchanged() {
    let mut ledger = setup_ledger();
    let before = ledger.clone();
    let txn = Transaction::new(date(2024, 3, 1), "Huge".into(), Decimal::MAX, Kind::Expense);
    assert!(ledger.record(txn).is_err());
    assert_eq!(ledger, before);
}

#[test]
fn test_max_amounts_sum_without_overflow() {
    let mut ledger = Ledger::new();
    ledger
        .add_on(date(2024, 3, 1), "a", "1000000000000000", Kind::Income)
        .unwrap();
    ledger
        .add_on(date(2024, 3, 2), "b", "1000000000000000", Kind::Income)
        .unwrap();
    assert_eq!(ledger.total_balance(), dec!(2000000000000000));
    assert_eq!(
        ledger.month_totals(month(2024, 3)),
        (dec!(2000000000000000), Decimal::ZERO)
    );
}

#[test]
fn test_balance_is_signed_sum() {
    let amounts = [
        ("10", Kind::Income),
        ("2.25", Kind::Expense),
        ("0.01", Kind::Income),
        ("100", Kind::Expense),
        ("55.55", Kind::Income),
    ];
    let mut ledger = Ledger::new();
    let mut expected = Decimal::ZERO;
    for (i, (raw, kind)) in amounts.iter().enumerate() {
        let d = date(2024, (i as u32 % 3) + 1, 10);
        ledger.add_on(d, "x", raw, *kind).unwrap();
        expected += kind.sign(parse_amount(raw).unwrap());
    }
    assert_eq!(ledger.total_balance(), expected);
    assert_eq!(ledger.total_balance(), dec!(-36.69));
    assert_eq!(ledger.len(), amounts.len());
}

#[test]
fn test_bucket_keeps_insertion_order() {
    let mut ledger = Ledger::new();
    // later date first: order is insertion, not date
    ledger
        .add_on(date(2024, 1, 20), "B", "1", Kind::Income)
        .unwrap();
    ledger
        .add_on(date(2024, 1, 3), "A", "1", Kind::Income)
        .unwrap();
    let labels: Vec<&str> = ledger
        .transactions_for(month(2024, 1))
        .iter()
        .map(|t| t.label.as_str())
        .collect();
    assert_eq!(labels, vec!["B", "A"]);
}

#[test]
fn test_months_are_chronological() {
    let mut ledger = Ledger::new();
    ledger
        .add_on(date(2024, 2, 1), "b", "1", Kind::Income)
        .unwrap();
    ledger
        .add_on(date(2023, 12, 1), "a", "1", Kind::Income)
        .unwrap();
    ledger
        .add_on(date(2024, 1, 1), "c", "1", Kind::Income)
        .unwrap();
    let months: Vec<MonthKey> = ledger.months().collect();
    assert_eq!(months, vec![month(2023, 12), month(2024, 1), month(2024, 2)]);
}

#[test]
fn test_duplicate_transactions_are_kept() {
    let mut ledger = Ledger::new();
    for _ in 0..2 {
        ledger
            .add_on(date(2024, 1, 1), "Same", "5", Kind::Expense)
            .unwrap();
    }
    assert_eq!(ledger.transactions_for(month(2024, 1)).len(), 2);
    assert_eq!(ledger.total_balance(), dec!(-10));
}

// ── remove_month ──────────────────────────────────────────────

#[test]
fn test_remove_month_absent_is_noop() {
    let mut ledger = setup_ledger();
    let snapshot = ledger.clone();
    assert!(ledger.remove_month(month(2030, 1)).is_none());
    assert_eq!(ledger, snapshot);
}

#[test]
fn test_remove_month_recomputes_balance() {
    let mut ledger = setup_ledger();
    let removed = ledger.remove_month(month(2024, 1)).unwrap();
    assert_eq!(removed.len(), 2);
    assert!(!ledger.contains_month(month(2024, 1)));
    assert!(ledger.contains_month(month(2024, 2)));
    assert_eq!(ledger.total_balance(), dec!(-4.50));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_remove_last_month_empties_ledger() {
    let mut ledger = setup_ledger();
    ledger.remove_month(month(2024, 1));
    ledger.remove_month(month(2024, 2));
    assert!(ledger.is_empty());
    assert_eq!(ledger.total_balance(), Decimal::ZERO);
}

// ── Queries ───────────────────────────────────────────────────

#[test]
fn test_transactions_for_absent_month_is_empty() {
    let ledger = setup_ledger();
    assert!(ledger.transactions_for(month(1999, 1)).is_empty());
}

#[test]
fn test_month_totals() {
    let ledger = setup_ledger();
    assert_eq!(ledger.month_totals(month(2024, 1)), (dec!(1000), dec!(300)));
    assert_eq!(ledger.month_totals(month(2024, 2)), (Decimal::ZERO, dec!(4.50)));
    assert_eq!(
        ledger.month_totals(month(2025, 1)),
        (Decimal::ZERO, Decimal::ZERO)
    );
}

#[test]
fn test_iter_walks_months_in_order() {
    let ledger = setup_ledger();
    let seen: Vec<(MonthKey, &str)> = ledger
        .iter()
        .map(|(m, t)| (m, t.label.as_str()))
        .collect();
    assert_eq!(
        seen,
        vec![
            (month(2024, 1), "Salary"),
            (month(2024, 1), "Rent"),
            (month(2024, 2), "Coffee"),
        ]
    );
}

#[test]
fn test_new_ledger_is_empty() {
    let ledger = Ledger::new();
    assert!(ledger.is_empty());
    assert_eq!(ledger.len(), 0);
    assert_eq!(ledger.total_balance(), Decimal::ZERO);
    assert_eq!(ledger.months().count(), 0);
}
