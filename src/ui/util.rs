use rust_decimal::Decimal;

use crate::models::Transaction;

/// Format a decimal amount with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"$1,234,567.89"`, `-12` → `"-$12.00"`
pub(crate) fn format_amount(val: Decimal) -> String {
    let sign = if val < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${}", group_thousands(val.abs()))
}

/// Amount of a transaction with an explicit sign: `+$1,000.00` / `-$300.00`.
pub(crate) fn format_signed(txn: &Transaction) -> String {
    let sign = if txn.is_income() { "+" } else { "-" };
    format!("{sign}${}", group_thousands(txn.amount))
}

fn group_thousands(abs: Decimal) -> String {
    let formatted = format!("{:.2}", abs.round_dp(2));
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let with_commas = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    format!("{with_commas}.{dec_part}")
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max - 1).collect();
    format!("{kept}…")
}
