use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{Kind, MonthKey, Transaction};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Enter a valid number: '{0}'")]
    InvalidAmount(String),
    #[error("Amount too large: '{0}'")]
    AmountTooLarge(String),
}

/// Largest amount a single transaction may carry. Keeps every running sum
/// far below `Decimal::MAX`, so totals over any in-memory ledger cannot
/// overflow.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// All recorded transactions, bucketed by calendar month.
///
/// Buckets iterate chronologically; within a bucket transactions keep
/// insertion order. The running balance is kept in step with the buckets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    buckets: BTreeMap<MonthKey, Vec<Transaction>>,
    balance: Decimal,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a transaction dated today (local time).
    pub fn add(
        &mut self,
        label: &str,
        raw_amount: &str,
        kind: Kind,
    ) -> Result<&Transaction, LedgerError> {
        let today = chrono::Local::now().date_naive();
        self.add_on(today, label, raw_amount, kind)
    }

    pub fn add_on(
        &mut self,
        date: NaiveDate,
        label: &str,
        raw_amount: &str,
        kind: Kind,
    ) -> Result<&Transaction, LedgerError> {
        let amount = parse_amount(raw_amount)?;
        let txn = Transaction::new(date, label.to_string(), amount, kind);
        let txn = self.record(txn)?;
        tracing::info!(month = %txn.month(), %amount, kind = %kind, "recorded transaction");
        Ok(txn)
    }

    /// Append a transaction to the bucket of its date. The ledger is left
    /// untouched if the amount is out of range.
    pub fn record(&mut self, txn: Transaction) -> Result<&Transaction, LedgerError> {
        check_range(txn.amount)?;
        let balance = self
            .balance
            .checked_add(txn.signed_amount())
            .ok_or_else(|| LedgerError::AmountTooLarge(txn.amount.to_string()))?;

        self.balance = balance;
        let bucket = self.buckets.entry(txn.month()).or_default();
        bucket.push(txn);
        Ok(&bucket[bucket.len() - 1])
    }

    /// Drop a whole month. Returns the removed transactions, or `None` if the
    /// month had no bucket.
    pub fn remove_month(&mut self, month: MonthKey) -> Option<Vec<Transaction>> {
        let removed = self.buckets.remove(&month)?;
        self.balance = self.recompute_balance();
        tracing::info!(%month, removed = removed.len(), "removed month");
        Some(removed)
    }

    pub fn total_balance(&self) -> Decimal {
        self.balance
    }

    pub fn months(&self) -> impl Iterator<Item = MonthKey> + '_ {
        self.buckets.keys().copied()
    }

    pub fn contains_month(&self, month: MonthKey) -> bool {
        self.buckets.contains_key(&month)
    }

    pub fn transactions_for(&self, month: MonthKey) -> &[Transaction] {
        self.buckets.get(&month).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(income, expenses)` for one month, both as positive sums.
    pub fn month_totals(&self, month: MonthKey) -> (Decimal, Decimal) {
        self.transactions_for(month)
            .iter()
            .fold((Decimal::ZERO, Decimal::ZERO), |(inc, exp), t| match t.kind {
                Kind::Income => (inc + t.amount, exp),
                Kind::Expense => (inc, exp + t.amount),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (MonthKey, &Transaction)> + '_ {
        self.buckets
            .iter()
            .flat_map(|(month, txns)| txns.iter().map(move |t| (*month, t)))
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    // Amounts are capped at MAX_AMOUNT on entry, so plain sums are safe here
    // and in `month_totals`.
    fn recompute_balance(&self) -> Decimal {
        self.iter().map(|(_, t)| t.signed_amount()).sum()
    }
}

/// Parse user-entered amount text into a strictly positive decimal.
///
/// Tolerates surrounding whitespace, a leading `$` and exponent notation
/// (`1e3`). Digit separators (`,` and `_`) are rejected so `1,5` and `1_5`
/// never read as 15.
pub fn parse_amount(raw: &str) -> Result<Decimal, LedgerError> {
    let invalid = || LedgerError::InvalidAmount(raw.to_string());

    let trimmed = raw.trim();
    let cleaned = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    if cleaned.is_empty() || cleaned.contains('_') {
        return Err(invalid());
    }

    let amount = Decimal::from_str(cleaned)
        .or_else(|_| Decimal::from_scientific(cleaned))
        .map_err(|_| invalid())?;

    if amount <= Decimal::ZERO {
        return Err(invalid());
    }
    check_range(amount).map_err(|_| LedgerError::AmountTooLarge(raw.to_string()))?;
    Ok(amount)
}

fn check_range(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::InvalidAmount(amount.to_string()));
    }
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(LedgerError::AmountTooLarge(amount.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests;
