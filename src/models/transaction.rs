use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::MonthKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Income,
    Expense,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }

    /// Literal written to the data file's last column.
    pub fn flag(&self) -> &'static str {
        match self {
            Self::Income => "True",
            Self::Expense => "False",
        }
    }

    pub fn from_flag(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "true" => Some(Self::Income),
            "false" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn sign(&self, amount: Decimal) -> Decimal {
        match self {
            Self::Income => amount,
            Self::Expense => -amount,
        }
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub label: String,
    /// Always positive; the sign comes from `kind`.
    pub amount: Decimal,
    pub kind: Kind,
}

impl Transaction {
    pub fn new(date: NaiveDate, label: String, amount: Decimal, kind: Kind) -> Self {
        Self {
            date,
            label,
            amount,
            kind,
        }
    }

    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }

    pub fn is_income(&self) -> bool {
        self.kind == Kind::Income
    }

    pub fn signed_amount(&self) -> Decimal {
        self.kind.sign(self.amount)
    }
}
