use chrono::{Datelike, NaiveDate};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month. Orders chronologically (year first, then month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn name(&self) -> &'static str {
        // `month` is validated to 1..=12 by every constructor
        MONTH_NAMES[(self.month - 1) as usize]
    }

    /// `"October 2026"`, the form stored in the data file.
    pub fn label(&self) -> String {
        format!("{} {}", self.name(), self.year)
    }

    /// `"2026-10"`
    pub fn iso(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }

    /// Accepts `YYYY-MM` or `<month name> <year>`, where the name may be
    /// full or abbreviated to three letters, in any case.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();

        if let Some((y, m)) = s.split_once('-') {
            if y.len() == 4 && y.chars().all(|c| c.is_ascii_digit()) {
                let year = y.parse().ok()?;
                let month = m.parse().ok()?;
                return Self::new(year, month);
            }
        }

        let mut parts = s.split_whitespace();
        let name = parts.next()?;
        let year: i32 = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        let month = month_from_name(name)?;
        Self::new(year, month)
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    MONTH_NAMES
        .iter()
        .position(|full| {
            let full = full.to_lowercase();
            lower == full || (lower.len() == 3 && full.starts_with(&lower))
        })
        .map(|i| i as u32 + 1)
}

impl std::fmt::Display for MonthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name(), self.year)
    }
}
