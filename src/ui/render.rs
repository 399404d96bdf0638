use crate::ledger::Ledger;
use crate::models::MonthKey;
use crate::ui::util::{format_amount, format_signed, truncate};

const LABEL_WIDTH: usize = 28;
const RULE_WIDTH: usize = 56;

pub(crate) fn balance_line(ledger: &Ledger) -> String {
    format!("Available: {}", format_amount(ledger.total_balance()))
}

/// Balance header followed by every month (or just `only`) and its
/// transactions, oldest month first.
pub(crate) fn render_ledger(ledger: &Ledger, only: Option<MonthKey>) -> Vec<String> {
    let mut lines = vec![balance_line(ledger)];

    if ledger.is_empty() {
        lines.push(String::new());
        lines.push("No transactions yet".into());
        lines.push("Add one with `income <label> <amount>` or `expense <label> <amount>`".into());
        return lines;
    }

    let months: Vec<MonthKey> = match only {
        Some(month) if !ledger.contains_month(month) => {
            lines.push(String::new());
            lines.push(format!("No transactions for {month}"));
            return lines;
        }
        Some(month) => vec![month],
        None => ledger.months().collect(),
    };

    for month in months {
        lines.push(String::new());
        let title = format!("── {month} ");
        let fill = RULE_WIDTH.saturating_sub(title.chars().count());
        lines.push(format!("{title}{}", "─".repeat(fill)));
        for txn in ledger.transactions_for(month) {
            lines.push(format!(
                "  {}  {:<width$}  {:>14}",
                txn.date.format("%d/%m/%Y"),
                truncate(&txn.label, LABEL_WIDTH),
                format_signed(txn),
                width = LABEL_WIDTH,
            ));
        }
    }
    lines
}

/// One line per month: label, transaction count, net change.
pub(crate) fn render_months(ledger: &Ledger) -> Vec<String> {
    if ledger.is_empty() {
        return vec!["No months recorded".into()];
    }

    let mut lines = vec![
        format!("{:<16} {:<8} {:>8} {:>14}", "Month", "Key", "Txns", "Net"),
        "─".repeat(RULE_WIDTH - 7),
    ];
    for month in ledger.months() {
        let (income, expenses) = ledger.month_totals(month);
        lines.push(format!(
            "{:<16} {:<8} {:>8} {:>14}",
            month.label(),
            month.iso(),
            ledger.transactions_for(month).len(),
            format_amount(income - expenses),
        ));
    }
    lines
}

pub(crate) fn render_summary(ledger: &Ledger, month: MonthKey) -> Vec<String> {
    let (income, expenses) = ledger.month_totals(month);
    vec![
        format!("Finances — {month}"),
        "─".repeat(40),
        format!("  Income:     {}", format_amount(income)),
        format!("  Expenses:   {}", format_amount(expenses)),
        format!("  Net:        {}", format_amount(income - expenses)),
        format!("  Balance:    {}", format_amount(ledger.total_balance())),
        format!("  Txns:       {}", ledger.transactions_for(month).len()),
    ]
}
