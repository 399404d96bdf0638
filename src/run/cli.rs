use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::ledger::Ledger;
use crate::models::{Kind, MonthKey};
use crate::store::CsvStore;
use crate::ui::render;
use crate::ui::util::format_signed;

pub(crate) fn as_cli(args: &[String], store: &CsvStore) -> Result<()> {
    let stdout = io::stdout();
    let stdin = io::stdin();
    dispatch(args, store, &mut stdout.lock(), &mut stdin.lock())
}

fn dispatch(
    args: &[String],
    store: &CsvStore,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<()> {
    let Some(command) = args.first() else {
        return cli_list(&[], store, out);
    };
    let rest = &args[1..];

    match command.as_str() {
        "list" | "ls" => cli_list(rest, store, out),
        "income" | "in" => cli_add(rest, Kind::Income, store, out),
        "expense" | "out" => cli_add(rest, Kind::Expense, store, out),
        "balance" | "b" => {
            let ledger = load(store)?;
            writeln!(out, "{}", render::balance_line(&ledger))?;
            Ok(())
        }
        "months" => {
            let ledger = load(store)?;
            print_lines(out, &render::render_months(&ledger))
        }
        "summary" | "s" => cli_summary(rest, store, out),
        "remove-month" | "rm" => cli_remove_month(rest, store, out, input),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "finances {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut impl Write) -> Result<()> {
    let usage = [
        "Finances — income/expense ledger grouped by month",
        "",
        "Usage: finances [--file <path>] [command]",
        "",
        "Commands:",
        "  (none), list [month]          Show balance and transactions by month",
        "  income <label> <amount>       Record income dated today",
        "  expense <label> <amount>      Record an expense dated today",
        "  balance                       Print the available balance",
        "  months                        List recorded months",
        "  summary [month]               Income, expenses and net for a month (default: current)",
        "  remove-month <month>          Delete every transaction in a month",
        "    --yes, -y                   Skip the confirmation prompt",
        "  --help, -h                    Show this help",
        "  --version, -V                 Show version",
        "",
        "Months are written as YYYY-MM or e.g. \"October 2026\".",
    ];
    for line in usage {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn cli_list(args: &[String], store: &CsvStore, out: &mut impl Write) -> Result<()> {
    let ledger = load(store)?;
    let only = month_arg(args)?;
    print_lines(out, &render::render_ledger(&ledger, only))
}

fn cli_add(args: &[String], kind: Kind, store: &CsvStore, out: &mut impl Write) -> Result<()> {
    let Some((raw_amount, label)) = args.split_last().filter(|(_, label)| !label.is_empty())
    else {
        let verb = kind.as_str().to_lowercase();
        anyhow::bail!("Usage: finances {verb} <label> <amount>");
    };
    let label = label.join(" ");

    let mut ledger = load(store)?;
    let txn = ledger.add(&label, raw_amount, kind)?.clone();
    save(store, &ledger)?;

    writeln!(
        out,
        "Added {}: {} {} ({})",
        kind.as_str().to_lowercase(),
        txn.label,
        format_signed(&txn),
        txn.month()
    )?;
    writeln!(out, "{}", render::balance_line(&ledger))?;
    Ok(())
}

fn cli_summary(args: &[String], store: &CsvStore, out: &mut impl Write) -> Result<()> {
    let ledger = load(store)?;
    let month = match month_arg(args)? {
        Some(m) => m,
        None => MonthKey::of(chrono::Local::now().date_naive()),
    };
    print_lines(out, &render::render_summary(&ledger, month))
}

fn cli_remove_month(
    args: &[String],
    store: &CsvStore,
    out: &mut impl Write,
    input: &mut impl BufRead,
) -> Result<()> {
    let assume_yes = args.iter().any(|a| a == "--yes" || a == "-y");
    let month = month_arg(args)?
        .ok_or_else(|| anyhow::anyhow!("Usage: finances remove-month <month> [--yes]"))?;

    let mut ledger = load(store)?;
    let count = ledger.transactions_for(month).len();
    if count == 0 {
        writeln!(out, "No transactions for {month}")?;
        return Ok(());
    }

    if !assume_yes {
        write!(out, "Delete {month} ({count} transactions)? [y/N] ")?;
        out.flush()?;
        let mut answer = String::new();
        input.read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            writeln!(out, "Cancelled")?;
            return Ok(());
        }
    }

    ledger.remove_month(month);
    save(store, &ledger)?;
    writeln!(out, "Deleted {month}")?;
    writeln!(out, "{}", render::balance_line(&ledger))?;
    Ok(())
}

/// Non-flag arguments joined into a month, so both `2026-10` and
/// `October 2026` (two args) work.
fn month_arg(args: &[String]) -> Result<Option<MonthKey>> {
    let words: Vec<&str> = args
        .iter()
        .filter(|a| !a.starts_with('-'))
        .map(String::as_str)
        .collect();
    if words.is_empty() {
        return Ok(None);
    }
    let raw = words.join(" ");
    MonthKey::parse(&raw).map(Some).ok_or_else(|| {
        anyhow::anyhow!("Unrecognised month '{raw}' (use YYYY-MM or e.g. \"October 2026\")")
    })
}

/// Pull `--file <path>` / `-f <path>` out of the argument list.
pub(crate) fn take_file_flag(args: &[String]) -> Result<(Option<String>, Vec<String>)> {
    let mut file = None;
    let mut rest = Vec::with_capacity(args.len());
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--file" || arg == "-f" {
            let path = iter
                .next()
                .ok_or_else(|| anyhow::anyhow!("{arg} needs a path"))?;
            file = Some(path.clone());
        } else if let Some(path) = arg.strip_prefix("--file=") {
            file = Some(path.to_string());
        } else {
            rest.push(arg.clone());
        }
    }
    Ok((file, rest))
}

fn load(store: &CsvStore) -> Result<Ledger> {
    store
        .load()
        .with_context(|| format!("Failed to read {}", store.path().display()))
}

fn save(store: &CsvStore, ledger: &Ledger) -> Result<()> {
    store
        .save(ledger)
        .with_context(|| format!("Failed to write {}", store.path().display()))
}

fn print_lines(out: &mut impl Write, lines: &[String]) -> Result<()> {
    for line in lines {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
