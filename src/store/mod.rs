use chrono::NaiveDate;
use csv::StringRecord;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::ledger::{self, Ledger, LedgerError};
use crate::models::{Kind, MonthKey, Transaction};

const DATE_FORMAT: &str = "%d/%m/%Y";
const FIELD_COUNT: usize = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: {reason}")]
    Malformed { line: u64, reason: String },
}

/// Flat-file persistence for a [`Ledger`].
///
/// One row per transaction, no header:
/// `month,date,label,amount,is_income` e.g.
/// `October 2026,19/10/2026,Salary,1000,True`.
pub(crate) struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Read the ledger back. A missing file is a first run and yields an
    /// empty ledger; any malformed row fails the whole load.
    pub(crate) fn load(&self) -> Result<Ledger, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no data file yet, starting empty");
                return Ok(Ledger::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(file);

        let mut ledger = Ledger::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result?;
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(i as u64 + 1);
            let txn = parse_row(&record, line)
                .map_err(|reason| StoreError::Malformed { line, reason })?;
            ledger.record(txn).map_err(|e| StoreError::Malformed {
                line,
                reason: e.to_string(),
            })?;
        }

        tracing::info!(
            path = %self.path.display(),
            transactions = ledger.len(),
            balance = %ledger.total_balance(),
            "loaded ledger"
        );
        Ok(ledger)
    }

    /// Rewrite the whole file. Rows go to a uniquely named temp file in the
    /// same directory, which is then renamed over the target, so a crash never
    /// leaves a half-written file and concurrent saves never share a temp file.
    pub(crate) fn save(&self, ledger: &Ledger) -> Result<(), StoreError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // Dropped (and deleted) on any early return
        let mut tmp = NamedTempFile::new_in(dir)?;
        write_rows(&mut tmp, ledger)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::info!(
            path = %self.path.display(),
            transactions = ledger.len(),
            "saved ledger"
        );
        Ok(())
    }
}

fn write_rows(out: &mut impl Write, ledger: &Ledger) -> Result<(), StoreError> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);

    for (month, txn) in ledger.iter() {
        let label = month.label();
        let date = txn.date.format(DATE_FORMAT).to_string();
        let amount = txn.amount.to_string();
        wtr.write_record([
            label.as_str(),
            date.as_str(),
            txn.label.as_str(),
            amount.as_str(),
            txn.kind.flag(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

fn parse_row(record: &StringRecord, line: u64) -> Result<Transaction, String> {
    if record.len() != FIELD_COUNT {
        return Err(format!(
            "expected {FIELD_COUNT} fields, found {}",
            record.len()
        ));
    }

    let date_raw = record[1].trim();
    let date = NaiveDate::parse_from_str(date_raw, DATE_FORMAT)
        .map_err(|_| format!("invalid date '{date_raw}'"))?;

    let month_raw = &record[0];
    match MonthKey::parse(month_raw) {
        Some(month) if !month.contains(date) => {
            return Err(format!("date {date_raw} does not belong to month '{month_raw}'"));
        }
        Some(_) => {}
        None => {
            tracing::warn!(line, month = month_raw, "unrecognised month label, using the row's date");
        }
    }

    let amount_raw = &record[3];
    let amount = ledger::parse_amount(amount_raw).map_err(|e| match e {
        LedgerError::InvalidAmount(_) => format!("invalid amount '{amount_raw}'"),
        other => other.to_string(),
    })?;

    let flag = &record[4];
    let kind = Kind::from_flag(flag).ok_or_else(|| format!("invalid income flag '{flag}'"))?;

    tracing::debug!(line, %date, %amount, kind = %kind, "parsed row");
    Ok(Transaction::new(date, record[2].to_string(), amount, kind))
}
