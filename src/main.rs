mod ledger;
mod logging;
mod models;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::store::CsvStore;

fn main() -> Result<()> {
    logging::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (file, args) = run::take_file_flag(&args)?;
    let path = match file {
        Some(p) => PathBuf::from(run::shellexpand(&p)),
        None => get_data_path()?,
    };
    tracing::debug!(path = %path.display(), "using data file");

    let store = CsvStore::new(path);
    run::as_cli(&args, &store)
}

fn get_data_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "finances", "Finances")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("transactions.csv"))
}
