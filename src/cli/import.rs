//! `import` command

use std::path::Path;

use crate::config::{WorkspaceConfig, WorkspacePaths};
use crate::error::CashplanResult;
use crate::import::read_statement;
use crate::storage::{Ledger, RateTable};

/// Import a CSV statement into the ledger
pub fn handle_import(paths: &WorkspacePaths, file: &Path) -> CashplanResult<()> {
    let config = WorkspaceConfig::load(paths)?;
    let rates = RateTable::load(paths, &config.base_currency)?;

    let batch = read_statement(file, &rates)?;
    let rows = batch.transactions.len();

    let mut ledger = Ledger::load(paths)?;
    let outcome = ledger.import_batch(batch.transactions, &batch.content_hash);

    if outcome.batch_seen {
        println!("{} was already imported; nothing to do.", batch.source_file);
        return Ok(());
    }

    ledger.save(paths)?;
    println!(
        "Imported {}: {} of {} rows added, {} duplicates skipped.",
        batch.source_file, outcome.added, rows, outcome.duplicates
    );
    Ok(())
}
