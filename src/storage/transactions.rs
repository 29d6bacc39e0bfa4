//! Transaction ledger storage
//!
//! A single JSON file holds every imported transaction plus the content
//! hashes of the source files already imported. Idempotency works at two
//! levels: a whole batch whose hash is known becomes a no-op, and within a
//! batch individual rows are deduplicated by their content key.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::WorkspacePaths;
use crate::error::CashplanResult;
use crate::models::Transaction;

/// Outcome of merging a batch into the ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub added: usize,
    pub duplicates: usize,
    /// The whole batch was already imported; nothing was touched
    pub batch_seen: bool,
}

/// The persistent transaction ledger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ledger {
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// SHA-256 hex digests of imported source files
    #[serde(default)]
    pub imported_batches: Vec<String>,
}

impl Ledger {
    /// Load the ledger, or start empty when the file does not exist yet
    pub fn load(paths: &WorkspacePaths) -> CashplanResult<Self> {
        let path = paths.ledger_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn save(&self, paths: &WorkspacePaths) -> CashplanResult<()> {
        paths.ensure_directories()?;
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.ledger_file(), contents)?;
        Ok(())
    }

    pub fn has_batch(&self, batch_hash: &str) -> bool {
        self.imported_batches.iter().any(|h| h == batch_hash)
    }

    /// Merge a batch of transactions into the ledger
    ///
    /// A batch whose `batch_hash` was imported before is skipped wholesale.
    /// Otherwise rows whose dedup key already exists in the ledger (or
    /// earlier in the same batch) are dropped, everything else is appended,
    /// and the batch hash is recorded.
    pub fn import_batch(
        &mut self,
        batch: Vec<Transaction>,
        batch_hash: &str,
    ) -> ImportOutcome {
        if self.has_batch(batch_hash) {
            info!(batch = batch_hash, "batch already imported, skipping");
            return ImportOutcome {
                added: 0,
                duplicates: 0,
                batch_seen: true,
            };
        }

        let mut seen: HashSet<String> =
            self.transactions.iter().map(|t| t.dedup_key()).collect();

        let mut added = 0;
        let mut duplicates = 0;
        for tx in batch {
            if seen.insert(tx.dedup_key()) {
                self.transactions.push(tx);
                added += 1;
            } else {
                duplicates += 1;
            }
        }

        self.imported_batches.push(batch_hash.to_string());
        self.transactions.sort_by(|a, b| {
            a.date.cmp(&b.date).then_with(|| a.created_at.cmp(&b.created_at))
        });

        info!(batch = batch_hash, added, duplicates, "imported batch");
        ImportOutcome {
            added,
            duplicates,
            batch_seen: false,
        }
    }
}
