//! Workspace path layout
//!
//! Every run operates inside an explicit workspace directory. All file
//! locations derive from that root; nothing is read from home directories
//! or process-wide state.

use std::path::{Path, PathBuf};

use crate::error::{CashplanError, CashplanResult};

/// File and directory locations inside one workspace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspacePaths {
    root: PathBuf,
}

impl WorkspacePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Workspace configuration (`cashplan.yaml`)
    pub fn config_file(&self) -> PathBuf {
        self.root.join("cashplan.yaml")
    }

    /// Directory holding one YAML file per budget plan
    pub fn plans_dir(&self) -> PathBuf {
        self.root.join("plans")
    }

    /// Directory CSV statements are imported from
    pub fn imports_dir(&self) -> PathBuf {
        self.root.join("imports")
    }

    /// The transaction ledger (`ledger.json`)
    pub fn ledger_file(&self) -> PathBuf {
        self.root.join("ledger.json")
    }

    /// Conversion rates to the base currency (`rates.yaml`)
    pub fn rates_file(&self) -> PathBuf {
        self.root.join("rates.yaml")
    }

    /// Create the workspace directory tree
    pub fn ensure_directories(&self) -> CashplanResult<()> {
        std::fs::create_dir_all(&self.root)?;
        std::fs::create_dir_all(self.plans_dir())?;
        std::fs::create_dir_all(self.imports_dir())?;
        Ok(())
    }

    /// A workspace is initialized once its config file exists
    pub fn is_initialized(&self) -> bool {
        self.config_file().exists()
    }

    /// Fail with a pointed error when the workspace was never initialized
    pub fn require_initialized(&self) -> CashplanResult<()> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(CashplanError::WorkspaceNotFound(
                self.root.display().to_string(),
            ))
        }
    }
}
