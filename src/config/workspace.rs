//! Workspace configuration
//!
//! YAML settings file at the workspace root. Missing keys fall back to
//! defaults so a hand-written minimal file stays valid.

use serde::{Deserialize, Serialize};

use super::paths::WorkspacePaths;
use crate::error::{CashplanError, CashplanResult};
use crate::models::Granularity;

/// Settings loaded from `cashplan.yaml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Display name for the workspace
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Currency all stored amounts are converted into at import
    #[serde(default = "default_base_currency")]
    pub base_currency: String,

    /// Default period granularity for analysis commands
    #[serde(default)]
    pub interval: Granularity,

    /// Moving-average window for trend analysis, in periods
    #[serde(default = "default_analysis_window")]
    pub analysis_window: usize,
}

fn default_base_currency() -> String {
    "EUR".to_string()
}

fn default_analysis_window() -> usize {
    3
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            base_currency: default_base_currency(),
            interval: Granularity::default(),
            analysis_window: default_analysis_window(),
        }
    }
}

impl WorkspaceConfig {
    /// Load the workspace config, failing when the workspace is missing
    pub fn load(paths: &WorkspacePaths) -> CashplanResult<Self> {
        paths.require_initialized()?;
        let contents = std::fs::read_to_string(paths.config_file())?;
        let config: Self = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, paths: &WorkspacePaths) -> CashplanResult<()> {
        paths.ensure_directories()?;
        let contents = serde_yaml::to_string(self)?;
        std::fs::write(paths.config_file(), contents)?;
        Ok(())
    }

    /// Reject settings that cannot drive an analysis run
    ///
    /// A custom interval needs an explicit date range per invocation, so it
    /// cannot serve as the workspace default.
    pub fn validate(&self) -> CashplanResult<()> {
        if self.base_currency.trim().is_empty() {
            return Err(CashplanError::Configuration(
                "base_currency must not be empty".into(),
            ));
        }
        if self.interval == Granularity::Custom {
            return Err(CashplanError::Configuration(
                "custom interval cannot be the workspace default; pass an explicit range instead"
                    .into(),
            ));
        }
        if self.analysis_window == 0 {
            return Err(CashplanError::Configuration(
                "analysis_window must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
