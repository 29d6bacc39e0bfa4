//! `init` command

use crate::config::{WorkspaceConfig, WorkspacePaths};
use crate::error::{CashplanError, CashplanResult};

/// Initialize a new workspace: directory tree plus a default config file
pub fn handle_init(paths: &WorkspacePaths) -> CashplanResult<()> {
    if paths.is_initialized() {
        return Err(CashplanError::Configuration(format!(
            "workspace at {} is already initialized",
            paths.root().display()
        )));
    }

    paths.ensure_directories()?;
    let config = WorkspaceConfig::default();
    config.save(paths)?;

    println!("Initialized workspace at {}", paths.root().display());
    println!();
    println!("  {} — settings", paths.config_file().display());
    println!("  {} — one YAML file per budget plan", paths.plans_dir().display());
    println!("  {} — drop CSV statements here", paths.imports_dir().display());
    println!();
    println!("Add a plan under plans/, then run 'cashplan import <file.csv>'.");
    Ok(())
}
