//! Workspace configuration and path layout

pub mod paths;
pub mod workspace;

pub use paths::WorkspacePaths;
pub use workspace::WorkspaceConfig;
