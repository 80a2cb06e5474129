//! Command helper utilities

use std::path::PathBuf;

use crate::cli::GlobalArgs;
use crate::config::{self, ConfigOverrides};
use crate::error::{LaunchkitError, Result};
use crate::orchestrator::BootstrapPlan;

/// Resolve workspace path from optional argument
///
/// If a workspace path is provided, use it. Otherwise,
/// resolve to the current directory.
pub fn resolve_workspace_path(workspace: Option<PathBuf>) -> Result<PathBuf> {
    let path = match workspace {
        Some(path) => path,
        None => std::env::current_dir().map_err(|e| LaunchkitError::IoError {
            message: format!("Failed to get current directory: {}", e),
        })?,
    };

    if !path.is_dir() {
        return Err(LaunchkitError::IoError {
            message: format!("Workspace is not a directory: {}", path.display()),
        });
    }

    Ok(path)
}

/// Load configuration and resolve the bootstrap plan for the global options
pub fn load_plan(global: &GlobalArgs) -> Result<BootstrapPlan> {
    let workspace = resolve_workspace_path(global.workspace.clone())?;
    let overrides = ConfigOverrides {
        manifest: global.manifest.clone(),
        entry_point: global.entry_point.clone(),
    };

    let config = config::loader::load(&workspace, global.config.as_deref(), &overrides)?;
    BootstrapPlan::resolve(&config, &workspace)
}
