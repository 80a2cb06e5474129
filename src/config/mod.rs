//! Configuration handling for Launchkit
//!
//! This module contains:
//! - `launchkit.yaml` - the step commands, manifest and entry point
//! - layered loading from user, workspace and command-line sources

pub mod bootstrap;
pub mod loader;

// Re-export commonly used types
pub use bootstrap::{BootstrapConfig, CommandSpec, ConfigLayer};
pub use loader::{ConfigOverrides, WORKSPACE_CONFIG_FILE};
