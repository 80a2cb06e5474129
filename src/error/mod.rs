//! Error types and handling for Launchkit
//!
//! Uses `thiserror` for error definitions and `miette` for diagnostics.
//!
//! Variants are grouped by the bootstrap step that raises them:
//! - environment update (package manager self-upgrade)
//! - dependency install (manifest and install command)
//! - launch (entry point and application process)
//!
//! Configuration and I/O errors are raised before the sequence starts.
//! Constructors live in the [`step`] and [`config`] sub-modules.

#![allow(unused_assignments)]

pub mod config;
pub mod step;


use miette::Diagnostic;
use thiserror::Error;

use crate::orchestrator::Step;
use crate::runner::ExitOutcome;

/// Exit code used for failures that have no process status of their own
pub const GENERIC_FAILURE: i32 = 1;

/// Main error type for Launchkit operations
#[derive(Error, Diagnostic, Debug)]
pub enum LaunchkitError {
    // Environment update errors
    #[error("Package manager upgrade failed: `{command}` terminated with {outcome}")]
    #[diagnostic(
        code(launchkit::environment_update::failed),
        help("The package manager output above describes the failure")
    )]
    EnvironmentUpdateFailed {
        command: String,
        outcome: ExitOutcome,
    },

    #[error("Failed to start package manager upgrade `{program}`: {reason}")]
    #[diagnostic(
        code(launchkit::environment_update::spawn_failed),
        help("Check that the package manager is installed and on PATH")
    )]
    EnvironmentUpdateSpawnFailed {
        program: String,
        reason: String,
        status: i32,
    },

    // Dependency install errors
    #[error("Dependency manifest not found: {path}")]
    #[diagnostic(
        code(launchkit::dependency_install::manifest_not_found),
        help("Create the manifest or point --manifest at an existing file")
    )]
    ManifestNotFound { path: String },

    #[error("Failed to read dependency manifest: {path}: {reason}")]
    #[diagnostic(code(launchkit::dependency_install::manifest_read_failed))]
    ManifestReadFailed { path: String, reason: String },

    #[error("Invalid dependency manifest {path} at line {line}: {reason}")]
    #[diagnostic(code(launchkit::dependency_install::manifest_invalid))]
    ManifestParseFailed {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Dependency installation failed: `{command}` terminated with {outcome}")]
    #[diagnostic(
        code(launchkit::dependency_install::failed),
        help("The installer output above names the package that could not be installed")
    )]
    DependencyInstallFailed {
        command: String,
        outcome: ExitOutcome,
    },

    #[error("Failed to start dependency installer `{program}`: {reason}")]
    #[diagnostic(
        code(launchkit::dependency_install::spawn_failed),
        help("Check that the package manager is installed and on PATH")
    )]
    DependencyInstallSpawnFailed {
        program: String,
        reason: String,
        status: i32,
    },

    // Launch errors
    #[error("Application entry point not found: {path}")]
    #[diagnostic(
        code(launchkit::launch::entry_point_not_found),
        help("Point --entry-point at the application's main file")
    )]
    EntryPointNotFound { path: String },

    #[error("Failed to start application `{program}`: {reason}")]
    #[diagnostic(
        code(launchkit::launch::spawn_failed),
        help("Check that the launcher is installed; dependencies may provide it")
    )]
    LaunchSpawnFailed {
        program: String,
        reason: String,
        status: i32,
    },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(launchkit::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(launchkit::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(
        code(launchkit::config::parse_failed),
        help(
            "Allowed keys: manifest, entry_point, upgrade, install, launch, env"
        )
    )]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(launchkit::config::invalid))]
    ConfigInvalid { message: String },

    // CLI errors
    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(launchkit::cli::unknown_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnknownShell { shell: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(launchkit::io_error))]
    IoError { message: String },
}

impl LaunchkitError {
    /// The bootstrap step that raised this error, if any
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::EnvironmentUpdateFailed { .. } | Self::EnvironmentUpdateSpawnFailed { .. } => {
                Some(Step::UpgradePackageManager)
            }
            Self::ManifestNotFound { .. }
            | Self::ManifestReadFailed { .. }
            | Self::ManifestParseFailed { .. }
            | Self::DependencyInstallFailed { .. }
            | Self::DependencyInstallSpawnFailed { .. } => Some(Step::InstallDependencies),
            Self::EntryPointNotFound { .. } | Self::LaunchSpawnFailed { .. } => {
                Some(Step::LaunchApplication)
            }
            _ => None,
        }
    }

    /// Process exit code reported for this error
    ///
    /// Command failures forward the failing command's status; everything
    /// else exits with [`GENERIC_FAILURE`]. Never returns 0.
    pub fn exit_code(&self) -> i32 {
        let code = match self {
            Self::EnvironmentUpdateFailed { outcome, .. }
            | Self::DependencyInstallFailed { outcome, .. } => outcome.exit_code(),
            Self::EnvironmentUpdateSpawnFailed { status, .. }
            | Self::DependencyInstallSpawnFailed { status, .. }
            | Self::LaunchSpawnFailed { status, .. } => *status,
            _ => GENERIC_FAILURE,
        };

        if code == 0 { GENERIC_FAILURE } else { code }
    }
}

impl From<std::io::Error> for LaunchkitError {
    fn from(err: std::io::Error) -> Self {
        LaunchkitError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LaunchkitError {
    fn from(err: serde_json::Error) -> Self {
        LaunchkitError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, LaunchkitError>;
