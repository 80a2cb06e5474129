//! Step errors
//!
//! Maps a failed or unstartable command to the error variant of the step
//! that ran it.

use std::io;

use super::{GENERIC_FAILURE, LaunchkitError};
use crate::orchestrator::Step;
use crate::runner::ExitOutcome;

/// Exit code shells report for a command that cannot be found
pub const COMMAND_NOT_FOUND: i32 = 127;

/// Exit code shells report for a command that is not executable
pub const COMMAND_NOT_EXECUTABLE: i32 = 126;

/// Exit status for a command that could not be spawned
pub fn spawn_status(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::NotFound => COMMAND_NOT_FOUND,
        io::ErrorKind::PermissionDenied => COMMAND_NOT_EXECUTABLE,
        _ => GENERIC_FAILURE,
    }
}

/// Creates the error for a step command that could not be started
pub fn spawn_failed(step: Step, program: &str, err: &io::Error) -> LaunchkitError {
    let program = program.to_string();
    let reason = err.to_string();
    let status = spawn_status(err);

    match step {
        Step::UpgradePackageManager => LaunchkitError::EnvironmentUpdateSpawnFailed {
            program,
            reason,
            status,
        },
        Step::InstallDependencies => LaunchkitError::DependencyInstallSpawnFailed {
            program,
            reason,
            status,
        },
        Step::LaunchApplication => LaunchkitError::LaunchSpawnFailed {
            program,
            reason,
            status,
        },
    }
}

/// Creates the error for a package manager upgrade that reported failure
pub fn upgrade_failed(command: String, outcome: ExitOutcome) -> LaunchkitError {
    LaunchkitError::EnvironmentUpdateFailed { command, outcome }
}

/// Creates the error for a dependency install that reported failure
pub fn install_failed(command: String, outcome: ExitOutcome) -> LaunchkitError {
    LaunchkitError::DependencyInstallFailed { command, outcome }
}

/// Creates a manifest parse error
pub fn manifest_invalid(
    path: impl Into<String>,
    line: usize,
    reason: impl Into<String>,
) -> LaunchkitError {
    LaunchkitError::ManifestParseFailed {
        path: path.into(),
        line,
        reason: reason.into(),
    }
}

/// Creates a missing entry point error
pub fn entry_point_not_found(path: impl Into<String>) -> LaunchkitError {
    LaunchkitError::EntryPointNotFound { path: path.into() }
}
