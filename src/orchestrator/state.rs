//! Bootstrap state machine and run report

use std::fmt;

use serde::Serialize;

use super::Step;
use crate::runner::ExitOutcome;

/// Where the bootstrap sequence currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "kebab-case")]
pub enum BootstrapState {
    NotStarted,
    Running { step: Step },
    Failed { step: Step, status: i32 },
    Launched { status: i32 },
}

impl BootstrapState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BootstrapState::Failed { .. } | BootstrapState::Launched { .. }
        )
    }
}

impl fmt::Display for BootstrapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BootstrapState::NotStarted => f.write_str("not started"),
            BootstrapState::Running { step } => write!(f, "running step {}", step.number()),
            BootstrapState::Failed { step, status } => {
                write!(f, "failed at step {} (status {status})", step.number())
            }
            BootstrapState::Launched { status } => {
                write!(f, "application launched (status {status})")
            }
        }
    }
}

/// Result of a step that ran to completion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "kebab-case")]
pub enum StepOutcome {
    /// The step's command succeeded
    Completed,
    /// Nothing to do (empty manifest); counts as success
    NoOp,
    /// The application ran and terminated
    Exited { outcome: ExitOutcome },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// Summary of a bootstrap that reached the application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapReport {
    pub steps: Vec<StepRecord>,
    /// The application's exit code, forwarded as the process exit code
    pub exit_code: i32,
}
