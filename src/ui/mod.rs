//! UI/Progress presentation layer
//!
//! This module handles:
//! - Step progress reporting during a bootstrap run
//! - Silent reporting for `--quiet`
//! - Plan display (see [`display`])
//!
//! Step banners go to stderr: stdout belongs to the child processes, whose
//! output is passed through untouched.

pub mod display;

use console::{Style, Term};

use crate::error::LaunchkitError;
use crate::orchestrator::{Step, StepOutcome};

/// Progress reporter for the bootstrap sequence
pub trait StepReporter {
    /// A step is about to run; `index` is 1-based
    fn step_started(&mut self, step: Step, index: usize, total: usize);

    /// A step ran to completion
    fn step_finished(&mut self, step: Step, outcome: &StepOutcome);

    /// A step failed; the sequence stops after this call
    fn step_failed(&mut self, step: Step, error: &LaunchkitError);
}

/// Console reporter printing styled step banners to stderr
pub struct ConsoleReporter {
    term: Term,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn line(&self, message: String) {
        // A closed stderr must not abort the bootstrap
        let _ = self.term.write_line(&message);
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl StepReporter for ConsoleReporter {
    fn step_started(&mut self, step: Step, index: usize, total: usize) {
        self.line(format!(
            "{} {}",
            Style::new()
                .bold()
                .cyan()
                .apply_to(format!("[{}/{}]", index, total)),
            Style::new().bold().apply_to(step.description())
        ));
    }

    fn step_finished(&mut self, step: Step, outcome: &StepOutcome) {
        match outcome {
            StepOutcome::Completed => {}
            StepOutcome::NoOp => self.line(format!(
                "      {} no dependencies declared, nothing to install",
                Style::new().dim().apply_to("-")
            )),
            StepOutcome::Exited { outcome } if !outcome.success() => self.line(format!(
                "      {} {} terminated with {}",
                Style::new().yellow().apply_to("!"),
                step.name(),
                outcome
            )),
            StepOutcome::Exited { .. } => {}
        }
    }

    fn step_failed(&mut self, step: Step, _error: &LaunchkitError) {
        self.line(format!(
            "      {} step {} ({}) failed",
            Style::new().red().bold().apply_to("✗"),
            step.number(),
            step.name()
        ));
    }
}

/// Silent reporter for quiet mode
///
/// No-op implementation that does not display anything.
#[derive(Default)]
pub struct SilentReporter;

impl StepReporter for SilentReporter {
    fn step_started(&mut self, _step: Step, _index: usize, _total: usize) {
        // No-op for silent mode
    }

    fn step_finished(&mut self, _step: Step, _outcome: &StepOutcome) {
        // No-op for silent mode
    }

    fn step_failed(&mut self, _step: Step, _error: &LaunchkitError) {
        // No-op for silent mode
    }
}
