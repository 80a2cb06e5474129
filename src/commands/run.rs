//! Run command: the bootstrap sequence itself

use super::helpers;
use crate::cli::GlobalArgs;
use crate::error::Result;
use crate::orchestrator::{BootstrapPlan, Orchestrator};
use crate::runner::SystemRunner;
use crate::ui::{ConsoleReporter, SilentReporter, StepReporter};

/// Run the bootstrap and return the process exit code
///
/// On success the exit code is the application's own.
pub fn run(global: &GlobalArgs) -> Result<i32> {
    let plan = helpers::load_plan(global)?;
    tracing::debug!(workspace = %plan.workspace.display(), "bootstrap plan resolved");

    if global.quiet {
        bootstrap(&plan, &mut SilentReporter)
    } else {
        bootstrap(&plan, &mut ConsoleReporter::new())
    }
}

fn bootstrap(plan: &BootstrapPlan, reporter: &mut dyn StepReporter) -> Result<i32> {
    let mut orchestrator = Orchestrator::new(plan, SystemRunner, reporter);
    let result = orchestrator.run();
    debug_assert!(orchestrator.state().is_terminal());
    tracing::debug!(state = %orchestrator.state(), "bootstrap finished");
    if let Err(ref err) = result {
        tracing::debug!(step = ?err.step(), code = err.exit_code(), "bootstrap aborted");
    }

    let report = result?;
    tracing::debug!(
        steps = report.steps.len(),
        exit_code = report.exit_code,
        "application exited"
    );
    Ok(report.exit_code)
}
