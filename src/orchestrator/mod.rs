//! Bootstrap orchestration
//!
//! Runs the three steps of [`Step::SEQUENCE`] strictly in order. A step
//! starts only after the previous one finished successfully; the first
//! failure stops the sequence. Nothing is retried or rolled back.
//!
//! The application is launched in the foreground: the orchestrator waits
//! for it and reports its exit code as the bootstrap's own.

pub mod plan;
pub mod state;
pub mod step;


pub use plan::BootstrapPlan;
pub use state::{BootstrapReport, BootstrapState, StepOutcome, StepRecord};
pub use step::Step;

use crate::error::{LaunchkitError, Result, step as step_error};
use crate::manifest::Manifest;
use crate::runner::{CommandRunner, ExitOutcome, Invocation};
use crate::ui::StepReporter;

/// Drives one bootstrap run
pub struct Orchestrator<'a, R> {
    plan: &'a BootstrapPlan,
    runner: R,
    reporter: &'a mut dyn StepReporter,
    state: BootstrapState,
    records: Vec<StepRecord>,
}

impl<'a, R: CommandRunner> Orchestrator<'a, R> {
    pub fn new(plan: &'a BootstrapPlan, runner: R, reporter: &'a mut dyn StepReporter) -> Self {
        Self {
            plan,
            runner,
            reporter,
            state: BootstrapState::NotStarted,
            records: Vec::new(),
        }
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    /// Run the full sequence
    ///
    /// Returns the report once the application has terminated, or the
    /// error of the first step that failed.
    pub fn run(&mut self) -> Result<BootstrapReport> {
        let total = Step::SEQUENCE.len();

        for step in Step::SEQUENCE {
            self.state = BootstrapState::Running { step };
            self.reporter.step_started(step, step.number(), total);
            tracing::info!(step = %step, "{}", step.description());

            match self.execute(step) {
                Ok(outcome) => {
                    self.reporter.step_finished(step, &outcome);
                    self.records.push(StepRecord { step, outcome });
                }
                Err(err) => {
                    let status = err.exit_code();
                    tracing::warn!(step = %step, status, error = %err, "bootstrap step failed");
                    self.state = BootstrapState::Failed { step, status };
                    self.reporter.step_failed(step, &err);
                    return Err(err);
                }
            }
        }

        let exit_code = self
            .records
            .iter()
            .find_map(|record| match record.outcome {
                StepOutcome::Exited { outcome } => Some(outcome.exit_code()),
                _ => None,
            })
            .unwrap_or_default();
        self.state = BootstrapState::Launched { status: exit_code };

        Ok(BootstrapReport {
            steps: self.records.clone(),
            exit_code,
        })
    }

    fn execute(&mut self, step: Step) -> Result<StepOutcome> {
        match step {
            Step::UpgradePackageManager => self.upgrade(),
            Step::InstallDependencies => self.install(),
            Step::LaunchApplication => self.launch(),
        }
    }

    fn upgrade(&mut self) -> Result<StepOutcome> {
        let plan = self.plan;
        self.run_checked(
            Step::UpgradePackageManager,
            &plan.upgrade,
            step_error::upgrade_failed,
        )?;
        Ok(StepOutcome::Completed)
    }

    fn install(&mut self) -> Result<StepOutcome> {
        let plan = self.plan;
        let manifest = Manifest::load(&plan.manifest_path)?;

        if manifest.is_empty() {
            tracing::info!(manifest = %plan.manifest, "manifest declares no dependencies");
            return Ok(StepOutcome::NoOp);
        }

        for duplicate in manifest.duplicates() {
            tracing::warn!(
                manifest = %plan.manifest,
                package = %duplicate.name,
                first_line = duplicate.first_line,
                line = duplicate.line,
                "requirement declared more than once"
            );
        }

        tracing::debug!(
            manifest = %plan.manifest,
            entries = manifest.len(),
            requirements = manifest.requirements().count(),
            "installing from manifest"
        );
        self.run_checked(
            Step::InstallDependencies,
            &plan.install,
            step_error::install_failed,
        )?;
        Ok(StepOutcome::Completed)
    }

    fn launch(&mut self) -> Result<StepOutcome> {
        let plan = self.plan;
        if !plan.entry_point_path.exists() {
            return Err(step_error::entry_point_not_found(
                plan.entry_point_path.display().to_string(),
            ));
        }

        let outcome = self.spawn(Step::LaunchApplication, &plan.launch)?;
        if outcome.success() {
            tracing::info!("application exited successfully");
        } else {
            tracing::warn!(%outcome, "application exited unsuccessfully");
        }
        Ok(StepOutcome::Exited { outcome })
    }

    fn run_checked(
        &mut self,
        step: Step,
        invocation: &Invocation,
        on_failure: fn(String, ExitOutcome) -> LaunchkitError,
    ) -> Result<()> {
        let outcome = self.spawn(step, invocation)?;
        if outcome.success() {
            Ok(())
        } else {
            Err(on_failure(invocation.command_line(), outcome))
        }
    }

    fn spawn(&mut self, step: Step, invocation: &Invocation) -> Result<ExitOutcome> {
        tracing::debug!(step = %step, command = %invocation.command_line(), "running");
        self.runner
            .run(invocation)
            .map_err(|e| step_error::spawn_failed(step, &invocation.program, &e))
    }
}
