//! Plan command: show what a bootstrap would run, without running it

use serde::Serialize;

use super::helpers;
use crate::cli::{GlobalArgs, PlanArgs};
use crate::error::Result;
use crate::manifest::{DuplicateRequirement, Manifest};
use crate::orchestrator::BootstrapPlan;
use crate::ui::display;

/// Machine-readable plan output
#[derive(Serialize)]
struct PlanReport<'a> {
    plan: &'a BootstrapPlan,
    manifest: Option<&'a Manifest>,
    manifest_error: Option<String>,
    duplicates: Vec<DuplicateRequirement>,
    entry_point_exists: bool,
}

/// Run plan command
///
/// Manifest and entry point problems are reported, not raised: they only
/// fail a real run.
pub fn run(global: &GlobalArgs, args: PlanArgs) -> Result<()> {
    let plan = helpers::load_plan(global)?;
    let manifest = Manifest::load(&plan.manifest_path).map_err(|e| e.to_string());

    if args.json {
        let report = PlanReport {
            plan: &plan,
            manifest: manifest.as_ref().ok(),
            manifest_error: manifest.as_ref().err().cloned(),
            duplicates: manifest
                .as_ref()
                .map(Manifest::duplicates)
                .unwrap_or_default(),
            entry_point_exists: plan.entry_point_path.exists(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display::display_plan(&plan, manifest.as_ref().map_err(Clone::clone));
    }

    Ok(())
}
