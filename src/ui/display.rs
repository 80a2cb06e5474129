//! Display functions for bootstrap plans
//!
//! Human-readable rendering of a resolved plan, used by the `plan` command.

use console::Style;

use crate::manifest::{EntryKind, Manifest};
use crate::orchestrator::{BootstrapPlan, Step};

macro_rules! display_field {
    ($label:expr, $value:expr) => {
        println!("{} {}", Style::new().bold().apply_to($label), $value);
    };
}

/// Display the plan, the manifest (or why it could not be read) and the env
pub fn display_plan(plan: &BootstrapPlan, manifest: Result<&Manifest, String>) {
    display_field!("Workspace:", plan.workspace.display());

    let manifest_status = match &manifest {
        Ok(manifest) if manifest.is_empty() => "no entries".to_string(),
        Ok(manifest) => format!("{} entries", manifest.len()),
        Err(reason) => Style::new().red().apply_to(reason).to_string(),
    };
    display_field!("Manifest:", format!("{} ({})", plan.manifest, manifest_status));

    let entry_status = if plan.entry_point_path.exists() {
        Style::new().green().apply_to("found")
    } else {
        Style::new().red().apply_to("missing")
    };
    display_field!("Entry point:", format!("{} ({})", plan.entry_point, entry_status));

    println!();
    println!("{}", Style::new().bold().apply_to("Steps:"));
    for step in Step::SEQUENCE {
        println!(
            "  {}. {:<8} {}",
            step.number(),
            Style::new().cyan().apply_to(step.name()),
            plan.invocation(step).command_line()
        );
    }

    if let Ok(manifest) = manifest {
        if !manifest.is_empty() {
            println!();
            println!("{}", Style::new().bold().apply_to("Dependencies:"));
            display_manifest_entries(manifest);
            display_duplicates(manifest);
        }
    }

    if !plan.env().is_empty() {
        println!();
        println!("{}", Style::new().bold().apply_to("Environment:"));
        for (key, value) in plan.env() {
            println!("  {}={}", key, value);
        }
    }
}

fn display_duplicates(manifest: &Manifest) {
    for duplicate in manifest.duplicates() {
        println!(
            "  {} {} on line {} was already declared on line {}",
            Style::new().yellow().apply_to("warning:"),
            duplicate.name,
            duplicate.line,
            duplicate.first_line
        );
    }
}

fn display_manifest_entries(manifest: &Manifest) {
    for entry in &manifest.entries {
        match &entry.kind {
            EntryKind::Requirement(requirement) => {
                let mut name = requirement.name.clone();
                if !requirement.extras.is_empty() {
                    name = format!("{}[{}]", name, requirement.extras.join(","));
                }
                print!(
                    "  {} {}",
                    Style::new().yellow().apply_to(name),
                    requirement.constraint()
                );
                if let Some(ref marker) = requirement.marker {
                    print!(" {}", Style::new().dim().apply_to(format!("; {}", marker)));
                }
                if !requirement.options.is_empty() {
                    let flags: Vec<&str> =
                        requirement.options.iter().map(|o| o.flag.as_str()).collect();
                    print!(" {}", Style::new().dim().apply_to(flags.join(" ")));
                }
                println!();
            }
            EntryKind::Directive(directive) => match directive.value {
                Some(ref value) => println!("  {} {}", directive.flag, value),
                None => println!("  {}", directive.flag),
            },
            EntryKind::Reference { target } => println!("  {}", target),
        }
    }
}
