//! Resolution of configuration into concrete step invocations

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::Step;
use crate::config::{BootstrapConfig, CommandSpec};
use crate::error::Result;
use crate::runner::Invocation;

/// Everything the orchestrator needs, with placeholders substituted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapPlan {
    pub workspace: PathBuf,
    /// Manifest path as configured (what the installer receives)
    pub manifest: String,
    /// Manifest path resolved against the workspace
    pub manifest_path: PathBuf,
    /// Entry point as configured (what the launcher receives)
    pub entry_point: String,
    /// Entry point resolved against the workspace
    pub entry_point_path: PathBuf,
    pub upgrade: Invocation,
    pub install: Invocation,
    pub launch: Invocation,
}

impl BootstrapPlan {
    pub fn resolve(config: &BootstrapConfig, workspace: &Path) -> Result<Self> {
        config.validate()?;

        let workspace_str = workspace.display().to_string();
        let vars = [
            ("manifest", config.manifest.as_str()),
            ("entry_point", config.entry_point.as_str()),
            ("workspace", workspace_str.as_str()),
        ];

        let invocation = |spec: &CommandSpec| Invocation {
            program: expand(&spec.program, &vars),
            args: spec.args.iter().map(|arg| expand(arg, &vars)).collect(),
            cwd: workspace.to_path_buf(),
            env: config.env.clone(),
        };

        Ok(Self {
            workspace: workspace.to_path_buf(),
            manifest: config.manifest.clone(),
            manifest_path: workspace.join(&config.manifest),
            entry_point: config.entry_point.clone(),
            entry_point_path: workspace.join(&config.entry_point),
            upgrade: invocation(&config.upgrade),
            install: invocation(&config.install),
            launch: invocation(&config.launch),
        })
    }

    pub fn invocation(&self, step: Step) -> &Invocation {
        match step {
            Step::UpgradePackageManager => &self.upgrade,
            Step::InstallDependencies => &self.install,
            Step::LaunchApplication => &self.launch,
        }
    }

    /// Environment additions shared by all steps
    pub fn env(&self) -> &BTreeMap<String, String> {
        &self.upgrade.env
    }
}

/// Substitute `{name}` placeholders; unknown placeholders are left as-is
fn expand(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (name, value)| {
        acc.replace(&format!("{{{name}}}"), value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_default_plan() {
        let workspace = Path::new("/srv/app");
        let plan = BootstrapPlan::resolve(&BootstrapConfig::default(), workspace).unwrap();

        assert_eq!(plan.upgrade.command_line(), "pip install --upgrade pip");
        assert_eq!(plan.install.command_line(), "pip install -r requirements.txt");
        assert_eq!(plan.launch.command_line(), "streamlit run app.py");
        assert_eq!(plan.manifest_path, workspace.join("requirements.txt"));
        assert_eq!(plan.entry_point_path, workspace.join("app.py"));
        for step in Step::SEQUENCE {
            assert_eq!(plan.invocation(step).cwd, workspace);
        }
    }

    #[test]
    fn test_resolve_expands_placeholders() {
        let mut config = BootstrapConfig::default();
        config.manifest = "deps/prod.txt".to_string();
        config.launch = CommandSpec::new(
            "python",
            ["{workspace}/{entry_point}", "--config={manifest}", "{unknown}"],
        );
        config.env.insert("PORT".to_string(), "8501".to_string());

        let plan = BootstrapPlan::resolve(&config, Path::new("/srv/app")).unwrap();

        assert_eq!(
            plan.launch.args,
            vec!["/srv/app/app.py", "--config=deps/prod.txt", "{unknown}"]
        );
        assert_eq!(plan.install.args, vec!["install", "-r", "deps/prod.txt"]);
        assert_eq!(plan.env().get("PORT").map(String::as_str), Some("8501"));
        assert_eq!(plan.launch.env, plan.install.env);
    }

    #[test]
    fn test_resolve_rejects_invalid_config() {
        let mut config = BootstrapConfig::default();
        config.launch.program.clear();
        assert!(BootstrapPlan::resolve(&config, Path::new("/srv/app")).is_err());
    }

    #[test]
    fn test_expand_repeated_placeholder() {
        let vars = [("manifest", "r.txt")];
        assert_eq!(expand("{manifest}:{manifest}", &vars), "r.txt:r.txt");
    }
}
