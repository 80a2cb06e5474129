//! The fixed bootstrap steps

use std::fmt;

use serde::Serialize;

/// One action of the bootstrap sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    UpgradePackageManager,
    InstallDependencies,
    LaunchApplication,
}

impl Step {
    /// Every step, in the only order they may run
    pub const SEQUENCE: [Step; 3] = [
        Step::UpgradePackageManager,
        Step::InstallDependencies,
        Step::LaunchApplication,
    ];

    /// 1-based position in [`Step::SEQUENCE`]
    pub fn number(self) -> usize {
        match self {
            Step::UpgradePackageManager => 1,
            Step::InstallDependencies => 2,
            Step::LaunchApplication => 3,
        }
    }

    /// Short machine name, also used as the configuration key
    pub fn name(self) -> &'static str {
        match self {
            Step::UpgradePackageManager => "upgrade",
            Step::InstallDependencies => "install",
            Step::LaunchApplication => "launch",
        }
    }

    /// Progress message shown while the step runs
    pub fn description(self) -> &'static str {
        match self {
            Step::UpgradePackageManager => "Upgrading package manager",
            Step::InstallDependencies => "Installing dependencies",
            Step::LaunchApplication => "Launching application",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
