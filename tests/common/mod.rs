//! Common test utilities for Launchkit integration tests

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// A test workspace for integration tests
#[allow(dead_code)]
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
    /// Isolated XDG config home so the developer's user config never leaks in
    pub config_home: TempDir,
}

impl TestWorkspace {
    /// Create a new test workspace
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let config_home = TempDir::new().expect("Failed to create config home");
        let path = temp.path().to_path_buf();
        Self {
            temp,
            path,
            config_home,
        }
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Read a file from workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Read a file, or an empty string when it does not exist
    #[allow(dead_code)]
    pub fn read_file_or_empty(&self, path: &str) -> String {
        std::fs::read_to_string(self.path.join(path)).unwrap_or_default()
    }

    /// Check if a file exists in workspace
    #[allow(dead_code)]
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Write a manifest and an entry point at their default locations
    #[allow(dead_code)]
    pub fn init_app(&self, requirements: &str) {
        self.write_file("requirements.txt", requirements);
        self.write_file("app.py", "print('hello')\n");
    }

    /// Write launchkit.yaml with one `sh -c` script per step
    ///
    /// Each script appends to `steps.log` by convention. The install script
    /// receives the manifest as `$1`, the launch script the entry point.
    #[allow(dead_code)]
    pub fn write_step_scripts(&self, upgrade: &str, install: &str, launch: &str) {
        let yaml = format!(
            "upgrade:\n  program: sh\n  args: ['-c', {}]\n\
             install:\n  program: sh\n  args: ['-c', {}, 'install', '{{manifest}}']\n\
             launch:\n  program: sh\n  args: ['-c', {}, 'launch', '{{entry_point}}']\n",
            yaml_quote(upgrade),
            yaml_quote(install),
            yaml_quote(launch),
        );
        self.write_file("launchkit.yaml", &yaml);
    }

    /// Command for the launchkit binary running inside this workspace
    pub fn cmd(&self) -> Command {
        let mut cmd = launchkit_cmd();
        cmd.current_dir(&self.path)
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env("HOME", self.config_home.path())
            .env_remove("LAUNCHKIT_CONFIG")
            .env_remove("LAUNCHKIT_MANIFEST")
            .env_remove("LAUNCHKIT_ENTRY_POINT")
            .env_remove("LAUNCHKIT_LOG");
        cmd
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Single-quoted YAML scalar
fn yaml_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn launchkit_cmd() -> Command {
    Command::cargo_bin("launchkit").expect("launchkit binary should be built")
}
