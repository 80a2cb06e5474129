//! Layered configuration loading
//!
//! Precedence, lowest first: built-in defaults, the user file, the
//! workspace file (or the file named by `--config`), then CLI overrides.

use std::path::{Path, PathBuf};

use super::bootstrap::{BootstrapConfig, ConfigLayer};
use crate::error::{Result, config as config_error};

/// Workspace-level configuration file name
pub const WORKSPACE_CONFIG_FILE: &str = "launchkit.yaml";

/// Values given on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub manifest: Option<String>,
    pub entry_point: Option<String>,
}

/// Path of the per-user configuration file, if the platform has a config dir
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("launchkit").join("config.yaml"))
}

/// Load the effective configuration for a workspace
pub fn load(
    workspace: &Path,
    explicit: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<BootstrapConfig> {
    load_layers(
        workspace,
        explicit,
        user_config_path().as_deref(),
        overrides,
    )
}

/// Load configuration with an explicit user file location
///
/// A missing user or workspace file is skipped; a missing `explicit` file
/// is an error.
pub fn load_layers(
    workspace: &Path,
    explicit: Option<&Path>,
    user: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<BootstrapConfig> {
    let mut config = BootstrapConfig::default();

    if let Some(path) = user.filter(|p| p.is_file()) {
        tracing::debug!(path = %path.display(), "loading user configuration");
        config.apply(read_layer(path)?);
    }

    match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(config_error::not_found(path.display().to_string()));
            }
            tracing::debug!(path = %path.display(), "loading configuration");
            config.apply(read_layer(path)?);
        }
        None => {
            let path = workspace.join(WORKSPACE_CONFIG_FILE);
            if path.is_file() {
                tracing::debug!(path = %path.display(), "loading workspace configuration");
                config.apply(read_layer(&path)?);
            }
        }
    }

    config.apply(ConfigLayer {
        manifest: overrides.manifest.clone(),
        entry_point: overrides.entry_point.clone(),
        ..ConfigLayer::default()
    });

    config.validate()?;
    Ok(config)
}

fn read_layer(path: &Path) -> Result<ConfigLayer> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path)
        .map_err(|e| config_error::read_failed(&display, e.to_string()))?;
    ConfigLayer::from_yaml(&content).map_err(|e| config_error::parse_failed(display, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaunchkitError;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_defaults_without_files() {
        let temp = TempDir::new().unwrap();
        let config =
            load_layers(temp.path(), None, None, &ConfigOverrides::default()).unwrap();
        assert_eq!(config, BootstrapConfig::default());
    }

    #[test]
    fn test_workspace_file_overrides_user_file() {
        let temp = TempDir::new().unwrap();
        let user = write(
            temp.path(),
            "user.yaml",
            "manifest: user.txt\nentry_point: user.py\n",
        );
        write(temp.path(), WORKSPACE_CONFIG_FILE, "entry_point: main.py\n");

        let config = load_layers(
            temp.path(),
            None,
            Some(&user),
            &ConfigOverrides::default(),
        )
        .unwrap();

        assert_eq!(config.manifest, "user.txt");
        assert_eq!(config.entry_point, "main.py");
    }

    #[test]
    fn test_explicit_file_replaces_workspace_file() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), WORKSPACE_CONFIG_FILE, "manifest: workspace.txt\n");
        let explicit = write(temp.path(), "ci.yaml", "entry_point: ci.py\n");

        let config = load_layers(
            temp.path(),
            Some(&explicit),
            None,
            &ConfigOverrides::default(),
        )
        .unwrap();

        assert_eq!(config.manifest, "requirements.txt");
        assert_eq!(config.entry_point, "ci.py");
    }

    #[test]
    fn test_overrides_win() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), WORKSPACE_CONFIG_FILE, "manifest: workspace.txt\n");
        let overrides = ConfigOverrides {
            manifest: Some("flag.txt".to_string()),
            entry_point: None,
        };

        let config = load_layers(temp.path(), None, None, &overrides).unwrap();
        assert_eq!(config.manifest, "flag.txt");
        assert_eq!(config.entry_point, "app.py");
    }

    #[test]
    fn test_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");
        let err = load_layers(
            temp.path(),
            Some(&missing),
            None,
            &ConfigOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LaunchkitError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_malformed_workspace_file() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), WORKSPACE_CONFIG_FILE, "launch: [not, a, map]\n");
        let err =
            load_layers(temp.path(), None, None, &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, LaunchkitError::ConfigParseFailed { .. }));
        assert!(err.to_string().contains(WORKSPACE_CONFIG_FILE));
    }

    #[test]
    fn test_invalid_merged_config() {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            WORKSPACE_CONFIG_FILE,
            "upgrade: { program: \"\" }\n",
        );
        let err =
            load_layers(temp.path(), None, None, &ConfigOverrides::default()).unwrap_err();
        assert!(matches!(err, LaunchkitError::ConfigInvalid { .. }));
    }
}
