//! Bootstrap configuration (launchkit.yaml) data structures
//!
//! A [`ConfigLayer`] is one parsed file where every key is optional.
//! Layers are applied in order on top of [`BootstrapConfig::default`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Result, config as config_error};

/// Default dependency manifest path, relative to the workspace
pub const DEFAULT_MANIFEST: &str = "requirements.txt";

/// Default application entry point, relative to the workspace
pub const DEFAULT_ENTRY_POINT: &str = "app.py";

/// An external command: program plus arguments
///
/// Arguments may contain `{manifest}`, `{entry_point}` and `{workspace}`
/// placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandSpec {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Fully merged bootstrap configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapConfig {
    pub manifest: String,
    pub entry_point: String,
    pub upgrade: CommandSpec,
    pub install: CommandSpec,
    pub launch: CommandSpec,
    pub env: BTreeMap<String, String>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            manifest: DEFAULT_MANIFEST.to_string(),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            upgrade: CommandSpec::new("pip", ["install", "--upgrade", "pip"]),
            install: CommandSpec::new("pip", ["install", "-r", "{manifest}"]),
            launch: CommandSpec::new("streamlit", ["run", "{entry_point}"]),
            env: BTreeMap::new(),
        }
    }
}

impl BootstrapConfig {
    /// Overlay a layer; keys present in the layer win, `env` merges per key
    pub fn apply(&mut self, layer: ConfigLayer) {
        if let Some(manifest) = layer.manifest {
            self.manifest = manifest;
        }
        if let Some(entry_point) = layer.entry_point {
            self.entry_point = entry_point;
        }
        if let Some(upgrade) = layer.upgrade {
            self.upgrade = upgrade;
        }
        if let Some(install) = layer.install {
            self.install = install;
        }
        if let Some(launch) = layer.launch {
            self.launch = launch;
        }
        self.env.extend(layer.env);
    }

    /// Reject configurations no bootstrap could run with
    pub fn validate(&self) -> Result<()> {
        for (key, spec) in [
            ("upgrade", &self.upgrade),
            ("install", &self.install),
            ("launch", &self.launch),
        ] {
            if spec.program.trim().is_empty() {
                return Err(config_error::invalid(format!(
                    "'{key}.program' must not be empty"
                )));
            }
        }

        if self.manifest.trim().is_empty() {
            return Err(config_error::invalid("'manifest' must not be empty"));
        }
        if self.entry_point.trim().is_empty() {
            return Err(config_error::invalid("'entry_point' must not be empty"));
        }

        if let Some(key) = self.env.keys().find(|k| k.is_empty() || k.contains('=')) {
            return Err(config_error::invalid(format!(
                "invalid environment variable name '{key}'"
            )));
        }

        Ok(())
    }
}

/// One configuration source; absent keys leave lower layers untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub manifest: Option<String>,
    pub entry_point: Option<String>,
    pub upgrade: Option<CommandSpec>,
    pub install: Option<CommandSpec>,
    pub launch: Option<CommandSpec>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl ConfigLayer {
    /// Parse a layer from YAML; an empty document is an empty layer
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(value)
    }
}
