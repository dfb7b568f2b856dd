//! Configuration file handling.
//!
//! The file is optional. Resolution order is `--config` (or the
//! `AGENTMETA_CONFIG` environment variable, which clap folds into the same
//! flag), then `<config_dir>/agentmeta/config.toml`.
//!
//! ```toml
//! [validation]
//! allowed_keys = ["name", "description", "tools", "backend", "model"]
//! allow_any = false
//!
//! [output]
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use agentmeta_core::{AllowAll, AllowList, DEFAULT_KEYS, Error, KeyValidator, MetaKey, Result};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "AGENTMETA_CONFIG";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentmetaConfig {
    /// Key validation settings.
    pub validation: ValidationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

/// `[validation]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Keys permitted in metadata blocks.
    pub allowed_keys: Vec<String>,
    /// Permit every key except `system`.
    pub allow_any: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            allowed_keys: DEFAULT_KEYS.iter().map(|k| k.as_str().to_string()).collect(),
            allow_any: false,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default rendering for `parse`.
    pub format: OutputFormat,
}

/// The per-user config file location, if the platform has a config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("agentmeta").join("config.toml"))
}

/// Resolve the config file path from an explicit path or the default.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(default_config_path)
}

impl AgentmetaConfig {
    /// Load configuration.
    ///
    /// A missing default file yields defaults; a missing explicit file is
    /// an error.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let Some(path) = resolve_config_path(explicit) else {
            log::debug!("No config directory on this platform, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(Error::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::config(e.to_string()))
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Build the key validator for one invocation.
    ///
    /// `extra` keys are added to the configured allow-list; `allow_any`
    /// overrides both the list and the configured flag.
    pub fn validator(&self, extra: &[String], allow_any: bool) -> Box<dyn KeyValidator> {
        if allow_any || self.validation.allow_any {
            return Box::new(AllowAll);
        }
        let keys = self
            .validation
            .allowed_keys
            .iter()
            .chain(extra)
            .map(|key| MetaKey::new(key.as_str()));
        Box::new(AllowList::new(keys))
    }
}
