//! Settings schema and file loading.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, VerandaError};

/// Settings for the view subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSettings {
    /// Ordered lookup paths, highest priority first.
    #[serde(default)]
    pub paths: Vec<PathBuf>,

    /// Default template file extension.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Default render-cache TTL expression (e.g. "+5 minutes").
    /// `None` disables caching unless a TTL is passed per call.
    #[serde(default)]
    pub cache_ttl: Option<String>,
}

fn default_extension() -> String {
    "tpl".to_string()
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            extension: default_extension(),
            cache_ttl: None,
        }
    }
}

impl ViewSettings {
    /// Create settings with the given lookup paths and defaults elsewhere.
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            extension: default_extension(),
            cache_ttl: None,
        }
    }
}

/// Settings for the host environment selector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentSettings {
    /// Directory holding per-host bootstrap files (`<key>.json`).
    #[serde(default)]
    pub bootstrap_dir: Option<PathBuf>,

    /// Fail with `MissingBootstrap` when a host's bootstrap file is absent.
    /// When false, the missing file is silently skipped.
    #[serde(default = "default_true")]
    pub strict_bootstrap: bool,
}

fn default_true() -> bool {
    true
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            bootstrap_dir: None,
            strict_bootstrap: true,
        }
    }
}

/// Top-level settings file contents.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub view: ViewSettings,

    #[serde(default)]
    pub environment: EnvironmentSettings,
}

/// Load settings from a JSON file.
pub fn load_settings(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(VerandaError::SettingsNotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read_to_string(path)?;
    parse_settings(&raw, path)
}

/// Parse settings from a JSON string.
///
/// Split out from [`load_settings`] so callers with in-memory content can
/// share the same diagnostics.
pub fn parse_settings(raw: &str, path: &Path) -> Result<Settings> {
    serde_json::from_str(raw).map_err(|err| VerandaError::SettingsParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}
