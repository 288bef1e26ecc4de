//! Configuration management for sf.
//!
//! Loads settings from ${SF_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::store::write_atomic;

/// Returns the default config template with comments.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

pub mod paths {
    //! Path resolution for sf configuration and data directories.
    //!
    //! SF_HOME resolution order:
    //! 1. SF_HOME environment variable (if set)
    //! 2. ~/.config/sf (default)

    use std::path::PathBuf;

    /// Returns the sf home directory.
    ///
    /// Checks SF_HOME env var first, falls back to ~/.config/sf
    /// (or `.config/sf` under the working directory when there is no home).
    pub fn sf_home() -> PathBuf {
        if let Some(home) = std::env::var_os("SF_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .unwrap_or_default()
            .join(".config")
            .join("sf")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        sf_home().join("config.toml")
    }
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Login URL used when none is given on the command line
    pub login_url: String,

    /// Browser to open the login page with (system default when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,

    /// Whether `sf login` launches a browser at all
    pub open_browser: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            login_url: Self::DEFAULT_LOGIN_URL.to_string(),
            browser: None,
            open_browser: true,
        }
    }
}

impl Settings {
    pub const DEFAULT_LOGIN_URL: &'static str = "https://login.salesforce.com";

    /// Loads settings from the default path.
    ///
    /// # Errors
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads settings from a specific path.
    /// Returns defaults if file doesn't exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Settings::default())
        }
    }

    /// Writes the default config template to `path`.
    ///
    /// # Errors
    /// Returns an error if a config already exists or the write fails.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        write_atomic(path, default_config_template().as_bytes())
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}
