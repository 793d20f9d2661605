//! Hellow Configuration
//!
//! Handles parsing and management of hellow.toml configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::context::DEFAULT_PREFIX;

/// File name searched for by [`HellowConfig::find_and_load`].
pub const CONFIG_FILE_NAME: &str = "hellow.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file not found: {0}")]
    NotFound(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Root configuration structure matching hellow.toml.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct HellowConfig {
    /// Greeting settings
    #[serde(default)]
    pub greeting: GreetingConfig,

    /// Which library backs the greeter
    #[serde(default)]
    pub library: LibraryConfig,
}

impl HellowConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: HellowConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from the current directory or parents.
    pub fn load_from_cwd() -> ConfigResult<Self> {
        let cwd = std::env::current_dir()?;
        Self::find_and_load(&cwd)
    }

    /// Find and load configuration by searching up from the given directory.
    /// Falls back to defaults when no file exists.
    pub fn find_and_load(start_dir: &Path) -> ConfigResult<Self> {
        match Self::find(start_dir) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Locate the nearest hellow.toml at or above `start_dir`.
    pub fn find(start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|path| path.is_file())
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Greeting settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GreetingConfig {
    /// Word put before the name
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl Default for GreetingConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

/// How the greeter reaches the library.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Functions linked into this binary
    #[default]
    Linked,
    /// Shared library opened at runtime
    Dynamic,
}

/// Library settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryConfig {
    /// Backend selection
    #[serde(default)]
    pub backend: Backend,

    /// Library name or path for the dynamic backend
    #[serde(default = "default_library_name")]
    pub name: String,

    /// Extra directories searched before the platform defaults
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
}

fn default_library_name() -> String {
    "hellow".to_string()
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            name: default_library_name(),
            search_paths: Vec::new(),
        }
    }
}
