//! Configuration for localepack
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Project config (`localepack.toml`)
//! 3. Built-in defaults (lowest priority)
//!
//! Unknown keys in the config file are not fatal; they are collected as
//! warnings so typos surface without breaking a build.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CollectorError, CollectorResult};
use crate::updater::UpdateStrategy;

/// Config file name looked up in the working directory when no `--config`
/// flag is given.
pub const DEFAULT_CONFIG_FILE: &str = "localepack.toml";

/// Runtime configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Languages to aggregate, in precedence order. Must be non-empty.
    /// Duplicates are accepted but produce undefined precedence.
    pub languages: Vec<String>,

    /// Root directory scanned for fragment files
    pub lookup_dir: PathBuf,

    /// Directory receiving `{language}.json` outputs; always excluded from
    /// fragment discovery
    pub save_dir: PathBuf,

    /// Incremental update strategy used in watch mode
    #[serde(default)]
    pub strategy: UpdateStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: Vec::new(),
            lookup_dir: PathBuf::from("."),
            save_dir: PathBuf::new(),
            strategy: UpdateStrategy::default(),
        }
    }
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> CollectorResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (unknown keys).
    ///
    /// Structural validation is deferred to [`Config::validate`] so CLI
    /// flags can still fill in or override file values first.
    pub fn load_with_warnings(path: &Path) -> CollectorResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_keys: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |key| {
            unknown_keys.push(key.to_string());
        })
        .map_err(|e| CollectorError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_keys
            .into_iter()
            .map(|key| ConfigWarning {
                key,
                file: path.to_path_buf(),
            })
            .collect();

        Ok((config, warnings))
    }

    /// Resolve both directories to absolute, lexically normalized form.
    ///
    /// The save_dir exclusion in the scanner and updater compares paths
    /// with `starts_with`, so both directories must be in one canonical
    /// form before any path comparison happens. An unset save_dir stays
    /// empty so [`Config::validate`] still rejects it.
    pub fn normalized(mut self) -> Self {
        self.lookup_dir = crate::paths::absolutize(&self.lookup_dir);
        if !self.save_dir.as_os_str().is_empty() {
            self.save_dir = crate::paths::absolutize(&self.save_dir);
        }
        self
    }

    /// Check structural invariants: a non-empty language list and a
    /// configured save directory.
    pub fn validate(&self) -> CollectorResult<()> {
        if self.languages.is_empty() {
            return Err(CollectorError::InvalidConfig {
                message: "at least one language must be configured".to_string(),
            });
        }
        if self.save_dir.as_os_str().is_empty() {
            return Err(CollectorError::InvalidConfig {
                message: "save_dir must be configured".to_string(),
            });
        }
        Ok(())
    }
}
