// SPDX-License-Identifier: CC0-1.0

//! dt Configuration
//!
//! A [`Config`] holds a single setting, the project root path that call-site
//! files are made relative to. It is lazily defaulted the first time it is
//! read and can be overridden at any point:
//! - directly, with [`Config::set_root_path`]
//! - from an ordered option map, with [`Config::from_options`]
//! - from a TOML table such as `root_path = "/project"`, with
//!   [`Config::from_toml_str`] or [`Config::from_file`]
//!
//! Nothing is read from or written to disk unless the caller asks for it.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Serialize;
use thiserror::Error;

use crate::printer::MODULE_FILE;

/// Environment variable overriding the default root path
pub const ROOT_ENV_VAR: &str = "DT_ROOT";

/// Option key for the root path
const ROOT_PATH_KEY: &str = "root_path";

/// Errors that can occur when building or persisting a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No setter exists for the given option key
    #[error("Unknown option: {0}")]
    UnknownOption(String),
    /// The option exists but its value has the wrong type
    #[error("Invalid value for option {key}: expected {expected}")]
    InvalidValue {
        /// Option key
        key: String,
        /// What the setter accepts
        expected: &'static str,
    },
    /// Failed to read or write the configuration file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    /// Failed to parse the TOML configuration file
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize configuration to TOML format
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Debug print configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    root_path: OnceLock<PathBuf>,
}

/// What [`Config::save`] writes out
#[derive(Serialize)]
struct Snapshot<'a> {
    root_path: &'a Path,
}

impl Config {
    /// Create a configuration with nothing set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a configuration from ordered `(key, value)` options
    ///
    /// Each key is handed to its setter in order. The first key without a
    /// setter fails the whole construction with [`ConfigError::UnknownOption`].
    ///
    /// ```
    /// use std::path::Path;
    /// use dt::{Config, ConfigError};
    ///
    /// let conf = Config::from_options([("root_path", "/project")]).unwrap();
    /// assert_eq!(conf.root_path(), Path::new("/project"));
    ///
    /// let err = Config::from_options([("colour", "red")]).unwrap_err();
    /// assert!(matches!(err, ConfigError::UnknownOption(key) if key == "colour"));
    /// ```
    pub fn from_options<I, K, V>(options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<toml::Value>,
    {
        let mut config = Self::new();
        config.apply(options)?;
        Ok(config)
    }

    /// Apply ordered `(key, value)` options to this configuration
    ///
    /// Stops at the first failing key; keys before it stay applied.
    pub fn apply<I, K, V>(&mut self, options: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<toml::Value>,
    {
        for (key, value) in options {
            self.set_option(key.as_ref(), value.into())?;
        }
        Ok(())
    }

    /// Dispatch a single option to its setter
    pub fn set_option(&mut self, key: &str, value: toml::Value) -> Result<(), ConfigError> {
        match key {
            ROOT_PATH_KEY => match value {
                toml::Value::String(path) => {
                    self.set_root_path(path);
                    Ok(())
                }
                _ => Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    expected: "a path string",
                }),
            },
            _ => Err(ConfigError::UnknownOption(key.to_string())),
        }
    }

    /// Parse a TOML table and apply its keys in file order
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(contents)?;
        Self::from_options(table)
    }

    /// Load configuration from a TOML file at `path`
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(target: "dt", path = %path.as_ref().display(), "loaded configuration");
        Ok(config)
    }

    /// Save the resolved settings as a pretty-printed TOML file at `path`
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(&Snapshot { root_path: self.root_path() })?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Root of the project that call-site files are shown relative to
    ///
    /// Computed with [`Config::default_root_path`] on first read unless set
    /// beforehand, then cached.
    pub fn root_path(&self) -> &Path {
        self.root_path.get_or_init(Self::default_root_path)
    }

    /// Override the root path for all subsequent prints
    pub fn set_root_path(&mut self, path: impl Into<PathBuf>) {
        self.root_path = OnceLock::from(path.into());
    }

    /// Set the root path to the project enclosing `start`
    ///
    /// Uses the nearest workspace (or package) `Cargo.toml` above `start`.
    /// Returns `false` and leaves the configuration untouched when none is found.
    pub fn discover_root_path(&mut self, start: &Path) -> bool {
        match path::find_project_root(start) {
            Some(root) => {
                tracing::debug!(target: "dt", root = %root.display(), "discovered project root");
                self.set_root_path(root);
                true
            }
            None => false,
        }
    }

    /// The root path used when none is set
    ///
    /// `DT_ROOT` if present and non-empty, otherwise two directory levels
    /// above the printing module's own source file, i.e. the `dt` package root.
    pub fn default_root_path() -> PathBuf {
        Self::default_root_path_internal(
            std::env::var_os(ROOT_ENV_VAR),
            Path::new(env!("CARGO_MANIFEST_DIR")),
            Path::new(MODULE_FILE),
        )
    }

    /// Internal function for testing - allows injection of environment values
    fn default_root_path_internal(
        env_root: Option<OsString>,
        manifest_dir: &Path,
        module_file: &Path,
    ) -> PathBuf {
        match env_root {
            Some(root) if !root.is_empty() => PathBuf::from(root),
            _ => path::ancestor_dir(&path::resolve_module_file(manifest_dir, module_file), 2),
        }
    }
}
