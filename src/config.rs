//! Configuration.
//!
//! This module contains the configuration read from (and written to) `config.json`.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::instrument;

/// Name of the configuration file.
pub(crate) const CONFIG_FILENAME: &str = "config.json";

/// Value of [`Config::xampp_path`] until `peach xampp <path>` has been run.
pub(crate) const UNSET_PATH: &str = "IS NOT SET";

/// The error type for reading and writing the configuration.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    /// The configuration file does not exist.
    #[error("{} configuration file is not found. Use \"setup\" command!", .0.display())]
    NotFound(PathBuf),
    /// The configuration file could not be parsed or serialised.
    #[error("configuration file {} is malformed", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Any other I/O error.
    #[error("failed to access configuration file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// The struct that holds the configuration.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub(crate) struct Config {
    /// The directory of the active XAMPP installation.
    pub(crate) xampp_path: String,
    /// The directory holding one sub-directory per saved PHP version.
    pub(crate) php_versions_folder_path: String,
}

impl Config {
    /// Creates the configuration written by `setup`.
    pub(crate) fn with_defaults(php_versions_folder: &Path) -> Self {
        Self {
            xampp_path: UNSET_PATH.to_string(),
            php_versions_folder_path: php_versions_folder.to_string_lossy().into_owned(),
        }
    }

    /// The active installation as path.
    pub(crate) fn xampp_dir(&self) -> PathBuf {
        PathBuf::from(&self.xampp_path)
    }

    /// The versions folder as path.
    pub(crate) fn php_versions_dir(&self) -> PathBuf {
        PathBuf::from(&self.php_versions_folder_path)
    }

    /// Loads the configuration from the given filename.
    #[instrument(err, level = "trace")]
    pub(crate) fn load_from_file<P>(filename: P) -> Result<Self, ConfigError>
    where
        P: AsRef<Path> + std::fmt::Debug,
    {
        let path = filename.as_ref();
        let content = fs::read_to_string(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::Io { path: path.to_path_buf(), source },
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Malformed { path: path.to_path_buf(), source })
    }

    /// Saves the configuration to the given filename (pretty-printed, two-space indentation).
    #[instrument(err, level = "trace")]
    pub(crate) fn save_to_file<P>(&self, filename: P) -> Result<(), ConfigError>
    where
        P: AsRef<Path> + std::fmt::Debug,
    {
        let path = filename.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Malformed { path: path.to_path_buf(), source })?;

        fs::write(path, content).map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })
    }
}
