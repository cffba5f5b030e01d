//! Error types for the pure core.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Reading or writing `settings.json`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access service config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse service config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    /// True when the file simply does not exist yet.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// Reading or writing `hotkey_config.json`.
#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("failed to access hotkey config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse hotkey config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl HotkeyError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

/// A service or slot selection that cannot be honoured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("no service named '{0}' is configured")]
    UnknownService(String),
    #[error("service position {position} is out of range ({count} configured)")]
    ServiceOutOfRange { position: usize, count: usize },
    #[error("no service is active")]
    NoActiveService,
}

/// Login item registration failures.
#[derive(Debug, Error)]
pub enum LoginItemError {
    #[error("could not determine the home directory")]
    HomeDirUnavailable,
    #[error("could not determine the executable path: {0}")]
    Executable(#[source] io::Error),
    #[error("failed to write launch agent {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to run launchctl {verb}: {source}")]
    Launchctl {
        verb: &'static str,
        #[source]
        source: io::Error,
    },
}

/// Settings editor mutations that were rejected.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("row {row} is out of range ({len} rows)")]
    RowOutOfRange { row: usize, len: usize },
    #[error("unknown template '{0}'")]
    UnknownTemplate(String),
    #[error(transparent)]
    Persist(#[from] ConfigError),
}
