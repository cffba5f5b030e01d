//! Where the app keeps its files.

use std::env;
use std::path::{Path, PathBuf};

use crate::model::constants::*;

/// Resolved file locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// `~/Library/Application Support/Quiper/settings.json`
    pub settings_file: PathBuf,
    /// `~/Library/Logs/quiper/hotkey_config.json`
    pub hotkey_file: PathBuf,
    /// `~/Library/Logs/quiper`
    pub log_dir: PathBuf,
    /// `~/Library/LaunchAgents`
    pub launch_agents_dir: PathBuf,
}

impl AppPaths {
    /// System locations, or everything under `$QUIPER_HOME` when set.
    pub fn resolve() -> Self {
        match env::var_os(HOME_ENV) {
            Some(root) if !root.is_empty() => Self::rooted(PathBuf::from(root)),
            _ => Self::system(),
        }
    }

    /// All files under one directory; used for sandboxed runs and tests.
    pub fn rooted(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let log_dir = root.join("logs");
        Self {
            settings_file: root.join(SETTINGS_FILE_NAME),
            hotkey_file: log_dir.join(HOTKEY_FILE_NAME),
            log_dir,
            launch_agents_dir: root.join("LaunchAgents"),
        }
    }

    fn system() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let config_dir = dirs::config_dir().unwrap_or_else(|| home.join("Library/Application Support"));
        let log_dir = home.join("Library/Logs").join(LOG_DIR_NAME);
        Self {
            settings_file: config_dir.join(APP_NAME).join(SETTINGS_FILE_NAME),
            hotkey_file: log_dir.join(HOTKEY_FILE_NAME),
            log_dir,
            launch_agents_dir: home.join("Library/LaunchAgents"),
        }
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join(LOG_FILE_NAME)
    }
}
