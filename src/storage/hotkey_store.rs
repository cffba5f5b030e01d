//! Toggle hotkey preference: `hotkey_config.json`.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::HotkeyError;
use crate::model::HotkeyDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyStore {
    path: PathBuf,
}

impl HotkeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn try_load(&self) -> Result<HotkeyDescriptor, HotkeyError> {
        let contents = fs::read_to_string(&self.path).map_err(|source| HotkeyError::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| HotkeyError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Stored hotkey, or Option+Space when absent or unreadable.
    pub fn load(&self) -> HotkeyDescriptor {
        match self.try_load() {
            Ok(hotkey) => hotkey,
            Err(err) if err.is_not_found() => HotkeyDescriptor::default(),
            Err(err) => {
                warn!(%err, "keeping default hotkey");
                HotkeyDescriptor::default()
            }
        }
    }

    pub fn save(&self, hotkey: &HotkeyDescriptor) -> Result<(), HotkeyError> {
        let io_err = |source| HotkeyError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string(hotkey).map_err(|source| HotkeyError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)?;
        debug!(hotkey = %hotkey.display_string(), "saved hotkey");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Modifiers;

    #[test]
    fn test_missing_file_is_option_space() {
        let dir = tempfile::tempdir().unwrap();
        let store = HotkeyStore::new(dir.path().join("hotkey_config.json"));
        assert_eq!(store.load(), HotkeyDescriptor::default());
    }

    #[test]
    fn test_garbage_is_option_space() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hotkey_config.json");
        fs::write(&path, "[1, 2]").unwrap();
        assert_eq!(HotkeyStore::new(&path).load(), HotkeyDescriptor::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let store = HotkeyStore::new(dir.path().join("logs/hotkey_config.json"));
        let hotkey = HotkeyDescriptor::new(Modifiers::COMMAND | Modifiers::SHIFT, 40);
        store.save(&hotkey).unwrap();
        assert_eq!(store.load(), hotkey);
    }

    #[test]
    fn test_file_format() {
        let dir = tempfile::tempdir().unwrap();
        let store = HotkeyStore::new(dir.path().join("hotkey_config.json"));
        store.save(&HotkeyDescriptor::default()).unwrap();
        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"{"flags":524288,"key":49}"#);
    }
}
