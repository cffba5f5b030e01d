//! JSON service list: `settings.json`.
//!
//! A pretty-printed array of `{id, name, url, focus_selector}` objects.
//! A missing or unreadable file yields the default services. Ids generated
//! while loading (first launch, legacy entries without an `id`) are written
//! back at once so every later load sees the same ones.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::ConfigError;
use crate::model::service::{default_services, ensure_unique_ids};
use crate::model::ServiceDefinition;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the file without falling back to defaults.
    pub fn try_load(&self) -> Result<Vec<ServiceDefinition>, ConfigError> {
        self.read().map(|(services, _)| services)
    }

    /// Service list, or the defaults when the file is absent or invalid.
    ///
    /// An empty array is a valid configuration and is returned as is. A
    /// missing file is created from the defaults; an invalid one is left
    /// alone until the next explicit save.
    pub fn load(&self) -> Vec<ServiceDefinition> {
        match self.read() {
            Ok((services, false)) => services,
            Ok((services, true)) => {
                info!(path = %self.path.display(), "assigned service ids, saving");
                self.persist(&services);
                services
            }
            Err(err) if err.is_not_found() => {
                debug!(path = %self.path.display(), "no service config yet, writing defaults");
                let services = default_services();
                self.persist(&services);
                services
            }
            Err(err) => {
                warn!(%err, "falling back to default services");
                default_services()
            }
        }
    }

    /// Parsed list, plus whether any id had to be generated or replaced.
    fn read(&self) -> Result<(Vec<ServiceDefinition>, bool), ConfigError> {
        let parse_err = |source: serde_json::Error| ConfigError::Parse {
            path: self.path.clone(),
            source,
        };
        let contents = fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let entries: Vec<Value> = serde_json::from_str(&contents).map_err(parse_err)?;
        let missing_ids = entries.iter().any(|entry| entry.get("id").is_none());
        let mut services: Vec<ServiceDefinition> =
            serde_json::from_value(Value::Array(entries)).map_err(parse_err)?;
        let replaced_ids = ensure_unique_ids(&mut services);
        Ok((services, missing_ids || replaced_ids))
    }

    fn persist(&self, services: &[ServiceDefinition]) {
        if let Err(err) = self.save(services) {
            warn!(%err, "could not save generated service ids");
        }
    }

    /// Writes the full list, creating parent directories as needed.
    pub fn save(&self, services: &[ServiceDefinition]) -> Result<(), ConfigError> {
        let io_err = |source| ConfigError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let json = serde_json::to_string_pretty(services).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })?;
        fs::write(&self.path, json).map_err(io_err)?;
        debug!(path = %self.path.display(), count = services.len(), "saved service config");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ServiceId;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("settings.json"));
        let names: Vec<String> = store.load().into_iter().map(|s| s.name).collect();
        assert_eq!(names, ["ChatGPT", "Gemini", "Grok"]);
    }

    #[test]
    fn test_first_load_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("settings.json"));
        let first = store.load();
        assert!(store.path().exists());
        assert_eq!(store.load(), first);
        assert_eq!(store.try_load().unwrap(), first);
    }

    #[test]
    fn test_invalid_json_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        let store = ConfigStore::new(&path);
        assert!(matches!(store.try_load(), Err(ConfigError::Parse { .. })));
        assert_eq!(store.load().len(), 3);
    }

    #[test]
    fn test_empty_array_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "[]").unwrap();
        assert!(ConfigStore::new(&path).load().is_empty());
    }

    #[test]
    fn test_save_then_load_keeps_ids() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nested/settings.json"));
        let services = vec![ServiceDefinition::with_id(
            ServiceId::from("x"),
            "X",
            "https://x.example",
            "#x",
        )];
        store.save(&services).unwrap();
        assert_eq!(store.load(), services);
    }

    #[test]
    fn test_legacy_entries_without_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"[{"name": "A", "url": "https://a", "focus_selector": ""},
                {"name": "B", "url": "https://b"}]"#,
        )
        .unwrap();
        let store = ConfigStore::new(&path);
        let services = store.load();
        assert_eq!(services.len(), 2);
        assert_ne!(services[0].id, services[1].id);
        assert_eq!(store.load(), services);
    }

    #[test]
    fn test_duplicate_ids_are_replaced_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(
            &path,
            r#"[{"id": "a", "name": "A", "url": "https://a"},
                {"id": "a", "name": "B", "url": "https://b"}]"#,
        )
        .unwrap();
        let store = ConfigStore::new(&path);
        let services = store.load();
        assert_eq!(services[0].id, ServiceId::from("a"));
        assert_ne!(services[1].id, services[0].id);
        assert_eq!(store.try_load().unwrap(), services);
    }

    #[test]
    fn test_invalid_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{not json").unwrap();
        ConfigStore::new(&path).load();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
    }
}
