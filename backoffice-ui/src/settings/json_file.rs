//! Settings persisted as a single JSON object on disk.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{SettingsBackend, SettingsError};

/// Backend writing every change through to a JSON file.
///
/// The file holds one object mapping keys to their JSON values. A missing
/// file reads as empty; parent directories are created on first write.
#[derive(Debug)]
pub struct JsonFileBackend {
    path: PathBuf,
    values: Mutex<BTreeMap<String, serde_json::Value>>,
}

impl JsonFileBackend {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_json::from_str(&text).map_err(SettingsError::Deserialization)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        log::debug!("[settings] opened {} ({} keys)", path.display(), values.len());
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, serde_json::Value>) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(values).map_err(SettingsError::Serialization)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl SettingsBackend for JsonFileBackend {
    fn get_raw(&self, key: &str) -> Result<Option<String>, SettingsError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).map(|v| v.to_string()))
    }

    fn set_raw(&self, key: &str, value: String) -> Result<(), SettingsError> {
        let parsed = serde_json::from_str(&value).map_err(SettingsError::Deserialization)?;
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        let mut next = values.clone();
        next.insert(key.to_string(), parsed);
        // Memory only changes once the file has been written
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), SettingsError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        if !values.contains_key(key) {
            return Ok(());
        }
        let mut next = values.clone();
        next.remove(key);
        self.persist(&next)?;
        *values = next;
        Ok(())
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>, SettingsError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsProvider;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("backoffice-ui-{}-{name}", std::process::id()))
            .join("ui-state.json")
    }

    #[test]
    fn values_survive_reopen() {
        let path = temp_path("reopen");
        let _ = fs::remove_file(&path);

        let settings = SettingsProvider::new(JsonFileBackend::open(&path).unwrap());
        settings.set("sidebar.facets", &true).unwrap();
        drop(settings);

        let reopened = SettingsProvider::new(JsonFileBackend::open(&path).unwrap());
        assert_eq!(reopened.get::<bool>("sidebar.facets").unwrap(), Some(true));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn missing_file_is_empty() {
        let backend = JsonFileBackend::open(temp_path("missing")).unwrap();
        assert_eq!(backend.get_raw("anything").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let path = temp_path("corrupt");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{not json").unwrap();
        assert!(matches!(
            JsonFileBackend::open(&path),
            Err(SettingsError::Deserialization(_))
        ));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn failed_write_leaves_values_untouched() {
        let path = temp_path("failed-write");
        let _ = fs::remove_dir_all(&path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{"sidebar.open": true}"#).unwrap();
        let backend = JsonFileBackend::open(&path).unwrap();

        // A directory where the file should be makes every write fail
        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(backend.set_raw("header.collapsed", "true".to_string()).is_err());
        assert_eq!(backend.get_raw("header.collapsed").unwrap(), None);

        assert!(backend.delete("sidebar.open").is_err());
        assert_eq!(backend.get_raw("sidebar.open").unwrap().as_deref(), Some("true"));

        fs::remove_dir(&path).unwrap();
    }
}
