use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use crate::error::PrefsError;

/// Preference key holding a preset prefix, `"custom"`, or empty for none.
pub const KEY_PROXY: &str = "githubProxy";
/// Preference key holding the normalized custom prefix.
pub const KEY_CUSTOM_PROXY: &str = "customGithubProxy";

/// String key-value storage that survives across sessions.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

/// Flat JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// `<config_dir>/prefs.json`.
    pub fn default_path() -> Result<PathBuf, PrefsError> {
        let dirs = directories::ProjectDirs::from("com", "appcatalog", "app-catalog")
            .ok_or(PrefsError::NoConfigDir)?;
        Ok(dirs.config_dir().join("prefs.json"))
    }

    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable one is reported.
    pub fn open(path: &Path) -> Result<Self, PrefsError> {
        let values = match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

/// Session-only store, used when no config directory is available.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Open the on-disk store, falling back to memory if that fails.
pub fn open_default() -> Box<dyn PreferenceStore> {
    match FileStore::default_path().and_then(|p| FileStore::open(&p)) {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "opened preference file");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!("preferences will not persist: {}", e);
            Box::new(MemoryStore::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryStore::default();
        assert!(store.get(KEY_PROXY).is_none());
        store.set(KEY_PROXY, "custom").unwrap();
        assert_eq!(store.get(KEY_PROXY).as_deref(), Some("custom"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(&dir.path().join("prefs.json")).unwrap();
        assert!(store.get(KEY_CUSTOM_PROXY).is_none());
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        {
            let mut store = FileStore::open(&path).unwrap();
            store.set(KEY_PROXY, "custom").unwrap();
            store.set(KEY_CUSTOM_PROXY, "https://p.example/").unwrap();
        }
        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get(KEY_PROXY).as_deref(), Some("custom"));
        assert_eq!(store.get(KEY_CUSTOM_PROXY).as_deref(), Some("https://p.example/"));
    }

    #[test]
    fn test_file_store_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(FileStore::open(&path), Err(PrefsError::Serialization(_))));
    }
}
