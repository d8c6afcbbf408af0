use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::i18n::Locale;
use crate::source::DEFAULT_SOURCE;

/// Delay between successive cards appearing, in milliseconds.
pub const DEFAULT_REVEAL_STEP_MS: u64 = 50;

/// On-disk TOML settings. All fields optional so partial files work.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub source: Option<String>,
    pub locale: Option<Locale>,
    pub reveal_step_ms: Option<u64>,
}

/// Effective settings after merging CLI flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source: String,
    pub locale: Locale,
    pub reveal_step_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            locale: Locale::En,
            reveal_step_ms: DEFAULT_REVEAL_STEP_MS,
        }
    }
}

/// Values given on the command line; `None` means "not given".
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub source: Option<String>,
    pub locale: Option<Locale>,
}

impl Settings {
    /// CLI > file > defaults.
    pub fn resolve(file: ConfigFile, cli: Overrides) -> Self {
        let defaults = Self::default();
        Self {
            source: cli.source.or(file.source).unwrap_or(defaults.source),
            locale: cli.locale.or(file.locale).unwrap_or(defaults.locale),
            reveal_step_ms: file.reveal_step_ms.unwrap_or(defaults.reveal_step_ms),
        }
    }
}

/// Platform config file path: `<config_dir>/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("com", "appcatalog", "app-catalog").map(|d| d.config_dir().join("config.toml"))
}

/// Load a config file. A missing file is an empty config.
pub fn load_from_path(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };
    toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Load `explicit` if given, else the platform file. Errors are logged and
/// replaced by defaults.
pub fn load_config(explicit: Option<&Path>) -> ConfigFile {
    let path = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(p) => p,
        None => return ConfigFile::default(),
    };
    match load_from_path(&path) {
        Ok(file) => file,
        Err(e) => {
            tracing::warn!("ignoring config: {}", e);
            ConfigFile::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let s = Settings::default();
        assert_eq!(s.source, "./app_details.json");
        assert_eq!(s.locale, Locale::En);
        assert_eq!(s.reveal_step_ms, 50);
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = ConfigFile {
            source: Some("https://apps.example/".to_string()),
            locale: Some(Locale::Zh),
            reveal_step_ms: Some(0),
        };
        let cli = Overrides {
            source: Some("local.json".to_string()),
            locale: None,
        };
        let s = Settings::resolve(file, cli);
        assert_eq!(s.source, "local.json");
        assert_eq!(s.locale, Locale::Zh);
        assert_eq!(s.reveal_step_ms, 0);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "locale = \"zh\"\n").unwrap();
        let file = load_from_path(&path).unwrap();
        assert_eq!(file.locale, Some(Locale::Zh));
        assert!(file.source.is_none());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = load_from_path(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(file, ConfigFile::default());
    }

    #[test]
    fn test_load_invalid_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "locale = [").unwrap();
        assert!(matches!(load_from_path(&path), Err(ConfigError::Parse { .. })));
        assert_eq!(load_config(Some(path.as_path())), ConfigFile::default());
    }
}
