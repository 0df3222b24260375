//! Application configuration loaded from a TOML file.
//!
//! The core only consumes a handful of already-typed values; richer
//! frontend settings (themes, keymaps) live with the frontends.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Top-level configuration for the directory core.
///
/// All fields have defaults so the core works without a config file.
/// Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub watcher: WatcherConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CoreError::classify(path, e))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }
}

/// Browsing preferences consumed by directory listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Whether hidden entries appear in listings.
    #[serde(default)]
    pub show_hidden: bool,
    /// Windows-only: additionally treat dot-prefixed names as hidden.
    #[serde(default)]
    pub hide_unix_style_hidden_items: bool,
    /// Whether directories sort before files.
    #[serde(default = "default_true")]
    pub sort_dirs_first: bool,
    /// Whether permanent deletion requires confirmation (consumed by
    /// frontends, not enforced here).
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            hide_unix_style_hidden_items: false,
            sort_dirs_first: true,
            confirm_delete: true,
        }
    }
}

/// Directory watch tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatcherConfig {
    /// Debounce window in milliseconds for change notifications.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_debounce_ms() -> u64 {
    200
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_values() {
        let config = Config::default();

        assert!(!config.general.show_hidden);
        assert!(!config.general.hide_unix_style_hidden_items);
        assert!(config.general.sort_dirs_first);
        assert!(config.general.confirm_delete);
        assert_eq!(config.watcher.debounce_ms, 200);
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[general]
show_hidden = true
hide_unix_style_hidden_items = true
sort_dirs_first = false
confirm_delete = false

[watcher]
debounce_ms = 500
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert!(config.general.show_hidden);
        assert!(config.general.hide_unix_style_hidden_items);
        assert!(!config.general.sort_dirs_first);
        assert!(!config.general.confirm_delete);
        assert_eq!(config.watcher.debounce_ms, 500);
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[general]
show_hidden = true
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert!(config.general.show_hidden);
        assert!(config.general.sort_dirs_first);
        assert_eq!(config.watcher.debounce_ms, 200);
    }

    #[test]
    fn load_empty_toml_uses_all_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();

        assert!(!config.general.show_hidden);
        assert!(config.general.confirm_delete);
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }
}
