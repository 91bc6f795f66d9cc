//! Default manager configuration
//!
//! Hosts that do not want to pick a manager themselves point
//! `ASSETIO_DEFAULT_CONFIG` at a TOML file such as:
//!
//! ```toml
//! [manager]
//! identifier = "org.example.manager"
//! plugin_paths = ["${config_dir}/plugins"]
//!
//! [manager.settings]
//! library_path = "${config_dir}/library.json"
//! retries = 3
//! ```
//!
//! `${config_dir}` expands to the canonical directory holding the file.
//! The same file can carry a `[uiDelegate.settings]` table, used when the
//! manager's UI delegate is created as the default one.

use assetio_core::{AssetIoError, InfoDictionary, PropertyValue, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable naming the default manager config file.
pub const DEFAULT_CONFIG_ENV_VAR: &str = "ASSETIO_DEFAULT_CONFIG";

/// Placeholder replaced with the config file's directory.
pub const CONFIG_DIR_VAR: &str = "${config_dir}";

#[derive(Debug, Default, Deserialize)]
struct RawConfig {
    #[serde(default)]
    manager: RawManager,
    #[serde(default, rename = "uiDelegate")]
    ui_delegate: RawUIDelegate,
}

#[derive(Debug, Default, Deserialize)]
struct RawUIDelegate {
    #[serde(default)]
    settings: toml::Table,
}

#[derive(Debug, Default, Deserialize)]
struct RawManager {
    identifier: Option<toml::Value>,
    plugin_paths: Option<toml::Value>,
    #[serde(default)]
    settings: toml::Table,
}

/// Parsed default manager config
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultManagerConfig {
    /// Identifier of the manager to instantiate. May be empty.
    pub identifier: String,
    /// Plugin search paths, if the file lists any.
    pub plugin_paths: Option<Vec<PathBuf>>,
    /// Settings passed to the manager's `initialize`.
    pub settings: InfoDictionary,
    /// Settings passed to the UI delegate's `initialize`.
    pub ui_delegate_settings: InfoDictionary,
    /// Canonical directory of the file.
    pub config_dir: PathBuf,
}

impl DefaultManagerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_for(path.as_ref(), "manager")
    }

    /// Load the file on behalf of the default UI delegate. Only error
    /// messages differ from [`Self::load`].
    pub(crate) fn load_for_ui_delegate(path: &Path) -> Result<Self> {
        Self::load_for(path, "UI delegate")
    }

    fn load_for(path: &Path, subject: &str) -> Result<Self> {
        tracing::debug!("Loading default {} config at '{}'", subject, path.display());

        if !path.exists() {
            return Err(AssetIoError::input_validation(format!(
                "Could not load default {} config from '{}', file does not exist.",
                subject,
                path.display()
            )));
        }
        if path.is_dir() {
            return Err(AssetIoError::input_validation(format!(
                "Could not load default {} config from '{}', must be a TOML file not a directory.",
                subject,
                path.display()
            )));
        }

        let text = fs::read_to_string(path).map_err(|e| {
            AssetIoError::configuration(format!(
                "Could not read default {} config from '{}': {}",
                subject,
                path.display(),
                e
            ))
        })?;
        let config_dir = fs::canonicalize(path)
            .ok()
            .and_then(|p| p.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| path.parent().map(Path::to_path_buf).unwrap_or_default());

        Self::parse(&text, config_dir)
    }

    /// Parse config text as if it were read from a file in `config_dir`.
    pub fn parse(text: &str, config_dir: impl Into<PathBuf>) -> Result<Self> {
        let config_dir = config_dir.into();
        let raw: RawConfig = toml::from_str(text)
            .map_err(|e| AssetIoError::configuration(format!("Error parsing config file. {}", e)))?;
        let substitute = |s: &str| s.replace(CONFIG_DIR_VAR, &config_dir.to_string_lossy());

        let settings = settings_table(raw.manager.settings, &substitute)?;
        let ui_delegate_settings = settings_table(raw.ui_delegate.settings, &substitute)?;

        let plugin_paths = raw
            .manager
            .plugin_paths
            .map(|value| plugin_paths(value, &substitute))
            .transpose()?;

        // A non-string identifier reads as empty, which selects no manager.
        let identifier = raw
            .manager
            .identifier
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();

        Ok(Self {
            identifier,
            plugin_paths,
            settings,
            ui_delegate_settings,
            config_dir,
        })
    }
}

fn settings_table(table: toml::Table, substitute: &impl Fn(&str) -> String) -> Result<InfoDictionary> {
    let mut settings = InfoDictionary::new();
    for (key, value) in table {
        let value = match value {
            toml::Value::String(s) => PropertyValue::Str(substitute(&s)),
            toml::Value::Integer(i) => PropertyValue::Int(i),
            toml::Value::Float(f) => PropertyValue::Float(f),
            toml::Value::Boolean(b) => PropertyValue::Bool(b),
            _ => {
                return Err(AssetIoError::configuration(format!(
                    "Unsupported value type for '{}'.",
                    key
                )))
            }
        };
        settings.insert(key, value);
    }
    Ok(settings)
}

fn plugin_paths(value: toml::Value, substitute: &impl Fn(&str) -> String) -> Result<Vec<PathBuf>> {
    let invalid = || AssetIoError::configuration("Invalid 'plugin_paths' value, must be an array of strings.");
    let toml::Value::Array(items) = value else {
        return Err(invalid());
    };
    items
        .iter()
        .map(|item| item.as_str().map(|s| PathBuf::from(substitute(s))).ok_or_else(invalid))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("default.toml");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[manager]
identifier = "org.example.manager"
plugin_paths = ["${config_dir}/plugins", "/opt/plugins"]

[manager.settings]
library_path = "${config_dir}/library.json"
retries = 3
ratio = 0.5
verbose = true
"#,
        );

        let config = DefaultManagerConfig::load(&path).unwrap();
        let config_dir = fs::canonicalize(dir.path()).unwrap();

        assert_eq!(config.identifier, "org.example.manager");
        assert_eq!(config.config_dir, config_dir);
        assert_eq!(
            config.plugin_paths,
            Some(vec![config_dir.join("plugins"), PathBuf::from("/opt/plugins")])
        );
        assert_eq!(
            config.settings.get("library_path"),
            Some(&PropertyValue::Str(format!("{}/library.json", config_dir.display())))
        );
        assert_eq!(config.settings.get("retries"), Some(&PropertyValue::Int(3)));
        assert_eq!(config.settings.get("ratio"), Some(&PropertyValue::Float(0.5)));
        assert_eq!(config.settings.get("verbose"), Some(&PropertyValue::Bool(true)));
    }

    #[test]
    fn test_minimal_config() {
        let config = DefaultManagerConfig::parse("[manager]\nidentifier = \"a\"\n", "/configs").unwrap();
        assert_eq!(config.identifier, "a");
        assert_eq!(config.plugin_paths, None);
        assert!(config.settings.is_empty());

        let empty = DefaultManagerConfig::parse("", "/configs").unwrap();
        assert_eq!(empty.identifier, "");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DefaultManagerConfig::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, AssetIoError::InputValidation(_)));
        assert!(err.message().ends_with("nope.toml', file does not exist."));
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = DefaultManagerConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, AssetIoError::InputValidation(_)));
        assert!(err.message().ends_with("must be a TOML file not a directory."));
    }

    #[test]
    fn test_syntax_error() {
        let err = DefaultManagerConfig::parse("[manager\nidentifier = ", "/configs").unwrap_err();
        assert!(matches!(err, AssetIoError::Configuration(_)));
        assert!(err.message().starts_with("Error parsing config file. "));
    }

    #[test]
    fn test_unsupported_setting_type() {
        let err = DefaultManagerConfig::parse(
            "[manager]\nidentifier = \"a\"\n[manager.settings]\nlist = [1, 2]\n",
            "/configs",
        )
        .unwrap_err();
        assert_eq!(err, AssetIoError::configuration("Unsupported value type for 'list'."));
    }

    #[test]
    fn test_invalid_plugin_paths() {
        for bad in ["plugin_paths = \"/one/path\"", "plugin_paths = [\"/ok\", 3]"] {
            let text = format!("[manager]\nidentifier = \"a\"\n{}\n", bad);
            let err = DefaultManagerConfig::parse(&text, "/configs").unwrap_err();
            assert_eq!(
                err,
                AssetIoError::configuration("Invalid 'plugin_paths' value, must be an array of strings.")
            );
        }
    }

    #[test]
    fn test_non_string_identifier_reads_as_empty() {
        for bad in ["identifier = 3", "identifier = true", "identifier = [\"a\"]"] {
            let text = format!("[manager]\n{}\n", bad);
            let config = DefaultManagerConfig::parse(&text, "/configs").unwrap();
            assert_eq!(config.identifier, "");
        }
    }

    #[test]
    fn test_ui_delegate_settings() {
        let config = DefaultManagerConfig::parse(
            "[manager]\nidentifier = \"a\"\n[manager.settings]\nretries = 3\n[uiDelegate.settings]\nicons = \"${config_dir}/icons\"\ncompact = true\n",
            "/configs",
        )
        .unwrap();

        assert_eq!(config.settings.len(), 1);
        assert_eq!(
            config.ui_delegate_settings.get("icons"),
            Some(&PropertyValue::from("/configs/icons"))
        );
        assert_eq!(config.ui_delegate_settings.get("compact"), Some(&PropertyValue::Bool(true)));

        let err = DefaultManagerConfig::parse("[uiDelegate.settings]\nnested = { a = 1 }\n", "/configs").unwrap_err();
        assert_eq!(err, AssetIoError::configuration("Unsupported value type for 'nested'."));
    }
}
