use crate::error::{EditorError, Result};
use crate::import_export::codec::Format;
use crate::models::bookmark::PLACEHOLDER_TITLE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Extension suggested by the export dialog and used as the open filter
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Codec used when a path's extension does not name one
    #[serde(default)]
    pub format: Format,

    /// Pretty-print JSON exports
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Title substituted for blank titles on rename
    #[serde(default = "default_placeholder_title")]
    pub placeholder_title: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            format: Format::default(),
            pretty: default_pretty(),
            placeholder_title: default_placeholder_title(),
        }
    }
}

fn default_extension() -> String {
    "json".to_string()
}

fn default_pretty() -> bool {
    true
}

fn default_placeholder_title() -> String {
    PLACEHOLDER_TITLE.to_string()
}

impl Config {
    pub fn default_path() -> PathBuf {
        crate::utils::get_config_dir().join("config.yml")
    }

    /// Load configuration from a file path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from the default location (~/.config/bmkedit/config.yml)
    pub fn load() -> Self {
        Self::load_or_default(&Self::default_path())
    }

    /// A missing file means defaults; an unreadable or invalid one is logged
    /// and also falls back to defaults
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        Self::load_from_path(path).unwrap_or_else(|e| {
            log::warn!("Ignoring config {:?}, using defaults: {}", path, e);
            Self::default()
        })
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.placeholder_title.trim().is_empty() {
            return Err(EditorError::Config(
                "placeholder_title must not be blank".to_string(),
            ));
        }
        if self.extension.contains(['/', '\\']) {
            return Err(EditorError::Config(format!(
                "extension '{}' must not contain path separators",
                self.extension
            )));
        }
        Ok(())
    }
}
