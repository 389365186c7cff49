//! Configuration management for Taleweave.
//!
//! Loads configuration from ${TALEWEAVE_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for Taleweave configuration and data directories.
    //!
    //! TALEWEAVE_HOME resolution order:
    //! 1. TALEWEAVE_HOME environment variable (if set)
    //! 2. ~/.config/taleweave (default)

    use std::path::PathBuf;

    /// Returns the Taleweave home directory.
    ///
    /// Checks TALEWEAVE_HOME env var first, falls back to ~/.config/taleweave
    pub fn taleweave_home() -> PathBuf {
        if let Ok(home) = std::env::var("TALEWEAVE_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("taleweave"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        taleweave_home().join("config.toml")
    }

    /// Returns the path to the persisted bearer token.
    pub fn token_path() -> PathBuf {
        taleweave_home().join("token.json")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        taleweave_home().join("logs")
    }
}

/// Returns the default config template with comments.
///
/// This is embedded from default_config.toml at compile time.
fn default_config_template() -> &'static str {
    include_str!("../default_config.toml")
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the fairy-tale backend.
    pub base_url: String,

    /// Default language preselected in the story form.
    pub language: Option<String>,
}

impl Config {
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Writes the default config template if no config file exists yet.
    ///
    /// Returns true if a new file was created.
    pub fn init() -> Result<bool> {
        Self::init_at(&paths::config_path())
    }

    /// Writes the default config template at a specific path (if absent).
    pub fn init_at(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }
        write_config(path, default_config_template())?;
        Ok(true)
    }

    /// Saves only the base_url field to the config file.
    ///
    /// Creates the file from the template if it doesn't exist.
    /// Preserves existing fields and comments using toml_edit.
    pub fn save_base_url(base_url: &str) -> Result<()> {
        Self::save_base_url_to(&paths::config_path(), base_url)
    }

    /// Saves only the base_url field to a specific config file path.
    pub fn save_base_url_to(path: &Path, base_url: &str) -> Result<()> {
        use toml_edit::{DocumentMut, value};

        let contents = if path.exists() {
            fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?
        } else {
            default_config_template().to_string()
        };

        let mut doc: DocumentMut = contents
            .parse()
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        doc["base_url"] = value(base_url);

        write_config(path, &doc.to_string())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            language: None,
        }
    }
}

fn write_config(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.base_url, Config::DEFAULT_BASE_URL);
        assert!(config.language.is_none());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "language = \"German\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, Config::DEFAULT_BASE_URL);
        assert_eq!(config.language.as_deref(), Some("German"));
    }

    #[test]
    fn save_base_url_preserves_other_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "language = \"Russian\"\n").unwrap();

        Config::save_base_url_to(&path, "https://tales.example.com").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, "https://tales.example.com");
        assert_eq!(config.language.as_deref(), Some("Russian"));
    }

    #[test]
    fn init_creates_parseable_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert!(Config::init_at(&path).unwrap());
        assert!(!Config::init_at(&path).unwrap());
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.base_url, Config::DEFAULT_BASE_URL);
    }
}
