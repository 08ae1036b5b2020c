use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::service::task_service::ServiceOptions;

const DEFAULT_DIR_NAME: &str = ".tasklist";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub strict_offsets: bool,
    pub reject_blank_names: bool,
    pub show_incomplete_only: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict_offsets: false,
            reject_blank_names: true,
            show_incomplete_only: false,
            log_level: "warn".to_string(),
        }
    }
}

impl Config {
    /// `~/.tasklist/config.json`
    pub fn default_path() -> Result<PathBuf> {
        let home_dir =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
        Ok(home_dir.join(DEFAULT_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the file at `path`, or at [`Config::default_path`] when `None`.
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(p) => p,
            None => Self::default_path()?,
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let file = File::open(path)
            .with_context(|| format!("Failed to open config {}", path.display()))?;
        let config: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn service_options(&self) -> ServiceOptions {
        ServiceOptions {
            strict_offsets: self.strict_offsets,
            reject_blank_names: self.reject_blank_names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(dir.path().join("nope.json"))).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.service_options(), ServiceOptions::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, r#"{ "strict_offsets": true, "log_level": "debug" }"#).unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.strict_offsets);
        assert!(config.reject_blank_names);
        assert!(!config.show_incomplete_only);
        assert_eq!(config.log_level, "debug");
        assert!(config.service_options().strict_offsets);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{ not json").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid config"));
    }
}
