use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_file")]
    pub data_file: String,

    #[serde(default = "default_counter_hide_seconds")]
    pub counter_hide_seconds: u64,

    #[serde(default = "default_log_file")]
    pub log_file: String,
}

fn app_data_dir() -> PathBuf {
    let mut path = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("twofourty");
    path
}

fn default_data_file() -> String {
    app_data_dir().join("entries.json").to_string_lossy().to_string()
}

fn default_counter_hide_seconds() -> u64 {
    3
}

fn default_log_file() -> String {
    app_data_dir().join("twofourty.log").to_string_lossy().to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: default_data_file(),
            counter_hide_seconds: default_counter_hide_seconds(),
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// Loads the config at `path`, writing a default file when none exists.
    /// A file that cannot be read or parsed falls back to defaults and is left
    /// untouched.
    pub fn load_from(path: &Path) -> Self {
        let mut config = match fs::read_to_string(path) {
            Ok(contents) => toml::from_str::<Config>(&contents).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "config file did not parse, using defaults");
                Self::default()
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let default_config = Self::default();
                if let Err(e) = default_config.save_to(path) {
                    warn!(path = %path.display(), error = %e, "could not create default config file");
                } else {
                    info!(path = %path.display(), "created default config file");
                }
                default_config
            }
            // Leave an unreadable file alone so the user's settings survive
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config file could not be read, using defaults");
                Self::default()
            }
        };

        config.data_file = expand_tilde(&config.data_file);
        config.log_file = expand_tilde(&config.log_file);
        config
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| Error::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("twofourty");
        path.push("config.toml");
        path
    }
}

fn expand_tilde(path: &str) -> String {
    if path.starts_with('~') {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_writes_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path);

        assert_eq!(config.counter_hide_seconds, 3);
        assert!(path.exists());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("counter_hide_seconds = 3"));
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "counter_hide_seconds = 10\n").unwrap();

        let config = Config::load_from(&path);

        assert_eq!(config.counter_hide_seconds, 10);
        assert_eq!(config.data_file, default_data_file());
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "counter_hide_seconds = \"soon\"").unwrap();

        let config = Config::load_from(&path);

        assert_eq!(config.counter_hide_seconds, 3);
    }

    #[test]
    fn unreadable_file_is_not_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let bytes = b"counter_hide_seconds = 7\n\xff\xfe\n";
        fs::write(&path, bytes).unwrap();

        let config = Config::load_from(&path);

        assert_eq!(config.counter_hide_seconds, 3);
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn tilde_is_expanded() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data_file = \"~/journal.json\"\n").unwrap();

        let config = Config::load_from(&path);

        if dirs::home_dir().is_some() {
            assert!(!config.data_file.starts_with('~'));
            assert!(config.data_file.ends_with("journal.json"));
        }
    }
}
