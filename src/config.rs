//! Portcall configuration.
//!
//! Loaded from `~/.portcall/config.toml`, or from the path in
//! `PORTCALL_CONFIG`. A missing file means defaults.

use std::{env, fs, io, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

use crate::service::DEFAULT_DELAY;

/// Portcall configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Milliseconds between the last edit to a cell and its recalculation.
    pub debounce_ms: u64,

    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            debounce_ms: u64::try_from(DEFAULT_DELAY.as_millis()).unwrap_or(500),
            log_json: false,
        }
    }
}

impl Config {
    /// Load config from the resolved path, falling back to defaults when absent.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file. A missing file yields defaults.
    pub fn load_from(path: &std::path::Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `PORTCALL_CONFIG`, else `~/.portcall/config.toml`.
    pub fn path() -> Option<PathBuf> {
        if let Ok(path) = env::var("PORTCALL_CONFIG")
            && !path.is_empty()
        {
            return Some(PathBuf::from(path));
        }
        dirs::home_dir().map(|h| h.join(".portcall").join("config.toml"))
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.debounce_delay(), Duration::from_millis(500));
    }

    #[test]
    fn reads_kebab_case_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debounce-ms = 250\nlog-json = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.debounce_ms, 250);
        assert!(config.log_json);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "log-json = true\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.debounce_ms, 500);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "debounce-ms = \"soon\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.starts_with("invalid config at"));
    }
}
