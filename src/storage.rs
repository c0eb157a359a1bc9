//! Chain files: a voyage's port calls as a JSON array.
//!
//! The engine never persists anything itself. This is the CLI's way of
//! handing a chain in and getting one back out.

use std::{fs, io, path::Path};

use crate::model::PortCall;

/// Errors that can occur reading or writing a chain file.
#[derive(Debug, thiserror::Error)]
pub enum ChainFileError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid chain in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = core::result::Result<T, ChainFileError>;

/// Load a chain from a JSON file.
pub fn load_chain(path: &Path) -> Result<Vec<PortCall>> {
    let json = fs::read_to_string(path).map_err(|source| ChainFileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_chain(&json).map_err(|source| ChainFileError::Json {
        path: path.display().to_string(),
        source,
    })
}

/// Write a chain to a JSON file, pretty-printed.
pub fn save_chain(path: &Path, chain: &[PortCall]) -> Result<()> {
    let json = render_chain(chain).map_err(|source| ChainFileError::Json {
        path: path.display().to_string(),
        source,
    })?;
    fs::write(path, json).map_err(|source| ChainFileError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn parse_chain(json: &str) -> serde_json::Result<Vec<PortCall>> {
    serde_json::from_str(json)
}

pub fn render_chain(chain: &[PortCall]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(chain)
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    use crate::fixtures::sample_chain;

    #[test]
    fn save_and_load_chain() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("voyage.json");
        let chain = sample_chain();

        save_chain(&path, &chain).unwrap();
        let loaded = load_chain(&path).unwrap();

        assert_eq!(loaded, chain);
    }

    #[test]
    fn load_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = load_chain(&dir.path().join("missing.json")).unwrap_err();

        assert!(matches!(err, ChainFileError::Io { .. }));
    }

    #[test]
    fn load_malformed_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("voyage.json");
        fs::write(&path, "{ not a chain").unwrap();

        let err = load_chain(&path).unwrap_err();
        assert!(matches!(err, ChainFileError::Json { .. }));
        assert!(err.to_string().contains("voyage.json"));
    }

    #[test]
    fn rendered_timestamps_use_wire_format() {
        let json = render_chain(&sample_chain()).unwrap();
        assert!(json.contains("\"arrival\": \"2025-10-03T04:23:00\""));
    }
}
