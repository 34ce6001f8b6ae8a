use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

pub const CONFIG_FILE: &str = "camo.toml";

/// Error type for config I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The directory holding camo.toml and the state file: `dir` if given,
/// otherwise the current directory.
pub fn resolve_data_dir(dir: Option<&Path>) -> std::io::Result<PathBuf> {
    match dir {
        Some(dir) => fs::canonicalize(dir),
        None => std::env::current_dir(),
    }
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Read camo.toml from the data directory. A missing file means defaults.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let path = config_path(data_dir);
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError { path, source: e })
}

/// Write raw config text (the `init` template) to camo.toml.
pub fn write_config_text(data_dir: &Path, text: &str) -> Result<(), ConfigError> {
    let path = config_path(data_dir);
    crate::io::recovery::atomic_write(&path, text.as_bytes())
        .map_err(|e| ConfigError::WriteError { path, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.tracker.title, crate::model::config::DEFAULT_TITLE);
        assert_eq!(config.storage.file, crate::model::config::DEFAULT_STATE_FILE);
    }

    #[test]
    fn reads_overrides() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            config_path(tmp.path()),
            "[tracker]\ntitle = \"Zombies Camos\"\n\n[storage]\nfile = \"zombies.json\"\n",
        )
        .unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(config.tracker.title, "Zombies Camos");
        assert_eq!(config.storage.file, "zombies.json");
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(config_path(tmp.path()), "[tracker\ntitle = ").unwrap();
        let err = read_config(tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("camo.toml"));
    }

    #[test]
    fn resolve_data_dir_requires_existing_dir() {
        let tmp = TempDir::new().unwrap();
        let resolved = resolve_data_dir(Some(tmp.path())).unwrap();
        assert_eq!(resolved, fs::canonicalize(tmp.path()).unwrap());
        assert!(resolve_data_dir(Some(&tmp.path().join("missing"))).is_err());
    }

    #[test]
    fn write_then_read() {
        let tmp = TempDir::new().unwrap();
        write_config_text(tmp.path(), "[ui]\nshow_progress = false\n").unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert!(!config.ui.show_progress);
    }
}
