use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

/// Config file looked up in the working directory when no path is given
pub const CONFIG_FILE: &str = "tasklist.toml";

/// Error type for configuration loading
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
}

/// Read and parse one config file.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// `tasklist.toml` in `dir`, if there is one
pub fn discover_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE);
    path.is_file().then_some(path)
}

/// The file config is read from: the explicit path, else `tasklist.toml` in `dir`.
/// `None` means defaults.
pub fn config_source(explicit: Option<&Path>, dir: &Path) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| discover_config(dir))
}

/// Resolve the effective config. An explicit path must exist; without one the
/// discovered file is used, falling back to defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<AppConfig, ConfigError> {
    match config_source(explicit, dir) {
        Some(path) => read_config(&path),
        None => Ok(AppConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::config::{Partitioning, Variant};
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.variant, Variant::Dated);
    }

    #[test]
    fn test_discovers_file_in_dir() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "variant = \"bulk\"\n\n[ui]\nshow_key_hints = false\n",
        )
        .unwrap();
        let config = load_config(None, tmp.path()).unwrap();
        assert_eq!(config.variant, Variant::Bulk);
        assert_eq!(config.partitioning(), Partitioning::Physical);
        assert!(!config.ui.show_key_hints);
    }

    #[test]
    fn test_explicit_path_wins() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "variant = \"bulk\"\n").unwrap();
        let other = tmp.path().join("other.toml");
        fs::write(&other, "[store]\npartitioning = \"physical\"\n").unwrap();
        let config = load_config(Some(&other), tmp.path()).unwrap();
        assert_eq!(config.variant, Variant::Dated);
        assert_eq!(config.partitioning(), Partitioning::Physical);
    }

    #[test]
    fn test_config_source_precedence() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(config_source(None, tmp.path()), None);

        let discovered = tmp.path().join(CONFIG_FILE);
        fs::write(&discovered, "").unwrap();
        assert_eq!(config_source(None, tmp.path()), Some(discovered));

        let other = tmp.path().join("other.toml");
        assert_eq!(config_source(Some(&other), tmp.path()), Some(other.clone()));
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        let err = load_config(Some(&missing), tmp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn test_parse_error_names_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "variant = 3\n").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("tasklist.toml"));
    }
}
