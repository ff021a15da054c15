//! Configuration loading.

use crate::cli::Mode;
use camino::Utf8Path;
use serde::Deserialize;
use std::fs;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "vue2react.json";

const DEFAULT_EXTENSIONS: &[&str] = &[".vue", ".js", ".jsx", ".ts", ".tsx"];

/// Project configuration from `vue2react.json`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// File extensions to convert when the source is a directory.
    pub extensions: Vec<String>,

    /// Extra glob patterns to ignore.
    pub ignore: Vec<String>,

    /// Default source mode.
    pub mode: Option<Mode>,
}

impl Config {
    /// Loads `vue2react.json` from `dir`, falling back to defaults when the
    /// file is missing or invalid.
    pub fn load(dir: &Utf8Path) -> Self {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Self::default();
        }

        match Self::parse(&path) {
            Ok(config) => {
                tracing::debug!(path = %path, "loaded configuration");
                config
            }
            Err(e) => {
                eprintln!("Warning: Failed to parse {}: {}", path, e);
                Self::default()
            }
        }
    }

    fn parse(path: &Utf8Path) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        serde_json::from_str(&content).map_err(|e| e.to_string())
    }

    /// Returns the file extensions to process.
    pub fn file_extensions(&self) -> Vec<&str> {
        if self.extensions.is_empty() {
            DEFAULT_EXTENSIONS.to_vec()
        } else {
            self.extensions.iter().map(|s| s.as_str()).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;

    fn temp_dir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_extensions() {
        let config = Config::default();
        assert_eq!(
            config.file_extensions(),
            [".vue", ".js", ".jsx", ".ts", ".tsx"]
        );
        assert_eq!(config.mode, None);
    }

    #[test]
    fn test_missing_file() {
        let (_guard, dir) = temp_dir();
        assert_eq!(Config::load(&dir), Config::default());
    }

    #[test]
    fn test_load_config() {
        let (_guard, dir) = temp_dir();
        fs::write(
            dir.join(CONFIG_FILE),
            r#"{ "extensions": [".vue"], "ignore": ["**/legacy/**"], "mode": "sfc" }"#,
        )
        .unwrap();

        let config = Config::load(&dir);
        assert_eq!(config.file_extensions(), [".vue"]);
        assert_eq!(config.ignore, ["**/legacy/**"]);
        assert_eq!(config.mode, Some(Mode::Sfc));
    }

    #[test]
    fn test_partial_config() {
        let (_guard, dir) = temp_dir();
        fs::write(dir.join(CONFIG_FILE), r#"{ "mode": "script" }"#).unwrap();

        let config = Config::load(&dir);
        assert_eq!(config.mode, Some(Mode::Script));
        assert!(config.ignore.is_empty());
        assert_eq!(config.file_extensions().len(), 5);
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let (_guard, dir) = temp_dir();
        fs::write(dir.join(CONFIG_FILE), "{ not json").unwrap();
        assert_eq!(Config::load(&dir), Config::default());
    }
}
