//! Configuration file loading for the terminal front end.

use std::path::{Path, PathBuf};

use chess_engine::RulesConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when loading or parsing configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Board rendering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Draw pieces with Unicode glyphs instead of ASCII letters.
    pub unicode: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { unicode: true }
    }
}

/// Top-level configuration, read from `chess.toml` by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl CliConfig {
    /// Loads configuration from `path`, or from [`Self::default_path()`] when
    /// no path is given.
    ///
    /// A missing default file yields the default configuration; an explicit
    /// path must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file cannot be read, or
    /// [`ConfigError::ParseError`] if it contains invalid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Self::default_path();
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Returns the default configuration file path, `chess.toml` in the
    /// current working directory.
    pub fn default_path() -> PathBuf {
        PathBuf::from("chess.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = CliConfig::parse(
            r#"
[rules]
detect_stalemate = false
castle_out_of_check = true
lock_finished_games = false

[display]
unicode = false
"#,
        )
        .unwrap();

        assert!(!config.rules.detect_stalemate);
        assert!(config.rules.castle_out_of_check);
        assert!(!config.rules.lock_finished_games);
        assert!(!config.display.unicode);
    }

    #[test]
    fn test_parse_empty_config_uses_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.display.unicode);
        assert!(config.rules.detect_stalemate);
    }

    #[test]
    fn test_parse_partial_rules() {
        let config = CliConfig::parse("[rules]\ncastle_out_of_check = true\n").unwrap();
        assert!(config.rules.castle_out_of_check);
        assert!(config.rules.lock_finished_games);
    }

    #[test]
    fn test_invalid_toml() {
        let result = CliConfig::parse("[rules\n");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_explicit_file() {
        let result = CliConfig::load(Some(Path::new("/nonexistent/chess.toml")));
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
