//! Session configuration.
//!
//! Configuration comes from an optional JSON document, then environment
//! overrides (`WEEKBOARD_LOG_LEVEL`, `WEEKBOARD_LOG_DIR`, `WEEKBOARD_SEED`).
//! Missing fields fall back to defaults.

use crate::logging::{default_log_level, LogLevel, LoggingError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_LOG_LEVEL: &str = "WEEKBOARD_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "WEEKBOARD_LOG_DIR";
pub const ENV_SEED: &str = "WEEKBOARD_SEED";

/// Where a session's initial data comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "path")]
pub enum SeedSource {
    #[default]
    Builtin,
    Empty,
    File(PathBuf),
}

impl SeedSource {
    /// Parses `builtin`, `empty`, or any other value as a file path.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "" => None,
            "builtin" => Some(Self::Builtin),
            "empty" => Some(Self::Empty),
            path => Some(Self::File(PathBuf::from(path))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub log_level: String,
    /// Absolute directory for rolling logs; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub seed: SeedSource,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().as_str().to_string(),
            log_dir: None,
            seed: SeedSource::Builtin,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    Logging(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Json(err) => write!(f, "invalid config document: {err}"),
            Self::Logging(err) => write!(f, "invalid logging config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::Logging(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<LoggingError> for ConfigError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl SessionConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Defaults with process environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Applies overrides from `lookup`, keyed by the `WEEKBOARD_*` names.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|value| !value.trim().is_empty()) {
            self.log_level = level.trim().to_string();
        }
        if let Some(dir) = lookup(ENV_LOG_DIR).filter(|value| !value.trim().is_empty()) {
            self.log_dir = Some(PathBuf::from(dir.trim()));
        }
        if let Some(seed) = lookup(ENV_SEED).as_deref().and_then(SeedSource::parse) {
            self.seed = seed;
        }
        self.validate()
    }

    pub fn level(&self) -> Result<LogLevel, ConfigError> {
        Ok(self.log_level.parse()?)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.level().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SeedSource, SessionConfig, ENV_LOG_LEVEL, ENV_SEED};
    use std::path::PathBuf;

    #[test]
    fn empty_document_uses_defaults() {
        let config = SessionConfig::from_json("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.seed, SeedSource::Builtin);
    }

    #[test]
    fn seed_source_decodes_tagged_shape() {
        let config =
            SessionConfig::from_json(r#"{"seed": {"kind": "file", "path": "/tmp/seed.json"}}"#)
                .unwrap();
        assert_eq!(config.seed, SeedSource::File(PathBuf::from("/tmp/seed.json")));
    }

    #[test]
    fn overrides_replace_fields() {
        let mut config = SessionConfig::default();
        config
            .apply_overrides(|key| match key {
                ENV_LOG_LEVEL => Some("warn".to_string()),
                ENV_SEED => Some("empty".to_string()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.seed, SeedSource::Empty);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn unknown_level_is_rejected() {
        let err = SessionConfig::from_json(r#"{"log_level": "loud"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Logging(_)));
    }
}
