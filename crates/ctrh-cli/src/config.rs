//! # CLI Configuration
//!
//! Settings resolve in order of precedence: command-line flag, then the
//! `CTRH_NORMALIZER` environment variable, then an optional YAML file, then
//! built-in defaults.
//!
//! ```yaml
//! normalizer: constant-time
//! chunk_size: 65536
//! ```

use std::path::{Path, PathBuf};

use ctrh_core::{NormalizerKind, ParseError};
use ctrh_crypto::HashPipeline;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable overriding the configured normalizer.
pub const NORMALIZER_ENV: &str = "CTRH_NORMALIZER";

/// Default read size for streaming input.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Errors loading or resolving configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML for this schema.
    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// `CTRH_NORMALIZER` names an unknown variant.
    #[error("CTRH_NORMALIZER: {0}")]
    Env(#[source] ParseError),

    /// `chunk_size` must be positive.
    #[error("chunk_size must be at least 1")]
    ZeroChunkSize,
}

/// Resolved CLI settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Normalizer used for every subcommand.
    pub normalizer: NormalizerKind,
    /// Read size for `hash --stream`.
    pub chunk_size: usize,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerKind::default(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        // An empty file deserializes to YAML null, not an empty mapping.
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load, then apply the environment value and flag override.
    pub fn resolve(
        path: Option<&Path>,
        env_normalizer: Option<&str>,
        flag_normalizer: Option<NormalizerKind>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        if let Some(value) = env_normalizer.filter(|v| !v.trim().is_empty()) {
            config.normalizer = value.parse().map_err(ConfigError::Env)?;
        }
        if let Some(kind) = flag_normalizer {
            config.normalizer = kind;
        }
        tracing::debug!(normalizer = %config.normalizer, chunk_size = config.chunk_size, "resolved configuration");
        Ok(config)
    }

    /// Reject settings that cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::ZeroChunkSize);
        }
        Ok(())
    }

    /// The hashing pipeline these settings describe.
    pub fn pipeline(&self) -> HashPipeline {
        HashPipeline::new(self.normalizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_file() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn loads_yaml_file() {
        let file = write_config("normalizer: reference\nchunk_size: 512\n");
        let config = CliConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.normalizer, NormalizerKind::Reference);
        assert_eq!(config.chunk_size, 512);
    }

    #[test]
    fn empty_file_is_defaults() {
        let file = write_config("");
        assert_eq!(CliConfig::load(Some(file.path())).unwrap(), CliConfig::default());
    }

    #[test]
    fn rejects_unknown_fields_and_zero_chunk() {
        let file = write_config("speed: 11\n");
        assert!(matches!(
            CliConfig::load(Some(file.path())),
            Err(ConfigError::Parse { .. })
        ));
        let file = write_config("chunk_size: 0\n");
        assert!(matches!(
            CliConfig::load(Some(file.path())),
            Err(ConfigError::ZeroChunkSize)
        ));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        assert!(matches!(
            CliConfig::load(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn precedence_flag_over_env_over_file() {
        let file = write_config("normalizer: reference\n");
        let from_file = CliConfig::resolve(Some(file.path()), None, None).unwrap();
        assert_eq!(from_file.normalizer, NormalizerKind::Reference);

        let from_env = CliConfig::resolve(Some(file.path()), Some("ct"), None).unwrap();
        assert_eq!(from_env.normalizer, NormalizerKind::ConstantTime);

        let from_flag = CliConfig::resolve(
            Some(file.path()),
            Some("ct"),
            Some(NormalizerKind::Reference),
        )
        .unwrap();
        assert_eq!(from_flag.normalizer, NormalizerKind::Reference);
    }

    #[test]
    fn bad_env_value_is_reported() {
        assert!(matches!(
            CliConfig::resolve(None, Some("turbo"), None),
            Err(ConfigError::Env(_))
        ));
        // Blank values are ignored.
        assert!(CliConfig::resolve(None, Some("  "), None).is_ok());
    }
}
