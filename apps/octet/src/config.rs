//! # Application Configuration
//!
//! Settings come from an optional TOML file and are then overridden by
//! environment variables:
//!
//! | Key               | Env var                 | Default   |
//! |-------------------|-------------------------|-----------|
//! | `max_buffer_size` | `OCTET_MAX_BUFFER_SIZE` | 256 MiB   |
//! | `log_format`      | `OCTET_LOG_FORMAT`      | `text`    |
//!
//! ```toml
//! max_buffer_size = 1048576
//! log_format = "json"
//! ```

use octet_core::primitives::MAX_BUFFER_SIZE;
use octet_core::{Limits, OctetError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum size of a configuration file (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Resolved application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Largest buffer any operation may produce.
    pub max_buffer_size: usize,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            max_buffer_size: MAX_BUFFER_SIZE,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load from `path` (if given), then apply environment overrides.
    ///
    /// A missing `path` means defaults. A path that is given but cannot be
    /// read or parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, OctetError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Ok(config.with_overrides(
            std::env::var("OCTET_MAX_BUFFER_SIZE").ok().as_deref(),
            std::env::var("OCTET_LOG_FORMAT").ok().as_deref(),
        ))
    }

    fn from_file(path: &Path) -> Result<Self, OctetError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            OctetError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(OctetError::IoError(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }
        let text = std::fs::read_to_string(path)
            .map_err(|e| OctetError::IoError(format!("Cannot read config: {}", e)))?;
        Self::from_toml_str(&text)
    }

    /// Parse a TOML document. Absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, OctetError> {
        toml::from_str(text)
            .map_err(|e| OctetError::SerializationError(format!("Invalid config: {}", e)))
    }

    /// Apply raw environment values. Unparseable values are ignored with a
    /// warning.
    #[must_use]
    pub fn with_overrides(mut self, max_buffer_size: Option<&str>, log_format: Option<&str>) -> Self {
        if let Some(raw) = max_buffer_size {
            match raw.trim().parse() {
                Ok(size) => self.max_buffer_size = size,
                Err(_) => tracing::warn!(value = raw, "ignoring invalid OCTET_MAX_BUFFER_SIZE"),
            }
        }
        if let Some(raw) = log_format {
            match LogFormat::parse(raw) {
                Some(format) => self.log_format = format,
                None => tracing::warn!(value = raw, "ignoring invalid OCTET_LOG_FORMAT"),
            }
        }
        self
    }

    #[must_use]
    pub fn limits(&self) -> Limits {
        Limits {
            max_buffer_size: self.max_buffer_size,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
