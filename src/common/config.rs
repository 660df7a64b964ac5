//! # Configuration Utilities
//!
//! TOML configuration for the codec and the command-line front end. Every field has a
//! default, so a missing file or section falls back to the stock settings.

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::processing::report::DEFAULT_REPORT_LIMIT;
use crate::processing::{EncodeOptions, TextEncoding};

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Arguments
/// - `path`: Path to the TOML configuration file
///
/// # Returns
/// - `Ok(T)`: Successfully loaded and parsed configuration
/// - `Err`: File I/O or parsing error
///
/// # Example
/// ```ignore
/// let config: AppConfig = load_config("config/stegano.toml")?;
/// ```
pub fn load_config<T>(path: &str) -> Result<T>
where
    T: for<'de> Deserialize<'de>,
{
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read config {}", path))?;
    let config: T =
        toml::from_str(&content).with_context(|| format!("Failed to parse config {}", path))?;
    Ok(config)
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub codec: CodecConfig,
    pub logging: LoggingConfig,
}

/// Codec settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// How many per-bit modification records an embedding report keeps
    pub report_limit: usize,
    /// How message text maps to payload bytes (`latin1` or `utf8`)
    pub text_encoding: TextEncoding,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            report_limit: DEFAULT_REPORT_LIMIT,
            text_encoding: TextEncoding::default(),
        }
    }
}

impl CodecConfig {
    pub fn encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            report_limit: self.report_limit,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed level, `Info` when the name is not recognised.
    pub fn level_filter(&self) -> LevelFilter {
        self.level.parse().unwrap_or(LevelFilter::Info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.codec.report_limit, 20);
        assert_eq!(config.codec.text_encoding, TextEncoding::Latin1);
    }

    #[test]
    fn partial_sections_are_filled_in() {
        let config: AppConfig = toml::from_str(
            r#"
            [codec]
            text_encoding = "utf8"
            "#,
        )
        .unwrap();

        assert_eq!(config.codec.text_encoding, TextEncoding::Utf8);
        assert_eq!(config.codec.report_limit, 20);
        assert_eq!(config.logging.level_filter(), LevelFilter::Info);
    }

    #[test]
    fn unknown_level_falls_back_to_info() {
        let logging = LoggingConfig {
            level: "chatty".to_string(),
        };
        assert_eq!(logging.level_filter(), LevelFilter::Info);

        let logging = LoggingConfig {
            level: "debug".to_string(),
        };
        assert_eq!(logging.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[codec]\nreport_limit = 5\n\n[logging]\nlevel = \"warn\"").unwrap();

        let config: AppConfig = load_config(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.codec.report_limit, 5);
        assert_eq!(config.logging.level_filter(), LevelFilter::Warn);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load_config::<AppConfig>("does/not/exist.toml").is_err());
    }
}
