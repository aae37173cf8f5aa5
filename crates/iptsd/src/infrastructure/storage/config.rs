//! TOML-based configuration for the daemon.
//!
//! The config file is looked up in this order:
//! 1. the path in the `IPTSD_CONFIG` environment variable,
//! 2. `$XDG_CONFIG_HOME/iptsd/config.toml`,
//! 3. `~/.config/iptsd/config.toml`.
//!
//! A missing file is not an error: the daemon starts with built-in defaults.
//!
//! ```toml
//! [daemon]
//! log_level = "info"
//!
//! [device]
//! path = "/dev/ipts/0"
//! buffer_size = 16384
//! poll_interval_ms = 10
//!
//! [stylus]
//! enabled = true
//!
//! [touch]
//! enabled = true
//! ```
//!
//! # Serde default values
//!
//! Every field carries `#[serde(default = "some_fn")]`, so a partial file (or
//! one written for an older version) fills the gaps with the defaults below.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ipts_core::HEADER_SIZE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::decode_payload::DecodeOptions;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "IPTSD_CONFIG";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory could be derived from the environment.
    #[error("could not determine config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config parsed but holds an unusable value.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level daemon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DaemonConfig {
    #[serde(default)]
    pub daemon: DaemonSection,
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub stylus: StylusConfig,
    #[serde(default)]
    pub touch: TouchConfig,
}

/// General daemon behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaemonSection {
    /// `tracing` level used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where driver buffers come from and how they are read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    /// IPTS device node, or a capture file to replay.
    #[serde(default = "default_device_path")]
    pub path: PathBuf,
    /// Largest driver buffer the daemon accepts, header included.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    /// Back-off after a read that returned no data.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StylusConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TouchConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}
fn default_device_path() -> PathBuf {
    PathBuf::from("/dev/ipts/0")
}
fn default_buffer_size() -> usize {
    16 * 1024
}
fn default_poll_interval_ms() -> u64 {
    10
}
fn default_true() -> bool {
    true
}

impl Default for DaemonSection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: default_device_path(),
            buffer_size: default_buffer_size(),
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl Default for StylusConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
        }
    }
}

impl DeviceConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl DaemonConfig {
    /// Checks values serde cannot reject on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `buffer_size` cannot hold a frame
    /// header or `poll_interval_ms` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device.buffer_size < HEADER_SIZE {
            return Err(ConfigError::Invalid(format!(
                "device.buffer_size must be at least {HEADER_SIZE} bytes, got {}",
                self.device.buffer_size
            )));
        }
        if self.device.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "device.poll_interval_ms must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Which payload event families the decoders forward.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            stylus: self.stylus.enabled,
            touch: self.touch.enabled,
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if neither `IPTSD_CONFIG`,
/// `XDG_CONFIG_HOME` nor `HOME` is set.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads the config from its resolved location.
///
/// # Errors
///
/// See [`config_file_path`] and [`load_config_from`].
pub fn load_config() -> Result<DaemonConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads and validates the config at `path`, returning defaults if the file
/// does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// [`ConfigError::Parse`] if the TOML is malformed, and
/// [`ConfigError::Invalid`] if validation fails.
pub fn load_config_from(path: &Path) -> Result<DaemonConfig, ConfigError> {
    let cfg = match std::fs::read_to_string(path) {
        Ok(content) => toml::from_str::<DaemonConfig>(&content)?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => DaemonConfig::default(),
        Err(e) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };
    cfg.validate()?;
    Ok(cfg)
}

/// `$XDG_CONFIG_HOME/iptsd` or `~/.config/iptsd`.
fn platform_config_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("iptsd"))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("iptsd_test_{}_{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    // ── Defaults ──────────────────────────────────────────────────────────────

    #[test]
    fn test_default_config_matches_documented_values() {
        let cfg = DaemonConfig::default();

        assert_eq!(cfg.daemon.log_level, "info");
        assert_eq!(cfg.device.path, PathBuf::from("/dev/ipts/0"));
        assert_eq!(cfg.device.buffer_size, 16384);
        assert_eq!(cfg.device.poll_interval(), Duration::from_millis(10));
        assert!(cfg.stylus.enabled);
        assert!(cfg.touch.enabled);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let cfg: DaemonConfig = toml::from_str("").expect("deserialize empty");
        assert_eq!(cfg, DaemonConfig::default());
    }

    #[test]
    fn test_partial_section_overrides_only_given_fields() {
        // Arrange
        let toml_str = r#"
[device]
path = "/tmp/capture.bin"

[stylus]
enabled = false
"#;

        // Act
        let cfg: DaemonConfig = toml::from_str(toml_str).expect("deserialize partial");

        // Assert
        assert_eq!(cfg.device.path, PathBuf::from("/tmp/capture.bin"));
        assert_eq!(cfg.device.buffer_size, 16384);
        assert_eq!(
            cfg.decode_options(),
            DecodeOptions {
                stylus: false,
                touch: true
            }
        );
    }

    // ── Validation ────────────────────────────────────────────────────────────

    #[test]
    fn test_buffer_smaller_than_header_is_invalid() {
        let mut cfg = DaemonConfig::default();
        cfg.device.buffer_size = HEADER_SIZE - 1;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

        cfg.device.buffer_size = HEADER_SIZE;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_poll_interval_is_invalid() {
        let mut cfg = DaemonConfig::default();
        cfg.device.poll_interval_ms = 0;
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    // ── load_config_from ──────────────────────────────────────────────────────

    #[test]
    fn test_load_missing_file_returns_defaults() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/config.toml");
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg, DaemonConfig::default());
    }

    #[test]
    fn test_load_reads_file_values() {
        let path = temp_config(
            "values",
            "[daemon]\nlog_level = \"debug\"\n[device]\nbuffer_size = 4096\n",
        );

        let cfg = load_config_from(&path).unwrap();

        assert_eq!(cfg.daemon.log_level, "debug");
        assert_eq!(cfg.device.buffer_size, 4096);
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_load_malformed_file_is_parse_error() {
        let path = temp_config("malformed", "[[[ not valid toml");

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let path = temp_config("invalid", "[device]\npoll_interval_ms = 0\n");

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn test_config_file_path_ends_with_config_toml_when_not_overridden() {
        if std::env::var_os(CONFIG_ENV_VAR).is_some() {
            return;
        }
        // Stripped environments without HOME return NoPlatformConfigDir, which is fine.
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("iptsd/config.toml"), "got {path:?}");
        }
    }
}
