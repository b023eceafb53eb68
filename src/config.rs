//! Decoder configuration
//!
//! A small serde-backed settings object. Everything has a default, so an
//! empty JSON object (or no file at all) yields a working decoder.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV_VAR: &str = "TN5250_DISSECT_CONFIG";

const CONFIG_FILE_NAME: &str = "tn5250-dissect.json";

/// Settings consumed by the conversation store and the record decoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Ports that identify the host side of a connection (telnet, telnet/TLS).
    pub host_ports: Vec<u16>,
    /// Skip a lone 0xFF marker in front of certain single-byte parameters.
    pub skip_ff_marker: bool,
    /// Maximum depth for commands that embed other commands.
    pub max_nesting_depth: usize,
    /// Attach CP037-decoded text to literal runs.
    pub decode_text: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            host_ports: vec![23, 992],
            skip_ff_marker: true,
            max_nesting_depth: 8,
            decode_text: true,
        }
    }
}

impl DecoderConfig {
    /// Parse and validate a configuration from JSON
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: DecoderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::File {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from [`default_config_path`], falling back to defaults when the
    /// file does not exist. A file that exists but does not parse is an error.
    pub fn load_or_default() -> ConfigResult<Self> {
        let path = default_config_path();
        if !path.exists() {
            log::debug!("no configuration at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(&path)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_nesting_depth == 0 {
            return Err(ConfigError::InvalidParameter {
                parameter: "max_nesting_depth".to_string(),
                value: self.max_nesting_depth.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn is_host_port(&self, port: u16) -> bool {
        self.host_ports.contains(&port)
    }
}

/// Determine a platform-appropriate default config file path.
/// Priority:
/// 1) TN5250_DISSECT_CONFIG env var
/// 2) XDG config dir (Linux) ~/.config/tn5250-dissect/tn5250-dissect.json
/// 3) macOS: ~/Library/Application Support/tn5250-dissect/tn5250-dissect.json
/// 4) Windows: %APPDATA%/tn5250-dissect/tn5250-dissect.json
/// 5) Current directory fallback: ./tn5250-dissect.json
pub fn default_config_path() -> PathBuf {
    if let Some(p) = std::env::var_os(CONFIG_ENV_VAR) {
        return PathBuf::from(p);
    }

    match platform_config_dir() {
        Some(base) => base.join("tn5250-dissect").join(CONFIG_FILE_NAME),
        // 5) Fallback
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}

#[cfg(target_os = "linux")]
fn platform_config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| Path::new(&h).join(".config")))
}

#[cfg(target_os = "macos")]
fn platform_config_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|h| Path::new(&h).join("Library").join("Application Support"))
}

#[cfg(target_os = "windows")]
fn platform_config_dir() -> Option<PathBuf> {
    std::env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
fn platform_config_dir() -> Option<PathBuf> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DecoderConfig::default();
        assert!(config.is_host_port(23));
        assert!(config.is_host_port(992));
        assert!(!config.is_host_port(50123));
        assert!(config.skip_ff_marker);
        assert_eq!(config.max_nesting_depth, 8);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DecoderConfig::from_json(r#"{ "host_ports": [2323] }"#).unwrap();
        assert_eq!(config.host_ports, vec![2323]);
        assert!(config.decode_text);
        assert_eq!(config.max_nesting_depth, 8);
    }

    #[test]
    fn test_json_round_trip() {
        let config = DecoderConfig {
            skip_ff_marker: false,
            ..DecoderConfig::default()
        };
        let json = config.to_json().unwrap();
        assert_eq!(DecoderConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = DecoderConfig::from_json(r#"{ "max_nesting_depth": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidParameter { .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = DecoderConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }
}
