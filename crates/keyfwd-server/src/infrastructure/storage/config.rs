//! TOML configuration file for the server.
//!
//! The file is optional and only supplies defaults; command-line flags win.
//! Default location:
//! - Windows:  `%APPDATA%\keyfwd\server.toml`
//! - Linux:    `~/.config/keyfwd/server.toml`
//! - macOS:    `~/Library/Application Support/keyfwd/server.toml`
//!
//! Example:
//!
//! ```toml
//! client_ip = "192.168.1.20"
//! client_port = 9999
//! correct_invalid_layout = true
//! log_level = "info"
//! ```
//!
//! Every field has a serde default, so partial files load.

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
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
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Server configuration stored on disk.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Address of the client that receives redirected keys.
    #[serde(default)]
    pub client_ip: Option<IpAddr>,
    /// UDP port the client listens on.
    #[serde(default)]
    pub client_port: Option<u16>,
    /// Switch the local layout back when a key arrives in the wrong alphabet.
    #[serde(default)]
    pub correct_invalid_layout: bool,
    /// `tracing` filter used when `RUST_LOG` is unset and `--verbose` is off.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            client_ip: None,
            client_port: None,
            correct_invalid_layout: false,
            log_level: default_log_level(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the default path of the server config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("server.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads the config from its default location, returning
/// `ServerConfig::default()` when there is no file or no config directory.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<ServerConfig, ConfigError> {
    match config_file_path() {
        Ok(path) => load_config_from(&path),
        Err(ConfigError::NoPlatformConfigDir) => Ok(ServerConfig::default()),
        Err(e) => Err(e),
    }
}

/// Loads the config from `path`, returning `ServerConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<ServerConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ServerConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolves the platform config base directory including the `keyfwd` subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("keyfwd"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("keyfwd"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("keyfwd")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("keyfwd-server-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_server_config_default_has_no_client_address() {
        // Arrange / Act
        let cfg = ServerConfig::default();

        // Assert
        assert_eq!(cfg.client_ip, None);
        assert_eq!(cfg.client_port, None);
        assert!(!cfg.correct_invalid_layout);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn test_partial_toml_fills_in_defaults() {
        // Arrange
        let text = r#"
            client_ip = "10.0.0.7"
        "#;

        // Act
        let cfg: ServerConfig = toml::from_str(text).expect("parse");

        // Assert
        assert_eq!(cfg.client_ip, Some("10.0.0.7".parse().unwrap()));
        assert_eq!(cfg.client_port, None);
        assert!(!cfg.correct_invalid_layout);
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn test_unknown_tables_are_ignored() {
        // Recovery delays are not settings; an old file with them still loads.
        let text = r#"
            client_port = 9999

            [recovery]
            hold_ms = 250
        "#;

        let cfg: ServerConfig = toml::from_str(text).expect("parse");

        assert_eq!(
            cfg,
            ServerConfig {
                client_port: Some(9999),
                ..ServerConfig::default()
            }
        );
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let result: Result<ServerConfig, _> = toml::from_str("client_port = \"not a port\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let cfg = load_config_from(&temp_path("does-not-exist.toml")).expect("load");
        assert_eq!(cfg, ServerConfig::default());
    }

    #[test]
    fn test_load_existing_file() {
        // Arrange
        let path = temp_path("load/server.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "client_port = 12345\ncorrect_invalid_layout = true\n").unwrap();

        // Act
        let loaded = load_config_from(&path).expect("load");

        // Assert
        assert_eq!(loaded.client_port, Some(12345));
        assert!(loaded.correct_invalid_layout);
        let _ = std::fs::remove_file(&path);
    }
}
