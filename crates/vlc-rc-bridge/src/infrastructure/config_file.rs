//! Optional TOML configuration file.
//!
//! Every table and every key is optional; whatever the file leaves out falls
//! through to the built-in defaults.  CLI flags and environment variables
//! take precedence over anything read here (see `main.rs`).
//!
//! ```toml
//! [remote]
//! host = "localhost"
//! port = 9000
//!
//! [http]
//! bind = "0.0.0.0"
//! port = 9091
//!
//! [session]
//! drain_ms = 100
//! exchange_timeout_ms = 5000
//! connect_timeout_ms = 2000
//! banner_timeout_ms = 2000
//! reconnect_after = 3
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Error type for configuration file loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub remote: RemoteSection,
    pub http: HttpSection,
    pub session: SessionSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpSection {
    pub bind: Option<String>,
    pub port: Option<u16>,
}

/// Durations are whole milliseconds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSection {
    pub drain_ms: Option<u64>,
    pub exchange_timeout_ms: Option<u64>,
    pub connect_timeout_ms: Option<u64>,
    pub banner_timeout_ms: Option<u64>,
    /// `0` disables automatic reconnects.
    pub reconnect_after: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: Option<String>,
}

/// Parses TOML text into a [`FileConfig`].
///
/// # Errors
///
/// Returns [`ConfigError::Parse`] for malformed TOML, wrongly typed values
/// and unknown keys.
pub fn parse_config(content: &str) -> Result<FileConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Loads the config file at `path`.
///
/// The path was named explicitly by the operator, so a missing file is an
/// error rather than an empty config.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file cannot be read and
/// [`ConfigError::Parse`] if its content is invalid.
pub fn load_config_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_file_is_all_none() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg, FileConfig::default());
    }

    #[test]
    fn test_full_file_parses_every_section() {
        // Arrange
        let content = r#"
            [remote]
            host = "vlc.lan"
            port = 4212

            [http]
            bind = "127.0.0.1"
            port = 8080

            [session]
            drain_ms = 50
            exchange_timeout_ms = 2500
            connect_timeout_ms = 1000
            banner_timeout_ms = 1500
            reconnect_after = 0

            [logging]
            level = "debug"
        "#;

        // Act
        let cfg = parse_config(content).unwrap();

        // Assert
        assert_eq!(cfg.remote.host.as_deref(), Some("vlc.lan"));
        assert_eq!(cfg.remote.port, Some(4212));
        assert_eq!(cfg.http.bind.as_deref(), Some("127.0.0.1"));
        assert_eq!(cfg.http.port, Some(8080));
        assert_eq!(cfg.session.drain_ms, Some(50));
        assert_eq!(cfg.session.exchange_timeout_ms, Some(2500));
        assert_eq!(cfg.session.connect_timeout_ms, Some(1000));
        assert_eq!(cfg.session.banner_timeout_ms, Some(1500));
        assert_eq!(cfg.session.reconnect_after, Some(0));
        assert_eq!(cfg.logging.level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_partial_section_leaves_other_keys_unset() {
        let cfg = parse_config("[remote]\nport = 9100\n").unwrap();

        assert_eq!(cfg.remote.port, Some(9100));
        assert_eq!(cfg.remote.host, None);
        assert_eq!(cfg.http, HttpSection::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = parse_config("[remote]\nhots = \"typo\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let result = parse_config("[remote]\nport = \"nine thousand\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_file_reads_from_disk() {
        // Arrange
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[logging]\nlevel = \"warn\"").unwrap();

        // Act
        let cfg = load_config_file(file.path()).unwrap();

        // Assert
        assert_eq!(cfg.logging.level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_missing_file_is_an_io_error_naming_the_path() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        // Act
        let err = load_config_file(&path).unwrap_err();

        // Assert
        match err {
            ConfigError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
