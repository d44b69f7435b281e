//! Configuration module for filestash.

use serde::Deserialize;
use std::path::Path;

use crate::{FilestashError, Result};

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port number to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

fn default_db_path() -> String {
    "data/filestash.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

/// Blob area configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Root directory that receives decoded payloads.
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

fn default_storage_path() -> String {
    crate::file::DEFAULT_STORAGE_PATH.to_string()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            storage_path: default_storage_path(),
        }
    }
}

/// Which session store backs the auth service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// `sessions` table in the main database.
    #[default]
    Sqlite,
    /// In-process map; sessions are lost on restart.
    Memory,
}

impl std::fmt::Display for SessionBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SessionBackend::Sqlite => "sqlite",
            SessionBackend::Memory => "memory",
        })
    }
}

/// Session store configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Which session store to use.
    #[serde(default)]
    pub backend: SessionBackend,
    /// Session lifetime in seconds.
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    /// Seconds between sweeps of expired sessions.
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_secs: u64,
}

fn default_session_ttl() -> u64 {
    crate::auth::SESSION_TTL_SECS
}

fn default_cleanup_interval() -> u64 {
    3600
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            ttl_secs: default_session_ttl(),
            cleanup_interval_secs: default_cleanup_interval(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/filestash.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Blob area configuration.
    #[serde(default)]
    pub files: FilesConfig,
    /// Session store configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FilestashError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| FilestashError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `FILESTASH_FOLDER_PATH`: blob area root
    /// - `FILESTASH_DB_PATH`: SQLite database file
    /// - `FILESTASH_PORT`: listen port (ignored if not a valid port)
    pub fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var("FILESTASH_FOLDER_PATH") {
            if !path.is_empty() {
                self.files.storage_path = path;
            }
        }

        if let Ok(path) = std::env::var("FILESTASH_DB_PATH") {
            if !path.is_empty() {
                self.database.path = path;
            }
        }

        if let Some(port) = std::env::var("FILESTASH_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
        {
            self.server.port = port;
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - the blob area path is empty
    /// - the session TTL or cleanup interval is zero
    pub fn validate(&self) -> Result<()> {
        if self.files.storage_path.trim().is_empty() {
            return Err(FilestashError::Config(
                "files.storage_path must not be empty".to_string(),
            ));
        }

        if self.session.ttl_secs == 0 {
            return Err(FilestashError::Config(
                "session.ttl_secs must be greater than zero".to_string(),
            ));
        }

        if self.session.cleanup_interval_secs == 0 {
            return Err(FilestashError::Config(
                "session.cleanup_interval_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);

        assert_eq!(config.database.path, "data/filestash.db");

        assert_eq!(config.files.storage_path, "/tmp/files_manager");

        assert_eq!(config.session.backend, SessionBackend::Sqlite);
        assert_eq!(config.session.ttl_secs, 86400);
        assert_eq!(config.session.cleanup_interval_secs, 3600);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.file, "logs/filestash.log");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
host = "127.0.0.1"
port = 8080

[database]
path = "custom/db.sqlite"

[files]
storage_path = "custom/files"

[session]
backend = "memory"
ttl_secs = 3600
cleanup_interval_secs = 60

[logging]
level = "debug"
file = "custom/logs/app.log"
"#;

        let config = Config::parse(toml).unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.path, "custom/db.sqlite");
        assert_eq!(config.files.storage_path, "custom/files");
        assert_eq!(config.session.backend, SessionBackend::Memory);
        assert_eq!(config.session.ttl_secs, 3600);
        assert_eq!(config.session.cleanup_interval_secs, 60);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "custom/logs/app.log");
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[server]
port = 3000
"#;

        let config = Config::parse(toml).unwrap();

        // Specified values
        assert_eq!(config.server.port, 3000);

        // Default values
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.files.storage_path, "/tmp/files_manager");
        assert_eq!(config.session.ttl_secs, 86400);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();

        assert_eq!(config.server.port, 5000);
        assert_eq!(config.database.path, "data/filestash.db");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("this is not valid toml [[[");

        match result {
            Err(FilestashError::Config(msg)) => assert!(msg.contains("config parse error")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load("nonexistent.toml");

        assert!(matches!(result, Err(FilestashError::Io(_))));
    }

    #[test]
    fn test_apply_env_overrides() {
        let original = std::env::var("FILESTASH_FOLDER_PATH").ok();

        std::env::set_var("FILESTASH_FOLDER_PATH", "/srv/blobs");

        let mut config = Config::default();
        config.apply_env_overrides();

        assert_eq!(config.files.storage_path, "/srv/blobs");

        if let Some(val) = original {
            std::env::set_var("FILESTASH_FOLDER_PATH", val);
        } else {
            std::env::remove_var("FILESTASH_FOLDER_PATH");
        }
    }

    #[test]
    fn test_load_with_env_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nbackend = \"memory\"\n").unwrap();

        let config = Config::load_with_env(&path).unwrap();

        assert_eq!(config.session.backend, SessionBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_default() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let mut config = Config::default();
        config.session.ttl_secs = 0;

        assert!(matches!(config.validate(), Err(FilestashError::Config(_))));
    }

    #[test]
    fn test_parse_rejects_unknown_backend() {
        let result = Config::parse("[session]\nbackend = \"redis\"\n");

        match result {
            Err(FilestashError::Config(msg)) => assert!(msg.contains("redis")),
            other => panic!("Expected Config error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_zero_cleanup_interval() {
        let mut config = Config::default();
        config.session.cleanup_interval_secs = 0;

        assert!(matches!(config.validate(), Err(FilestashError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_storage_path() {
        let mut config = Config::default();
        config.files.storage_path = "  ".to_string();

        assert!(config.validate().is_err());
    }
}
