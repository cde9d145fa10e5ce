//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::ApiConfig;
use crate::client::{ClientOptions, DEFAULT_BASE_URL};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_session_file")]
    pub session_file: String,

    /// No timeout when absent
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_session_file() -> String {
    crate::session::default_session_path()
        .to_string_lossy()
        .to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_file: default_session_file(),
            request_timeout_secs: None,
        }
    }
}

/// Backend server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_database")]
    pub database: String,

    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_database() -> String {
    crate::store::default_database_path()
        .to_string_lossy()
        .to_string()
}

fn default_cors_origins() -> Vec<String> {
    ApiConfig::default().cors_origins
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database: default_database(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl ClientConfig {
    /// Options for [`EstateClient`](crate::client::EstateClient)
    pub fn to_client_options(&self) -> ClientOptions {
        ClientOptions {
            base_url: self.base_url.clone(),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
        }
    }
}

impl From<&ServerConfig> for ApiConfig {
    fn from(server: &ServerConfig) -> Self {
        ApiConfig {
            host: server.host.clone(),
            port: server.port,
            cors_origins: server.cors_origins.clone(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load an explicit file when given, else the default locations
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::load_with_env(path),
            None => Ok(Self::load_default()),
        }
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("estate").join("config.toml")),
            Some(PathBuf::from("./estate.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Client overrides
        if let Some(url) = var("ESTATE_API_URL") {
            self.client.base_url = url;
        }
        if let Some(file) = var("ESTATE_SESSION_FILE") {
            self.client.session_file = file;
        }

        // Server overrides
        if let Some(host) = var("ESTATE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("ESTATE_PORT") {
            match port.parse() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid ESTATE_PORT value {:?}", port),
            }
        }
        if let Some(database) = var("ESTATE_DATABASE") {
            self.server.database = database;
        }

        // Logging overrides
        if let Some(level) = var("ESTATE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("ESTATE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Estate Configuration
#
# Environment variables override these settings:
# - ESTATE_API_URL
# - ESTATE_SESSION_FILE
# - ESTATE_HOST
# - ESTATE_PORT
# - ESTATE_DATABASE
# - ESTATE_LOG_LEVEL
# - ESTATE_LOG_FORMAT

[client]
# Backend base URL
base_url = "http://localhost:8080"

# Where the CLI keeps its login flag
# session_file = "~/.local/share/estate/session.json"

# Request timeout in seconds (no timeout when unset)
# request_timeout_secs = 30

[server]
# API server host
host = "0.0.0.0"

# API server port
port = 8080

# SQLite database file
# database = "~/.local/share/estate/estate.db"

# Allowed CORS origins (empty allows any origin)
cors_origins = ["http://localhost:3000", "http://127.0.0.1:3000"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/estate/estate.log"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.client.base_url, "http://localhost:8080");
        assert_eq!(config.client.request_timeout_secs, None);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_generated_config_parses() {
        let config = Config::parse(&generate_default_config(), Path::new("estate.toml")).unwrap();
        assert_eq!(config.client.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(
            config.server.cors_origins,
            vec!["http://localhost:3000", "http://127.0.0.1:3000"]
        );
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::parse(
            "[client]\nbase_url = \"http://api:9000\"\nrequest_timeout_secs = 5\n",
            Path::new("estate.toml"),
        )
        .unwrap();

        assert_eq!(config.client.base_url, "http://api:9000");
        assert_eq!(
            config.client.to_client_options().request_timeout,
            Some(Duration::from_secs(5))
        );
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9090\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 9090);
    }

    #[test]
    fn test_load_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = Config::load(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ESTATE_API_URL", "http://remote:8080"),
            ("ESTATE_PORT", "7000"),
            ("ESTATE_DATABASE", "/tmp/estate.db"),
            ("ESTATE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.client.base_url, "http://remote:8080");
        assert_eq!(config.server.port, 7000);
        assert_eq!(config.server.database, "/tmp/estate.db");
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "ESTATE_PORT").then(|| "nope".to_string()));
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_server_to_api_config() {
        let server = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            database: "db".to_string(),
            cors_origins: vec![],
        };

        let api = ApiConfig::from(&server);
        assert_eq!(api.addr(), "127.0.0.1:9000");
        assert!(api.cors_origins.is_empty());
    }
}
