//! Configuration management
//!
//! This module handles loading and parsing configuration for the Quizdesk console service.
//! Configuration can be loaded from:
//! - config.yml file
//! - Environment variables (override file settings)
//!
//! Missing optional values are filled with sensible defaults.

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Quiz backend configuration
    #[serde(default)]
    pub backend: BackendConfig,
    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            backend: BackendConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
    /// CORS allowed origin (for cookie-based auth)
    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "http://localhost:3000".to_string()
}

/// Quiz backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the quiz backend REST API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:9000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// Session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session lifetime in minutes
    #[serde(default = "default_ttl_minutes")]
    pub ttl_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_minutes: default_ttl_minutes(),
        }
    }
}

fn default_ttl_minutes() -> u64 {
    60
}

/// Error type for configuration parsing
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

impl Config {
    /// Load configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    /// If the file exists but is invalid YAML, returns an error with details.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?;

        // Handle empty file - return defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: format_yaml_error(&e),
            })?;

        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file with environment variable overrides
    ///
    /// Environment variables follow the pattern:
    /// - QUIZDESK_SERVER_HOST
    /// - QUIZDESK_SERVER_PORT
    /// - QUIZDESK_SERVER_CORS_ORIGIN
    /// - QUIZDESK_BACKEND_BASE_URL
    /// - QUIZDESK_BACKEND_TIMEOUT_SECS
    /// - QUIZDESK_SESSION_TTL_MINUTES
    pub fn load_with_env(path: &std::path::Path) -> anyhow::Result<Self> {
        let mut config = Self::load(path)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides to the configuration
    fn apply_env_overrides(&mut self) {
        // Server configuration
        if let Ok(host) = std::env::var("QUIZDESK_SERVER_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("QUIZDESK_SERVER_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                self.server.port = port;
            }
        }
        if let Ok(cors_origin) = std::env::var("QUIZDESK_SERVER_CORS_ORIGIN") {
            self.server.cors_origin = cors_origin;
        }

        // Backend configuration
        if let Ok(base_url) = std::env::var("QUIZDESK_BACKEND_BASE_URL") {
            self.backend.base_url = base_url;
        }
        if let Ok(timeout) = std::env::var("QUIZDESK_BACKEND_TIMEOUT_SECS") {
            if let Ok(timeout) = timeout.parse::<u64>() {
                self.backend.timeout_secs = timeout;
            }
        }

        // Session configuration
        if let Ok(ttl) = std::env::var("QUIZDESK_SESSION_TTL_MINUTES") {
            if let Ok(ttl) = ttl.parse::<u64>() {
                self.session.ttl_minutes = ttl;
            }
        }
    }

    /// Reject values that would make the service unusable at runtime
    fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.base_url.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "backend.base_url must not be empty".to_string(),
            ));
        }
        if self.session.ttl_minutes == 0 {
            return Err(ConfigError::ValidationError(
                "session.ttl_minutes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Format YAML parsing error with location and context
fn format_yaml_error(e: &serde_yaml::Error) -> String {
    if let Some(location) = e.location() {
        format!(
            "at line {}, column {}: {}",
            location.line(),
            location.column(),
            e
        )
    } else {
        e.to_string()
    }
}

// Shared mutex for all config tests that modify environment variables.
// Both `tests` and `property_tests` modules use this to prevent race conditions.
#[cfg(test)]
static CONFIG_ENV_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
fn remove_all_env_overrides() {
    std::env::remove_var("QUIZDESK_SERVER_HOST");
    std::env::remove_var("QUIZDESK_SERVER_PORT");
    std::env::remove_var("QUIZDESK_SERVER_CORS_ORIGIN");
    std::env::remove_var("QUIZDESK_BACKEND_BASE_URL");
    std::env::remove_var("QUIZDESK_BACKEND_TIMEOUT_SECS");
    std::env::remove_var("QUIZDESK_SESSION_TTL_MINUTES");
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        super::CONFIG_ENV_MUTEX
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    // ============================================================================
    // Strategies for generating test data
    // ============================================================================

    fn valid_host_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
                .prop_map(|(a, b, c, d)| format!("{}.{}.{}.{}", a, b, c, d)),
            Just("localhost".to_string()),
            Just("0.0.0.0".to_string()),
            Just("127.0.0.1".to_string()),
            "[a-z][a-z0-9]{0,10}".prop_map(|s| s),
        ]
    }

    fn valid_port_strategy() -> impl Strategy<Value = u16> {
        1u16..=65535
    }

    fn valid_base_url_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("http://localhost:9000".to_string()),
            Just("https://quiz-api.example.com".to_string()),
            "[a-z][a-z0-9]{0,10}".prop_map(|s| format!("http://{}.internal:9000", s)),
        ]
    }

    fn valid_timeout_strategy() -> impl Strategy<Value = u64> {
        1u64..=300
    }

    fn valid_ttl_strategy() -> impl Strategy<Value = u64> {
        1u64..=1440 // 1 minute to 24 hours
    }

    fn valid_config_strategy() -> impl Strategy<Value = Config> {
        (
            valid_host_strategy(),
            valid_port_strategy(),
            valid_base_url_strategy(),
            valid_timeout_strategy(),
            valid_ttl_strategy(),
        )
            .prop_map(|(host, port, base_url, timeout_secs, ttl_minutes)| Config {
                server: ServerConfig {
                    host,
                    port,
                    cors_origin: "http://localhost:3000".to_string(),
                },
                backend: BackendConfig {
                    base_url,
                    timeout_secs,
                },
                session: SessionConfig { ttl_minutes },
            })
    }

    /// YAML strings that are either syntactically invalid or carry wrong types
    fn malformed_yaml_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("server:\n  port: not_a_number".to_string()),
            Just("server:\n  port: \"8080\"".to_string()),
            Just("server:\n  port: true".to_string()),
            Just("server:\n  port: [1, 2, 3]".to_string()),
            Just("server:\n  port: 99999999999999999999".to_string()),
            Just("backend:\n  timeout_secs: invalid".to_string()),
            Just("backend:\n  timeout_secs: -5".to_string()),
            Just("session:\n  ttl_minutes: soon".to_string()),
            Just("session:\n  ttl_minutes: -60".to_string()),
            Just("server: [invalid, list, for, server]".to_string()),
            Just("server: 12345".to_string()),
            Just("backend: \"just_a_string\"".to_string()),
            Just("session: true".to_string()),
        ]
    }

    /// Partial config YAML (missing some fields)
    fn partial_config_yaml_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            (valid_host_strategy(), valid_port_strategy()).prop_map(|(host, port)| format!(
                "server:\n  host: \"{}\"\n  port: {}\n",
                host, port
            )),
            Just("backend:\n  base_url: \"http://localhost:9000\"\n".to_string()),
            Just("backend:\n  timeout_secs: 20\n".to_string()),
            Just("session:\n  ttl_minutes: 90\n".to_string()),
            Just("server:\n  port: 9000\n".to_string()),
            Just("".to_string()),
            Just("   \n\n   ".to_string()),
        ]
    }

    // ============================================================================
    // Property Tests
    // ============================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(20))]

        /// For any valid config structure, serializing to YAML and parsing back
        /// should yield equivalent config.
        #[test]
        fn property_config_roundtrip(config in valid_config_strategy()) {
            let yaml = serde_yaml::to_string(&config).expect("Failed to serialize config");

            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "{}", yaml).expect("Failed to write config");

            let parsed = Config::load(file.path()).expect("Failed to parse config");

            prop_assert_eq!(config.server.host, parsed.server.host);
            prop_assert_eq!(config.server.port, parsed.server.port);
            prop_assert_eq!(config.server.cors_origin, parsed.server.cors_origin);
            prop_assert_eq!(config.backend.base_url, parsed.backend.base_url);
            prop_assert_eq!(config.backend.timeout_secs, parsed.backend.timeout_secs);
            prop_assert_eq!(config.session.ttl_minutes, parsed.session.ttl_minutes);
        }

        /// For any config file missing optional items, parsing should fill
        /// with predefined defaults.
        #[test]
        fn property_config_default_filling(yaml in partial_config_yaml_strategy()) {
            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "{}", yaml).expect("Failed to write config");

            let config = Config::load(file.path()).expect("Failed to parse config");

            prop_assert!(!config.server.host.is_empty(), "Host should not be empty");
            prop_assert!(config.server.port > 0, "Port should be positive");
            prop_assert!(!config.backend.base_url.is_empty(), "Base URL should not be empty");
            prop_assert!(config.backend.timeout_secs > 0, "Timeout should be positive");
            prop_assert!(config.session.ttl_minutes > 0, "TTL should be positive");

            if yaml.trim().is_empty() {
                prop_assert_eq!(config.server.host, "0.0.0.0");
                prop_assert_eq!(config.server.port, 8080);
                prop_assert_eq!(config.backend.base_url, "http://localhost:9000");
                prop_assert_eq!(config.backend.timeout_secs, 10);
                prop_assert_eq!(config.session.ttl_minutes, 60);
            }
        }

        /// For any malformed config file, parsing should return a detailed error.
        #[test]
        fn property_invalid_config_error_handling(yaml in malformed_yaml_strategy()) {
            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "{}", yaml).expect("Failed to write config");

            let result = Config::load(file.path());

            prop_assert!(result.is_err(), "Malformed YAML should produce an error");

            let err = result.unwrap_err();
            let err_msg = err.to_string();
            prop_assert!(
                err_msg.len() > 10,
                "Error message should be descriptive: {}",
                err_msg
            );
        }

        /// Env vars take precedence over file values.
        #[test]
        fn property_env_precedence_over_file(
            file_port in 1000u16..2000,
            env_port in 3000u16..4000,
        ) {
            let _guard = lock_env();
            super::remove_all_env_overrides();

            let mut file = NamedTempFile::new().expect("Failed to create temp file");
            write!(file, "server:\n  port: {}\n", file_port).expect("Failed to write config");

            std::env::set_var("QUIZDESK_SERVER_PORT", env_port.to_string());

            let config = Config::load_with_env(file.path()).expect("Failed to load config");

            prop_assert_eq!(config.server.port, env_port);
            prop_assert_ne!(config.server.port, file_port);

            super::remove_all_env_overrides();
        }
    }
}
