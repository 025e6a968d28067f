//! Core configuration types and loading.

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::limits::LimitsConfig;
use super::listen::ListenConfig;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Server configuration.
///
/// Every section is optional; an empty file yields the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Server information.
    #[serde(default)]
    pub server: ServerConfig,
    /// Network listen configuration.
    #[serde(default)]
    pub listen: ListenConfig,
    /// Idle eviction configuration.
    #[serde(default)]
    pub timeouts: IdleTimeoutsConfig,
    /// Inbound line limits.
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Server identity configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Server name, used in logs (default: "relayd").
    #[serde(default = "default_server_name")]
    pub name: String,
    /// Prometheus metrics HTTP port (default: disabled).
    /// `0` also disables the endpoint.
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: default_server_name(),
            metrics_port: None,
        }
    }
}

fn default_server_name() -> String {
    "relayd".to_string()
}

/// Idle eviction configuration.
///
/// A session that sends nothing for `idle` seconds is kicked: it gets a
/// notice, its outbound queue is closed and the socket is shut.
#[derive(Debug, Clone, Deserialize)]
pub struct IdleTimeoutsConfig {
    /// Seconds without inbound data before eviction (default: 300).
    #[serde(default = "default_idle_timeout")]
    pub idle: u64,
}

impl Default for IdleTimeoutsConfig {
    fn default() -> Self {
        Self {
            idle: default_idle_timeout(),
        }
    }
}

impl IdleTimeoutsConfig {
    /// Idle threshold as a duration.
    pub fn idle_duration(&self) -> Duration {
        Duration::from_secs(self.idle)
    }
}

fn default_idle_timeout() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.name, "relayd");
        assert_eq!(config.server.metrics_port, None);
        assert_eq!(config.listen.address.port(), 8888);
        assert_eq!(config.timeouts.idle_duration(), Duration::from_secs(300));
        assert_eq!(config.limits.max_line_len, 4096);
    }

    #[test]
    fn sections_override_defaults() {
        let toml = r#"
[server]
name = "relay.test"
metrics_port = 9100

[listen]
address = "127.0.0.1:7000"

[timeouts]
idle = 5
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.name, "relay.test");
        assert_eq!(config.server.metrics_port, Some(9100));
        assert_eq!(config.listen.address.to_string(), "127.0.0.1:7000");
        assert_eq!(config.timeouts.idle, 5);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Config::load("/nonexistent/relayd.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn load_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[listen]\naddress = 12").unwrap();
        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
