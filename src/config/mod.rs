// ABOUTME: Configuration types and parsing for gantry.yml.
// ABOUTME: Layers defaults, an optional YAML file, environment variables and CLI flags.

mod log_level;

pub use log_level::{LogLevel, UnknownLogLevel};

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "gantry.yml";
pub const CONFIG_FILENAME_ALT: &str = "gantry.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".gantry/config.yml";

pub const DEFAULT_BASE_URL: &str = "http://localhost:4243";

/// Overrides the daemon address from the config file.
pub const BASE_URL_ENV: &str = "GANTRY_BASE_URL";
/// Overrides the log level from the config file.
pub const LOG_LEVEL_ENV: &str = "GANTRY_LOGLEVEL";

const URL_SCHEMES: [&str; 3] = ["http://", "tcp://", "unix://"];

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Daemon address: `http://`, `tcp://`, `unix://` or a socket path.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on every daemon request.
    #[serde(default = "default_timeout", with = "humantime_serde")]
    pub timeout: Duration,

    /// Grace period the daemon gives a container before killing it.
    #[serde(default = "default_stop_timeout", with = "humantime_serde")]
    pub stop_timeout: Duration,

    #[serde(default)]
    pub log_level: LogLevel,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(120)
}

fn default_stop_timeout() -> Duration {
    Duration::from_secs(10)
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: default_base_url(),
            timeout: default_timeout(),
            stop_timeout: default_stop_timeout(),
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Look for a config file in `dir`. Having none is not an error.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                return Self::load(path).map(Some);
            }
        }

        Ok(None)
    }

    /// Build the effective configuration.
    ///
    /// Precedence, highest first: `base_url` flag, environment, config file
    /// (explicit path or discovered in `dir`), defaults.
    pub fn resolve(dir: &Path, explicit: Option<&Path>, base_url: Option<String>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::load(path)?,
            None => Self::discover(dir)?.unwrap_or_default(),
        };

        let mut config = config.apply_env();
        if let Some(url) = base_url {
            config.base_url = url;
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply `GANTRY_BASE_URL` and `GANTRY_LOGLEVEL`.
    ///
    /// An unrecognised log level leaves the configured one in place.
    pub fn apply_env(mut self) -> Self {
        if let Ok(url) = std::env::var(BASE_URL_ENV)
            && !url.trim().is_empty()
        {
            self.base_url = url;
        }

        if let Ok(level) = std::env::var(LOG_LEVEL_ENV)
            && let Ok(level) = level.parse()
        {
            self.log_level = level;
        }

        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = self.base_url.trim();
        if url.is_empty() {
            return Err(Error::InvalidConfig("base_url cannot be empty".to_string()));
        }

        if !url.starts_with('/') && !URL_SCHEMES.iter().any(|s| url.starts_with(s)) {
            return Err(Error::InvalidConfig(format!(
                "base_url must start with one of {} or be a socket path: {}",
                URL_SCHEMES.join(", "),
                url
            )));
        }

        if self.timeout.is_zero() {
            return Err(Error::InvalidConfig("timeout must be positive".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(config.stop_timeout, Duration::from_secs(10));
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn parses_all_fields() {
        let config = Config::from_yaml(
            r#"
base_url: unix:///var/run/docker.sock
timeout: 30s
stop_timeout: 1m
log_level: warning
"#,
        )
        .unwrap();

        assert_eq!(config.base_url, "unix:///var/run/docker.sock");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.stop_timeout, Duration::from_secs(60));
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(Config::from_yaml("docker_host: x").is_err());
    }

    #[test]
    fn bad_log_level_rejected() {
        assert!(Config::from_yaml("log_level: loud").is_err());
    }

    #[test]
    fn validate_rejects_schemeless_url() {
        let config = Config {
            base_url: "localhost:4243".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn validate_accepts_socket_path() {
        let config = Config {
            base_url: "/var/run/docker.sock".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_https() {
        let config = Config {
            base_url: "https://127.0.0.1:2376".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn validate_accepts_supported_schemes() {
        for url in ["http://localhost:4243", "tcp://10.0.0.2:2375", "unix:///run/docker.sock"] {
            let config = Config {
                base_url: url.to_string(),
                ..Config::default()
            };
            assert!(config.validate().is_ok(), "{url} should be accepted");
        }
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            timeout: Duration::ZERO,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
