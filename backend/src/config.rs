//! Configuration management.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;

/// Configuration structure that matches the TOML file format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: ServerConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ServerConfig {
    #[serde(default = "default_port")]
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    /// If not set, uses RUST_LOG environment variable or defaults to "info"
    log_level: Option<String>,
}

fn default_port() -> u16 {
    pizzeria_types::DEFAULT_PORT
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port to listen on
    pub port: u16,
    /// Log level (if set, overrides the RUST_LOG default)
    pub log_level: Option<String>,
}

impl Config {
    /// Load configuration with the full priority chain:
    /// CLI args > `PORT` env var > `PIZZERIA_*` env vars > config file > defaults.
    pub fn from_figment(port: Option<u16>) -> anyhow::Result<Self> {
        let local_config = env::current_dir().ok().map(|d| d.join(".pizzeria.toml"));

        let mut figment = Figment::new().merge(Serialized::defaults(ConfigFile {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
        }));

        if let Some(ref path) = local_config {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // PIZZERIA_SERVER_PORT=... style overrides
        figment = figment.merge(
            Env::prefixed("PIZZERIA_")
                .map(|key| key.as_str().replace("__", ".").into())
                .split("_"),
        );

        let config_file: ConfigFile = figment.extract()?;
        let mut resolved_port = config_file.server.port;

        // The bare PORT variable wins over file and prefixed values; a
        // non-numeric value falls through to what figment resolved.
        if let Some(p) = env::var("PORT").ok().and_then(|p| p.parse().ok()) {
            resolved_port = p;
        }

        // CLI argument has the highest priority
        if let Some(p) = port {
            resolved_port = p;
        }

        Ok(Self {
            port: resolved_port,
            log_level: config_file.logging.log_level,
        })
    }

    /// Load configuration from environment variables only (legacy support).
    ///
    /// Reads the bare `PORT` variable; unset or non-numeric values fall back
    /// to the default port.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(pizzeria_types::DEFAULT_PORT);

        Self {
            port,
            log_level: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        env::remove_var("PORT");
        let config = Config::from_env();
        assert_eq!(config.port, pizzeria_types::DEFAULT_PORT);
        assert!(config.log_level.is_none());
    }

    #[test]
    #[serial]
    fn test_from_env_port_override() {
        env::set_var("PORT", "9000");
        let config = Config::from_env();
        env::remove_var("PORT");
        assert_eq!(config.port, 9000);
    }

    #[test]
    #[serial]
    fn test_from_env_non_numeric_port_falls_back() {
        env::set_var("PORT", "not-a-port");
        let config = Config::from_env();
        env::remove_var("PORT");
        assert_eq!(config.port, pizzeria_types::DEFAULT_PORT);
    }

    #[test]
    #[serial]
    fn test_from_figment_defaults() {
        env::remove_var("PORT");
        env::remove_var("PIZZERIA_SERVER_PORT");

        // Run in a temp directory to avoid picking up a project .pizzeria.toml
        let temp_dir = TempDir::new().unwrap();
        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(&temp_dir).unwrap();

        let config = Config::from_figment(None).unwrap();

        let _ = env::set_current_dir(original_dir);

        assert_eq!(config.port, pizzeria_types::DEFAULT_PORT);
    }

    #[test]
    #[serial]
    fn test_from_figment_config_file() {
        env::remove_var("PORT");
        env::remove_var("PIZZERIA_SERVER_PORT");

        let temp_dir = TempDir::new().unwrap();
        let config_content = "[server]\nport = 7777\n\n[logging]\nlog_level = \"debug\"\n";
        fs::write(temp_dir.path().join(".pizzeria.toml"), config_content).unwrap();

        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(&temp_dir).unwrap();

        let config = Config::from_figment(None).unwrap();

        let _ = env::set_current_dir(original_dir);

        assert_eq!(config.port, 7777);
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    #[serial]
    fn test_port_env_overrides_config_file() {
        env::remove_var("PIZZERIA_SERVER_PORT");

        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".pizzeria.toml"), "[server]\nport = 7777").unwrap();

        env::set_var("PORT", "8888");

        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(&temp_dir).unwrap();

        let config = Config::from_figment(None).unwrap();

        let _ = env::set_current_dir(original_dir);
        env::remove_var("PORT");

        assert_eq!(config.port, 8888);
    }

    #[test]
    #[serial]
    fn test_cli_overrides_env() {
        env::set_var("PORT", "8888");

        let temp_dir = TempDir::new().unwrap();
        let original_dir = env::current_dir().unwrap();
        env::set_current_dir(&temp_dir).unwrap();

        let config = Config::from_figment(Some(9999)).unwrap();

        let _ = env::set_current_dir(original_dir);
        env::remove_var("PORT");

        assert_eq!(config.port, 9999);
    }
}
