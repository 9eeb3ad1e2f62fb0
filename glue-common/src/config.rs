//! Bootstrap configuration
//!
//! Settings are resolved once at startup, in priority order:
//! 1. Command-line arguments
//! 2. Environment variables (`GLUE_*`)
//! 3. TOML config file
//! 4. Compiled defaults
//!
//! A missing default config file is not an error: defaults apply and a
//! warning is logged once logging is up. An explicitly named file that is
//! missing or malformed is an error.

use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

use crate::content::LoaderMode;
use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 5780;
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5000;

/// Deployment environment, controls error verbosity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    /// Whether raw internal error messages may reach API callers
    pub fn exposes_internal_errors(&self) -> bool {
        matches!(self, Environment::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("development"),
            Environment::Production => f.write_str("production"),
        }
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(Error::Config(format!("Unknown environment: {}", other))),
        }
    }
}

/// Contents of the TOML config file; every key optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub backend_url: Option<String>,
    pub offline: Option<bool>,
    pub environment: Option<Environment>,
    pub admin_token: Option<String>,
    pub fetch_timeout_ms: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(format!("Invalid config file: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Cannot read config file {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config_path: Option<PathBuf>,
    pub port: Option<u16>,
    pub database_path: Option<PathBuf>,
    pub backend_url: Option<String>,
    pub offline: Option<bool>,
    pub environment: Option<Environment>,
    pub admin_token: Option<String>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// Read `GLUE_*` environment variables
    pub fn from_env() -> Result<Self> {
        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        let port = var("GLUE_PORT")
            .map(|p| {
                p.parse::<u16>()
                    .map_err(|e| Error::Config(format!("GLUE_PORT: {}", e)))
            })
            .transpose()?;
        let environment = var("GLUE_ENV").map(|e| e.parse::<Environment>()).transpose()?;

        Ok(Self {
            config_path: None,
            port,
            database_path: var("GLUE_DATABASE").map(PathBuf::from),
            backend_url: var("GLUE_BACKEND_URL"),
            offline: var("GLUE_OFFLINE").map(|v| parse_flag(&v)),
            environment,
            admin_token: var("GLUE_ADMIN_TOKEN"),
            log_level: var("GLUE_LOG_LEVEL"),
        })
    }

    /// Field-wise merge: values in `self` win over `lower`
    pub fn or(self, lower: ConfigOverrides) -> Self {
        Self {
            config_path: self.config_path.or(lower.config_path),
            port: self.port.or(lower.port),
            database_path: self.database_path.or(lower.database_path),
            backend_url: self.backend_url.or(lower.backend_url),
            offline: self.offline.or(lower.offline),
            environment: self.environment.or(lower.environment),
            admin_token: self.admin_token.or(lower.admin_token),
            log_level: self.log_level.or(lower.log_level),
        }
    }
}

/// Fully resolved bootstrap configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: PathBuf,
    /// Base URL of the backend-of-record the loader reads from
    pub backend_url: String,
    pub mode: LoaderMode,
    pub environment: Environment,
    pub admin_token: Option<String>,
    pub fetch_timeout: Duration,
    pub log_level: String,
    /// Config file the values came from, if any
    pub source: Option<PathBuf>,
}

impl Config {
    /// Resolve configuration from overrides, the config file and defaults
    ///
    /// Runs before logging is initialized, so it reports through
    /// [`log_summary`](Self::log_summary) instead of logging itself.
    pub fn resolve(overrides: ConfigOverrides) -> Result<Self> {
        let source = match &overrides.config_path {
            Some(path) => Some(path.clone()),
            None => default_config_path().filter(|path| path.exists()),
        };
        let file = match &source {
            Some(path) => TomlConfig::load(path)?,
            None => TomlConfig::default(),
        };

        let mut config = Self::merge(overrides, file);
        config.source = source;
        Ok(config)
    }

    /// Combine overrides with file values and compiled defaults
    pub fn merge(overrides: ConfigOverrides, file: TomlConfig) -> Self {
        let port = overrides.port.or(file.port).unwrap_or(DEFAULT_PORT);
        let backend_url = overrides
            .backend_url
            .or(file.backend_url)
            .unwrap_or_else(|| format!("http://127.0.0.1:{}", port));
        let offline = overrides.offline.or(file.offline).unwrap_or(false);

        Self {
            port,
            database_path: overrides
                .database_path
                .or(file.database_path)
                .unwrap_or_else(default_database_path),
            backend_url,
            mode: if offline {
                LoaderMode::Offline
            } else {
                LoaderMode::Live
            },
            environment: overrides
                .environment
                .or(file.environment)
                .unwrap_or_default(),
            admin_token: overrides
                .admin_token
                .or(file.admin_token)
                .filter(|t| !t.is_empty()),
            fetch_timeout: Duration::from_millis(
                file.fetch_timeout_ms.unwrap_or(DEFAULT_FETCH_TIMEOUT_MS),
            ),
            log_level: overrides.log_level.unwrap_or(file.logging.level),
            source: None,
        }
    }
}

impl Config {
    /// Log where the configuration came from and its key values
    pub fn log_summary(&self) {
        match &self.source {
            Some(path) => info!("Config file: {}", path.display()),
            None => warn!("No config file found, using defaults"),
        }
        info!(
            port = self.port,
            database = %self.database_path.display(),
            backend = %self.backend_url,
            mode = ?self.mode,
            environment = %self.environment,
            admin_enabled = self.admin_token.is_some(),
            "Configuration resolved"
        );
    }
}

/// `true` for 1/true/yes/on, case-insensitive
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// `~/.config/glue/config.toml` (platform equivalent elsewhere)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("glue").join("config.toml"))
}

fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("glue").join("glue.db"))
        .unwrap_or_else(|| PathBuf::from("./glue.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("production".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Dev".parse::<Environment>().unwrap(), Environment::Development);
        assert!("staging".parse::<Environment>().is_err());
        assert!(!Environment::Production.exposes_internal_errors());
    }

    #[test]
    fn test_defaults() {
        let config = Config::merge(ConfigOverrides::default(), TomlConfig::default());
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.backend_url, "http://127.0.0.1:5780");
        assert_eq!(config.mode, LoaderMode::Live);
        assert_eq!(config.environment, Environment::Development);
        assert!(config.admin_token.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides_beat_file() {
        let file = TomlConfig::from_toml_str(
            r#"
            port = 6000
            offline = false
            environment = "production"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        let overrides = ConfigOverrides {
            port: Some(7000),
            offline: Some(true),
            ..Default::default()
        };

        let config = Config::merge(overrides, file);
        assert_eq!(config.port, 7000);
        assert_eq!(config.backend_url, "http://127.0.0.1:7000");
        assert_eq!(config.mode, LoaderMode::Offline);
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_empty_admin_token_means_unset() {
        let overrides = ConfigOverrides {
            admin_token: Some(String::new()),
            ..Default::default()
        };
        let config = Config::merge(overrides, TomlConfig::default());
        assert!(config.admin_token.is_none());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(TomlConfig::from_toml_str("prot = 1").is_err());
    }

    #[test]
    fn test_overrides_or() {
        let cli = ConfigOverrides {
            port: Some(1),
            ..Default::default()
        };
        let env = ConfigOverrides {
            port: Some(2),
            admin_token: Some("t".into()),
            ..Default::default()
        };
        let merged = cli.or(env);
        assert_eq!(merged.port, Some(1));
        assert_eq!(merged.admin_token.as_deref(), Some("t"));
    }
}
