use crate::domain::{
    entities::{ConfigMap, DomainName},
    errors::{ConfigError, DomainResult},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DOMAIN_CONFIG_ENV: &str = "LDAP_PROVIDER_DOMAIN_CONFIG";

/// Source of per-domain directory server parameters
pub trait ServerParametersSource: Send + Sync {
    /// Raw `connection` section of a domain, `None` for unknown domains
    fn server_parameters(&self, domain: &DomainName) -> Option<ConfigMap>;
}

/// Source of global section defaults and per-domain overrides
pub trait DomainConfigSource: Send + Sync {
    fn has_domain(&self, domain: &DomainName) -> bool;

    /// All configured domains, sorted
    fn domains(&self) -> Vec<DomainName>;

    fn section_defaults(&self, section: &str) -> Option<ConfigMap>;

    fn section_overrides(&self, domain: &DomainName, section: &str) -> Option<ConfigMap>;
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    pub enable_colors: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            enable_colors: true,
        }
    }
}

/// Log level enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log format enumeration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
    Full,
}

/// Deployment environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Staging,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Staging => write!(f, "staging"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub environment: Environment,
    /// JSON domain configuration file; an empty domain table when unset
    pub domain_config_path: Option<PathBuf>,
    pub logging: LoggingConfig,
}

impl AppConfig {
    pub fn validate(&self) -> DomainResult<()> {
        if let Some(path) = &self.domain_config_path {
            if !path.is_file() {
                return Err(ConfigError::InvalidValue {
                    key: DOMAIN_CONFIG_ENV.to_string(),
                    message: format!("{} is not a readable file", path.display()),
                }
                .into());
            }
        }

        Ok(())
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    pub fn is_test(&self) -> bool {
        self.environment == Environment::Test
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Load configuration from environment variables
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> DomainResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .unwrap_or_else(|| "development".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "ENVIRONMENT".to_string(),
                message: "Must be one of: development, test, staging, production".to_string(),
            })?;

        let domain_config_path = lookup(DOMAIN_CONFIG_ENV)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let logging = LoggingConfig {
            level: lookup("LOG_LEVEL")
                .unwrap_or_else(|| "info".to_string())
                .parse()
                .unwrap_or(LogLevel::Info),
            format: lookup("LOG_FORMAT")
                .unwrap_or_else(|| "compact".to_string())
                .parse()
                .unwrap_or(LogFormat::Compact),
            enable_colors: lookup("LOG_COLORS")
                .unwrap_or_else(|| "true".to_string())
                .parse()
                .unwrap_or(true),
        };

        let config = AppConfig {
            environment,
            domain_config_path,
            logging,
        };

        config.validate()?;
        Ok(config)
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(format!("Invalid environment: {s}")),
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: {s}")),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(LogFormat::Compact),
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "full" => Ok(LogFormat::Full),
            _ => Err(format!("Invalid log format: {s}")),
        }
    }
}
