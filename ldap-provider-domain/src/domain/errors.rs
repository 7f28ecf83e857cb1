use thiserror::Error;

/// Domain-specific errors for domain resolution and provisioning
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown domain: {domain}")]
    UnknownDomain { domain: String },

    #[error("Cannot construct directory client for domain {domain}: {reason}")]
    ClientConstruction { domain: String, reason: String },

    #[error("Domain store error: {message}")]
    Store { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Validation error: {field} - {message}")]
    Validation { field: String, message: String },

    #[error("Login action {action} failed: {message}")]
    ActionFailed { action: String, message: String },
}

impl DomainError {
    pub fn unknown_domain(domain: impl Into<String>) -> Self {
        DomainError::UnknownDomain {
            domain: domain.into(),
        }
    }

    pub fn client_construction(domain: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::ClientConstruction {
            domain: domain.into(),
            reason: reason.into(),
        }
    }

    /// Operator-fixable errors: a retry without a configuration change cannot succeed.
    pub fn is_configuration_mismatch(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownDomain { .. }
                | DomainError::ClientConstruction { .. }
                | DomainError::Configuration { .. }
        )
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain store (datastore adapter) errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("Query failed: {query} - {message}")]
    QueryFailed { query: String, message: String },

    #[error("Timeout after {seconds} seconds")]
    Timeout { seconds: u64 },
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ConnectionFailed { message } => DomainError::Store { message },
            StoreError::QueryFailed { query, message } => DomainError::Store {
                message: format!("{query}: {message}"),
            },
            StoreError::Timeout { seconds } => DomainError::Store {
                message: format!("Request timed out after {seconds} seconds"),
            },
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required configuration: {key}")]
    MissingRequired { key: String },

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },

    #[error("Configuration file error: {message}")]
    FileError { message: String },
}

impl From<ConfigError> for DomainError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingRequired { key } => DomainError::Configuration {
                message: format!("Missing required configuration: {key}"),
            },
            ConfigError::InvalidValue { key, message } => DomainError::Configuration {
                message: format!("Invalid value for {key}: {message}"),
            },
            ConfigError::FileError { message } => DomainError::Configuration { message },
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::FileError {
            message: format!("Malformed domain configuration: {err}"),
        }
    }
}
