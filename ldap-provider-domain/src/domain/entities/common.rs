use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw configuration values keyed by option name
pub type ConfigMap = BTreeMap<String, serde_json::Value>;

/// Opaque, stable identifier of a principal (e.g. a numeric account id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for UserId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Short key naming a configured authentication backend, e.g. `CORP`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    pub fn validate(name: &str) -> DomainResult<()> {
        if name.is_empty() {
            return Err(DomainError::Validation {
                field: "domain".to_string(),
                message: "Domain name cannot be empty".to_string(),
            });
        }

        if name.chars().any(char::is_whitespace) {
            return Err(DomainError::Validation {
                field: "domain".to_string(),
                message: format!("Domain name '{name}' cannot contain whitespace"),
            });
        }

        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DomainName {
    type Error = DomainError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl TryFrom<&str> for DomainName {
    type Error = DomainError;

    fn try_from(name: &str) -> Result<Self, Self::Error> {
        Self::new(name)
    }
}

impl From<DomainName> for String {
    fn from(name: DomainName) -> Self {
        name.0
    }
}

impl std::str::FromStr for DomainName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for DomainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Configuration sections known to the provider and its companion extensions
pub mod sections {
    pub const CONNECTION: &str = "connection";
    pub const AUTHORIZATION: &str = "authorization";
    pub const GROUP_SYNC: &str = "groupsync";
    pub const USER_SYNC: &str = "usersync";
    pub const USER_INFO: &str = "userinfo";
}
