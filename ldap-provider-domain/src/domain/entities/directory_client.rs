use super::common::{ConfigMap, DomainName};
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Option keys of a domain's `connection` section
pub mod keys {
    pub const SERVER: &str = "server";
    pub const PORT: &str = "port";
    pub const ENC_TYPE: &str = "enctype";
    pub const BIND_USER: &str = "user";
    pub const BIND_PASSWORD: &str = "pass";
    pub const BASE_DN: &str = "basedn";
    pub const USER_BASE_DN: &str = "userbasedn";
    pub const GROUP_BASE_DN: &str = "groupbasedn";
    pub const SEARCH_ATTRIBUTE: &str = "searchattribute";
    pub const OPTIONS: &str = "options";
}

pub const DEFAULT_SEARCH_ATTRIBUTE: &str = "samaccountname";

/// Transport security for directory connections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncryptionType {
    #[default]
    Clear,
    Ssl,
    Tls,
}

impl EncryptionType {
    pub fn default_port(&self) -> u16 {
        match self {
            EncryptionType::Clear | EncryptionType::Tls => 389,
            EncryptionType::Ssl => 636,
        }
    }

    pub fn scheme(&self) -> &'static str {
        match self {
            EncryptionType::Ssl => "ldaps",
            EncryptionType::Clear | EncryptionType::Tls => "ldap",
        }
    }
}

impl std::str::FromStr for EncryptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "clear" => Ok(EncryptionType::Clear),
            "ssl" => Ok(EncryptionType::Ssl),
            "tls" => Ok(EncryptionType::Tls),
            _ => Err(format!("Invalid encryption type: {s}")),
        }
    }
}

impl std::fmt::Display for EncryptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncryptionType::Clear => write!(f, "clear"),
            EncryptionType::Ssl => write!(f, "ssl"),
            EncryptionType::Tls => write!(f, "tls"),
        }
    }
}

/// Bind credentials for a directory server
#[derive(Clone, PartialEq, Eq)]
pub struct BindCredentials {
    pub dn: String,
    password: String,
}

impl BindCredentials {
    pub fn new(dn: String, password: String) -> Self {
        Self { dn, password }
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for BindCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindCredentials")
            .field("dn", &self.dn)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Validated server parameters of one domain
#[derive(Debug, Clone, PartialEq)]
pub struct ServerParameters {
    pub hosts: Vec<String>,
    pub port: u16,
    pub enc_type: EncryptionType,
    pub bind: Option<BindCredentials>,
    pub base_dn: Option<String>,
    pub user_base_dn: Option<String>,
    pub group_base_dn: Option<String>,
    pub search_attribute: String,
    pub options: ConfigMap,
}

impl ServerParameters {
    /// Parse and validate a raw `connection` section.
    ///
    /// Errors carry the reason only; the caller attaches the domain name.
    pub fn from_section(section: &ConfigMap) -> Result<Self, String> {
        let hosts = parse_hosts(section.get(keys::SERVER))?;

        let enc_type = match optional_str(section, keys::ENC_TYPE)? {
            Some(raw) => raw.parse::<EncryptionType>()?,
            None => EncryptionType::default(),
        };

        let port = match section.get(keys::PORT) {
            None | Some(Value::Null) => enc_type.default_port(),
            Some(value) => parse_port(value)?,
        };

        let bind = match (
            optional_str(section, keys::BIND_USER)?,
            optional_str(section, keys::BIND_PASSWORD)?,
        ) {
            (Some(dn), Some(password)) => Some(BindCredentials::new(dn, password)),
            (Some(_), None) => {
                return Err(format!(
                    "'{}' is set but '{}' is missing",
                    keys::BIND_USER,
                    keys::BIND_PASSWORD
                ))
            }
            (None, Some(_)) => {
                return Err(format!(
                    "'{}' is set but '{}' is missing",
                    keys::BIND_PASSWORD,
                    keys::BIND_USER
                ))
            }
            (None, None) => None,
        };

        let base_dn = optional_str(section, keys::BASE_DN)?;
        let user_base_dn = optional_str(section, keys::USER_BASE_DN)?.or_else(|| base_dn.clone());
        let group_base_dn = optional_str(section, keys::GROUP_BASE_DN)?.or_else(|| base_dn.clone());

        let search_attribute = optional_str(section, keys::SEARCH_ATTRIBUTE)?
            .unwrap_or_else(|| DEFAULT_SEARCH_ATTRIBUTE.to_string());

        let options = match section.get(keys::OPTIONS) {
            None | Some(Value::Null) => ConfigMap::new(),
            Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            Some(_) => return Err(format!("'{}' must be an object", keys::OPTIONS)),
        };

        Ok(Self {
            hosts,
            port,
            enc_type,
            bind,
            base_dn,
            user_base_dn,
            group_base_dn,
            search_attribute,
            options,
        })
    }
}

fn parse_hosts(value: Option<&Value>) -> Result<Vec<String>, String> {
    let hosts: Vec<String> = match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(raw)) => raw.split_whitespace().map(str::to_string).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(|s| s.trim().to_string())
                    .ok_or_else(|| format!("'{}' entries must be strings", keys::SERVER))
            })
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .filter(|host| !host.is_empty())
            .collect(),
        Some(_) => return Err(format!("'{}' must be a string or a list", keys::SERVER)),
    };

    if hosts.is_empty() {
        return Err(format!("missing host ('{}')", keys::SERVER));
    }

    Ok(hosts)
}

fn parse_port(value: &Value) -> Result<u16, String> {
    let port = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match port {
        Some(port @ 1..=65535) => Ok(port as u16),
        _ => Err(format!("invalid port: {value}")),
    }
}

fn optional_str(section: &ConfigMap, key: &str) -> Result<Option<String>, String> {
    match section.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim().to_string())),
        Some(other) => Err(format!("'{key}' must be a string, got {other}")),
    }
}

/// Connection descriptor bound to one domain's directory servers.
///
/// Immutable once built and shared by every login handled for the domain.
/// No network connection is opened here; the consumer connects on first use.
#[derive(Debug)]
pub struct DirectoryClient {
    domain: DomainName,
    parameters: ServerParameters,
}

impl DirectoryClient {
    pub fn new(domain: DomainName, parameters: ServerParameters) -> Self {
        Self { domain, parameters }
    }

    /// Build a client from a raw `connection` section
    pub fn from_section(domain: &DomainName, section: &ConfigMap) -> DomainResult<Self> {
        let parameters = ServerParameters::from_section(section)
            .map_err(|reason| DomainError::client_construction(domain.as_str(), reason))?;
        Ok(Self::new(domain.clone(), parameters))
    }

    pub fn domain(&self) -> &DomainName {
        &self.domain
    }

    pub fn parameters(&self) -> &ServerParameters {
        &self.parameters
    }

    pub fn hosts(&self) -> &[String] {
        &self.parameters.hosts
    }

    pub fn port(&self) -> u16 {
        self.parameters.port
    }

    pub fn enc_type(&self) -> EncryptionType {
        self.parameters.enc_type
    }

    pub fn base_dn(&self) -> Option<&str> {
        self.parameters.base_dn.as_deref()
    }

    pub fn bind_credentials(&self) -> Option<&BindCredentials> {
        self.parameters.bind.as_ref()
    }

    /// Whether STARTTLS must be issued after connecting
    pub fn requires_start_tls(&self) -> bool {
        self.parameters.enc_type == EncryptionType::Tls
    }

    /// Connection URIs, one per configured host, in configuration order
    pub fn uris(&self) -> Vec<String> {
        let scheme = self.parameters.enc_type.scheme();
        self.parameters
            .hosts
            .iter()
            .map(|host| format!("{scheme}://{host}:{}", self.parameters.port))
            .collect()
    }
}
