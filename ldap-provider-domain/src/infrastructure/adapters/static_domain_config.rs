use crate::application::ports::{DomainConfigSource, ServerParametersSource};
use crate::domain::{
    entities::{sections, ConfigMap, DomainName},
    errors::{ConfigError, DomainResult},
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

type Sections = BTreeMap<String, ConfigMap>;

/// Top-level key marking a structured document
const DOMAINS_KEY: &str = "domains";

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct StructuredDocument {
    domains: BTreeMap<DomainName, Sections>,
    #[serde(default)]
    defaults: Sections,
}

/// Domain table loaded once at process start
///
/// Accepts either a flat document mapping domain names to their sections
/// (`{"CORP": {"connection": {...}, "groupsync": {...}}}`), or a structured
/// one with `domains` and global section `defaults`. Any document with a
/// top-level `domains` key is read as structured, so no domain can be named
/// `domains` in a flat document.
#[derive(Debug, Clone, Default)]
pub struct StaticDomainConfiguration {
    domains: BTreeMap<DomainName, Sections>,
    defaults: Sections,
}

impl StaticDomainConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> DomainResult<Self> {
        let document: Value = serde_json::from_str(json).map_err(ConfigError::from)?;

        let is_structured = document
            .as_object()
            .is_some_and(|object| object.contains_key(DOMAINS_KEY));

        if is_structured {
            let StructuredDocument { domains, defaults } =
                serde_json::from_value(document).map_err(ConfigError::from)?;
            Ok(Self { domains, defaults })
        } else {
            let domains = serde_json::from_value(document).map_err(ConfigError::from)?;
            Ok(Self {
                domains,
                defaults: Sections::new(),
            })
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> DomainResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::FileError {
            message: format!("Cannot read {}: {e}", path.display()),
        })?;

        let config = Self::from_json_str(&json)?;
        info!(
            "Loaded {} domain(s) from {}",
            config.domains.len(),
            path.display()
        );
        Ok(config)
    }

    /// Register a domain section, replacing any previous value
    pub fn with_domain_section(
        mut self,
        domain: DomainName,
        section: impl Into<String>,
        values: ConfigMap,
    ) -> Self {
        self.domains
            .entry(domain)
            .or_default()
            .insert(section.into(), values);
        self
    }

    /// Register global defaults for a section
    pub fn with_section_defaults(mut self, section: impl Into<String>, values: ConfigMap) -> Self {
        self.defaults.insert(section.into(), values);
        self
    }
}

impl ServerParametersSource for StaticDomainConfiguration {
    fn server_parameters(&self, domain: &DomainName) -> Option<ConfigMap> {
        self.domains.get(domain)?.get(sections::CONNECTION).cloned()
    }
}

impl DomainConfigSource for StaticDomainConfiguration {
    fn has_domain(&self, domain: &DomainName) -> bool {
        self.domains.contains_key(domain)
    }

    fn domains(&self) -> Vec<DomainName> {
        self.domains.keys().cloned().collect()
    }

    fn section_defaults(&self, section: &str) -> Option<ConfigMap> {
        self.defaults.get(section).cloned()
    }

    fn section_overrides(&self, domain: &DomainName, section: &str) -> Option<ConfigMap> {
        self.domains.get(domain)?.get(section).cloned()
    }
}
