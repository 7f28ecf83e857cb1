use super::common::{ConfigMap, DomainName};
use serde::Serialize;
use serde_json::Value;

/// Resolved configuration of one section for one domain
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainConfig {
    domain: DomainName,
    section: String,
    values: ConfigMap,
}

impl DomainConfig {
    /// Layer `overrides` over `defaults`, key by key
    pub fn merged(
        domain: DomainName,
        section: impl Into<String>,
        defaults: Option<&ConfigMap>,
        overrides: Option<&ConfigMap>,
    ) -> Self {
        let mut values = defaults.cloned().unwrap_or_default();
        if let Some(overrides) = overrides {
            values.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
        }

        Self {
            domain,
            section: section.into(),
            values,
        }
    }

    pub fn domain(&self) -> &DomainName {
        &self.domain
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key)?.as_str()
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.values.get(key)?.as_u64()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.values.get(key)?.as_bool()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn values(&self) -> &ConfigMap {
        &self.values
    }
}
