use crate::{
    application::ports::{DomainConfigProvider, DomainConfigSource},
    domain::{
        entities::{DomainConfig, DomainName},
        errors::{DomainError, DomainResult},
    },
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, instrument, warn};

type ConfigKey = (DomainName, String);

/// Process-wide cache of resolved domain configuration, one per (domain, section)
pub struct DomainConfigRegistry {
    source: Arc<dyn DomainConfigSource>,
    configs: RwLock<HashMap<ConfigKey, Arc<OnceCell<Arc<DomainConfig>>>>>,
}

impl DomainConfigRegistry {
    pub fn new(source: Arc<dyn DomainConfigSource>) -> Self {
        Self {
            source,
            configs: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve the configuration of `section` for `domain`.
    ///
    /// Section defaults are layered under the domain's overrides. A section
    /// nobody configured resolves to an empty config. Repeated calls return
    /// the same `Arc`.
    #[instrument(skip(self), fields(domain = %domain, section = %section))]
    pub async fn factory(&self, domain: &DomainName, section: &str) -> DomainResult<Arc<DomainConfig>> {
        let key = (domain.clone(), section.to_string());

        {
            let configs = self.configs.read().await;
            if let Some(config) = configs.get(&key).and_then(|slot| slot.get()) {
                debug!("Reusing cached '{}' config for domain '{}'", section, domain);
                return Ok(Arc::clone(config));
            }
        }

        let slot = {
            let mut configs = self.configs.write().await;
            Arc::clone(configs.entry(key).or_default())
        };

        let config = slot
            .get_or_try_init(|| async { self.resolve(domain, section) })
            .await?;
        Ok(Arc::clone(config))
    }

    fn resolve(&self, domain: &DomainName, section: &str) -> DomainResult<Arc<DomainConfig>> {
        if !self.source.has_domain(domain) {
            warn!("Domain '{}' is not registered", domain);
            return Err(DomainError::unknown_domain(domain.as_str()));
        }

        let defaults = self.source.section_defaults(section);
        let overrides = self.source.section_overrides(domain, section);
        let config = Arc::new(DomainConfig::merged(
            domain.clone(),
            section,
            defaults.as_ref(),
            overrides.as_ref(),
        ));

        info!(
            "Resolved '{}' config for domain '{}' ({} options)",
            section,
            domain,
            config.len()
        );
        Ok(config)
    }

    pub async fn len(&self) -> usize {
        self.configs
            .read()
            .await
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl DomainConfigProvider for DomainConfigRegistry {
    async fn factory(&self, domain: &DomainName, section: &str) -> DomainResult<Arc<DomainConfig>> {
        DomainConfigRegistry::factory(self, domain, section).await
    }
}
