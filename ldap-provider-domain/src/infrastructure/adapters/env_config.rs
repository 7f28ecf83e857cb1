use super::static_domain_config::StaticDomainConfiguration;
use crate::application::{
    ports::{AppConfig, DomainConfigSource, DomainStore, LoggingConfig},
    services::{ClientRegistry, DomainConfigRegistry, LoginEventPipeline},
};
use crate::domain::errors::DomainResult;
use std::sync::Arc;
use tracing::{info, warn};

/// Environment-based configuration adapter
///
/// Owns the process configuration and wires the shared registries once, at
/// startup. Every pipeline built from one adapter shares its registries.
pub struct EnvConfigurationAdapter {
    config: AppConfig,
    clients: Arc<ClientRegistry>,
    configs: Arc<DomainConfigRegistry>,
}

impl EnvConfigurationAdapter {
    pub fn new() -> DomainResult<Self> {
        let config = AppConfig::from_env()?;
        Self::wire(config)
    }

    pub fn with_config(config: AppConfig) -> DomainResult<Self> {
        config.validate()?;
        Self::wire(config)
    }

    fn wire(config: AppConfig) -> DomainResult<Self> {
        let domains = Arc::new(load_domain_configuration(&config)?);
        info!(
            "Domain table ready with {} domain(s) ({} environment)",
            domains.domains().len(),
            config.environment
        );

        Ok(Self {
            clients: Arc::new(ClientRegistry::new(domains.clone())),
            configs: Arc::new(DomainConfigRegistry::new(domains)),
            config,
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn logging_config(&self) -> &LoggingConfig {
        &self.config.logging
    }

    pub fn client_registry(&self) -> Arc<ClientRegistry> {
        Arc::clone(&self.clients)
    }

    pub fn config_registry(&self) -> Arc<DomainConfigRegistry> {
        Arc::clone(&self.configs)
    }

    /// Build a login pipeline over `domain_store` and the shared registries
    pub fn build_pipeline(&self, domain_store: Arc<dyn DomainStore>) -> LoginEventPipeline {
        LoginEventPipeline::new(domain_store, self.client_registry(), self.config_registry())
    }
}

/// Load the domain table named by the configuration
fn load_domain_configuration(config: &AppConfig) -> DomainResult<StaticDomainConfiguration> {
    match &config.domain_config_path {
        Some(path) => StaticDomainConfiguration::from_json_file(path),
        None => {
            warn!("No domain configuration file set; no domain will resolve");
            Ok(StaticDomainConfiguration::new())
        }
    }
}
