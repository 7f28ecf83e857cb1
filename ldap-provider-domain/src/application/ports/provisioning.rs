use crate::domain::{
    entities::{DirectoryClient, DomainConfig, DomainName},
    errors::DomainResult,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Hands out the directory client of a domain
#[async_trait]
pub trait DirectoryClientProvider: Send + Sync {
    /// Fails with `UnknownDomain` or `ClientConstruction`
    async fn get_for_domain(&self, domain: &DomainName) -> DomainResult<Arc<DirectoryClient>>;
}

/// Hands out the resolved configuration of a (domain, section) pair
#[async_trait]
pub trait DomainConfigProvider: Send + Sync {
    /// Fails with `UnknownDomain`; an unknown section yields an empty config
    async fn factory(&self, domain: &DomainName, section: &str) -> DomainResult<Arc<DomainConfig>>;
}
