use crate::{
    application::ports::{DirectoryClientProvider, ServerParametersSource},
    domain::{
        entities::{DirectoryClient, DomainName},
        errors::{DomainError, DomainResult},
    },
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, instrument, warn};

/// Process-wide cache of directory clients, one per domain
///
/// Build one at startup and share it; clients live as long as the registry.
/// The map lock is only held to find or insert a domain's slot, so a client
/// being built for one domain never blocks cached reads for another.
pub struct ClientRegistry {
    source: Arc<dyn ServerParametersSource>,
    clients: RwLock<HashMap<DomainName, Arc<OnceCell<Arc<DirectoryClient>>>>>,
}

impl ClientRegistry {
    pub fn new(source: Arc<dyn ServerParametersSource>) -> Self {
        Self {
            source,
            clients: RwLock::new(HashMap::new()),
        }
    }

    /// Get the client of a domain, constructing it on first request
    #[instrument(skip(self), fields(domain = %domain))]
    pub async fn get_for_domain(&self, domain: &DomainName) -> DomainResult<Arc<DirectoryClient>> {
        if let Some(client) = self.cached(domain).await {
            debug!("Reusing cached directory client for domain '{}'", domain);
            return Ok(client);
        }

        let slot = {
            let mut clients = self.clients.write().await;
            Arc::clone(clients.entry(domain.clone()).or_default())
        };

        // Concurrent first callers for the same domain wait here; one builds.
        let client = slot
            .get_or_try_init(|| async { self.build(domain) })
            .await?;
        Ok(Arc::clone(client))
    }

    async fn cached(&self, domain: &DomainName) -> Option<Arc<DirectoryClient>> {
        let clients = self.clients.read().await;
        clients.get(domain)?.get().cloned()
    }

    fn build(&self, domain: &DomainName) -> DomainResult<Arc<DirectoryClient>> {
        let section = self.source.server_parameters(domain).ok_or_else(|| {
            warn!("No server parameters configured for domain '{}'", domain);
            DomainError::unknown_domain(domain.as_str())
        })?;

        let client = Arc::new(DirectoryClient::from_section(domain, &section)?);
        info!(
            "Created directory client for domain '{}' ({})",
            domain,
            client.uris().join(", ")
        );
        Ok(client)
    }

    /// Domains whose client has been constructed, sorted
    pub async fn cached_domains(&self) -> Vec<DomainName> {
        let mut domains: Vec<DomainName> = self
            .clients
            .read()
            .await
            .iter()
            .filter(|(_, slot)| slot.initialized())
            .map(|(domain, _)| domain.clone())
            .collect();
        domains.sort();
        domains
    }

    pub async fn len(&self) -> usize {
        self.clients
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
impl DirectoryClientProvider for ClientRegistry {
    async fn get_for_domain(&self, domain: &DomainName) -> DomainResult<Arc<DirectoryClient>> {
        ClientRegistry::get_for_domain(self, domain).await
    }
}
