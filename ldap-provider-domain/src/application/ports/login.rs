use crate::domain::{
    entities::{DirectoryClient, DomainConfig, DomainName, UserId},
    errors::DomainResult,
};
use async_trait::async_trait;
use std::sync::Arc;

/// Work performed once a logged-in user's domain, client and config are ready
///
/// Implementations are the extension point of the login pipeline, e.g. group
/// membership sync or user attribute sync.
#[async_trait]
pub trait LoginAction: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str {
        self.config_section()
    }

    /// Configuration section this action reads, e.g. `groupsync`
    fn config_section(&self) -> &str;

    /// Returns whether the action considers itself successful
    async fn run(
        &self,
        user_id: &UserId,
        domain: &DomainName,
        client: Arc<DirectoryClient>,
        config: Arc<DomainConfig>,
    ) -> DomainResult<bool>;
}
