use crate::application::ports::DomainStore;
use crate::domain::{
    entities::{DomainAssignment, DomainName, UserId},
    errors::DomainResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// In-memory domain store for tests, development and single-process hosts
#[derive(Clone, Default)]
pub struct InMemoryDomainStore {
    assignments: Arc<RwLock<HashMap<UserId, DomainAssignment>>>,
}

impl InMemoryDomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store from `(user, domain)` pairs
    pub fn with_assignments<I>(assignments: I) -> Self
    where
        I: IntoIterator<Item = (UserId, DomainName)>,
    {
        let assignments = assignments
            .into_iter()
            .map(|(user_id, domain)| (user_id.clone(), DomainAssignment::new(user_id, domain)))
            .collect();

        Self {
            assignments: Arc::new(RwLock::new(assignments)),
        }
    }

    pub async fn len(&self) -> usize {
        self.assignments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.assignments.read().await.is_empty()
    }
}

#[async_trait]
impl DomainStore for InMemoryDomainStore {
    async fn get_domain_for_user(&self, user_id: &UserId) -> DomainResult<Option<DomainName>> {
        Ok(self
            .assignments
            .read()
            .await
            .get(user_id)
            .map(|assignment| assignment.domain.clone()))
    }

    async fn set_domain_for_user(&self, user_id: &UserId, domain: &DomainName) -> DomainResult<()> {
        let previous = self.assignments.write().await.insert(
            user_id.clone(),
            DomainAssignment::new(user_id.clone(), domain.clone()),
        );

        match previous {
            Some(previous) if &previous.domain != domain => info!(
                "Moved user '{}' from domain '{}' to '{}'",
                user_id, previous.domain, domain
            ),
            Some(_) => {}
            None => info!("Assigned user '{}' to domain '{}'", user_id, domain),
        }
        Ok(())
    }

    async fn clear_domain_for_user(&self, user_id: &UserId) -> DomainResult<()> {
        if let Some(previous) = self.assignments.write().await.remove(user_id) {
            info!("Removed user '{}' from domain '{}'", user_id, previous.domain);
        }
        Ok(())
    }

    async fn get_assignment(&self, user_id: &UserId) -> DomainResult<Option<DomainAssignment>> {
        Ok(self.assignments.read().await.get(user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(name: &str) -> DomainName {
        DomainName::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_unassigned_user_is_absent() {
        let store = InMemoryDomainStore::new();
        let result = store.get_domain_for_user(&UserId::from(7u64)).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_reflects_latest_write() {
        let store = InMemoryDomainStore::new();
        let user = UserId::from(1u64);

        store.set_domain_for_user(&user, &domain("CORP")).await.unwrap();
        assert_eq!(store.get_domain_for_user(&user).await.unwrap(), Some(domain("CORP")));

        store.set_domain_for_user(&user, &domain("LAB")).await.unwrap();
        assert_eq!(store.get_domain_for_user(&user).await.unwrap(), Some(domain("LAB")));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_clear_removes_assignment_and_is_idempotent() {
        let store = InMemoryDomainStore::with_assignments([(UserId::from(1u64), domain("CORP"))]);
        let user = UserId::from(1u64);

        store.clear_domain_for_user(&user).await.unwrap();
        assert!(store.get_assignment(&user).await.unwrap().is_none());

        store.clear_domain_for_user(&user).await.unwrap();
        assert!(store.is_empty().await);
    }
}
