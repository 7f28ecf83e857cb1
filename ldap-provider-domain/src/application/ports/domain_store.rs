use crate::domain::{
    entities::{DomainAssignment, DomainName, UserId},
    errors::DomainResult,
};
use async_trait::async_trait;

/// Persisted user → domain relation
///
/// An unassigned user is `Ok(None)`, never an error. Adapters report
/// datastore failures as `DomainError::Store` so callers can tell the two
/// apart.
#[async_trait]
pub trait DomainStore: Send + Sync {
    async fn get_domain_for_user(&self, user_id: &UserId) -> DomainResult<Option<DomainName>>;

    /// Upsert the user's assignment
    async fn set_domain_for_user(&self, user_id: &UserId, domain: &DomainName) -> DomainResult<()>;

    /// Remove the user's assignment; a no-op when none exists
    async fn clear_domain_for_user(&self, user_id: &UserId) -> DomainResult<()>;

    async fn get_assignment(&self, user_id: &UserId) -> DomainResult<Option<DomainAssignment>>;
}
