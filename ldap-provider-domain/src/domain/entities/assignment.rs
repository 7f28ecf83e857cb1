use super::common::{DomainName, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted relation from a user to the domain responsible for them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainAssignment {
    pub user_id: UserId,
    pub domain: DomainName,
    pub assigned_at: DateTime<Utc>,
}

impl DomainAssignment {
    pub fn new(user_id: UserId, domain: DomainName) -> Self {
        Self {
            user_id,
            domain,
            assigned_at: Utc::now(),
        }
    }
}

/// A successful login, as delivered by the host's hook dispatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginEvent {
    pub user_id: UserId,
    pub session_id: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl LoginEvent {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            session_id: None,
            occurred_at: Utc::now(),
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}
