use crate::{
    application::ports::{DirectoryClientProvider, DomainConfigProvider, DomainStore, LoginAction},
    domain::{
        entities::{DirectoryClient, DomainName, LoginEvent, UserId},
        errors::DomainResult,
    },
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Stages of one login event run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    DomainResolved,
    Skipped,
    ClientReady,
    ConfigReady,
    Delegated,
    Done,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PipelineStage::Start => "start",
            PipelineStage::DomainResolved => "domain_resolved",
            PipelineStage::Skipped => "skipped",
            PipelineStage::ClientReady => "client_ready",
            PipelineStage::ConfigReady => "config_ready",
            PipelineStage::Delegated => "delegated",
            PipelineStage::Done => "done",
        };
        write!(f, "{s}")
    }
}

/// Result of a run that did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// The user has no assigned domain
    Skipped,
    /// The action ran and reported `success`
    Completed { domain: DomainName, success: bool },
}

impl PipelineOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            PipelineOutcome::Skipped => true,
            PipelineOutcome::Completed { success, .. } => *success,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, PipelineOutcome::Skipped)
    }
}

/// Per-action result of [`LoginEventPipeline::handle_all`]
#[derive(Debug)]
pub struct ActionReport {
    pub action: String,
    pub result: DomainResult<bool>,
}

/// Outcome of [`LoginEventPipeline::handle_all`]
#[derive(Debug)]
pub enum BatchOutcome {
    Skipped,
    Completed {
        domain: DomainName,
        reports: Vec<ActionReport>,
    },
}

/// Runs login actions once the user's domain, client and config are known
pub struct LoginEventPipeline {
    domain_store: Arc<dyn DomainStore>,
    client_provider: Arc<dyn DirectoryClientProvider>,
    config_provider: Arc<dyn DomainConfigProvider>,
}

impl LoginEventPipeline {
    pub fn new(
        domain_store: Arc<dyn DomainStore>,
        client_provider: Arc<dyn DirectoryClientProvider>,
        config_provider: Arc<dyn DomainConfigProvider>,
    ) -> Self {
        Self {
            domain_store,
            client_provider,
            config_provider,
        }
    }

    /// Resolve the user's domain and run `action` against it.
    ///
    /// A user without an assigned domain is skipped successfully. Errors
    /// from the store, the client provider and the config provider are
    /// returned as-is, as is whatever the action reports.
    #[instrument(
        skip(self, action),
        fields(user_id = %user_id, action = %action.name(), run_id = %Uuid::new_v4())
    )]
    pub async fn handle(
        &self,
        user_id: &UserId,
        action: &dyn LoginAction,
    ) -> DomainResult<PipelineOutcome> {
        debug!(stage = %PipelineStage::Start, "Looking up domain for user '{}'", user_id);

        let Some(domain) = self.domain_store.get_domain_for_user(user_id).await? else {
            debug!(stage = %PipelineStage::Skipped, "User '{}' has no assigned domain", user_id);
            return Ok(PipelineOutcome::Skipped);
        };

        self.process(user_id, domain, action).await
    }

    /// Run `action` for a domain the caller already knows, bypassing the store
    #[instrument(
        skip(self, action),
        fields(user_id = %user_id, domain = %domain, action = %action.name())
    )]
    pub async fn handle_for_domain(
        &self,
        user_id: &UserId,
        domain: &DomainName,
        action: &dyn LoginAction,
    ) -> DomainResult<PipelineOutcome> {
        self.process(user_id, domain.clone(), action).await
    }

    /// Run several actions for one login, sharing the domain lookup and client.
    ///
    /// Actions run in order; a failing action does not stop the ones after it.
    #[instrument(skip(self, actions), fields(user_id = %user_id, actions = actions.len()))]
    pub async fn handle_all(
        &self,
        user_id: &UserId,
        actions: &[&dyn LoginAction],
    ) -> DomainResult<BatchOutcome> {
        let Some(domain) = self.domain_store.get_domain_for_user(user_id).await? else {
            debug!(stage = %PipelineStage::Skipped, "User '{}' has no assigned domain", user_id);
            return Ok(BatchOutcome::Skipped);
        };

        let client = self.client_provider.get_for_domain(&domain).await?;

        let mut reports = Vec::with_capacity(actions.len());
        for action in actions {
            let result = self
                .delegate(user_id, &domain, Arc::clone(&client), *action)
                .await;
            if let Err(ref e) = result {
                warn!("Login action '{}' failed for user '{}': {}", action.name(), user_id, e);
            }
            reports.push(ActionReport {
                action: action.name().to_string(),
                result,
            });
        }

        Ok(BatchOutcome::Completed { domain, reports })
    }

    /// Hook-callback surface: never fails, so a broken run cannot block the login.
    ///
    /// Returns `false` when the run errored or the action reported failure.
    pub async fn on_user_logged_in(&self, event: &LoginEvent, action: &dyn LoginAction) -> bool {
        match self.handle(&event.user_id, action).await {
            Ok(PipelineOutcome::Skipped) => true,
            Ok(PipelineOutcome::Completed { domain, success }) => {
                if !success {
                    warn!(
                        "Login action '{}' reported failure for user '{}' in domain '{}'",
                        action.name(),
                        event.user_id,
                        domain
                    );
                }
                success
            }
            Err(e) if e.is_configuration_mismatch() => {
                error!(
                    session_id = event.session_id.as_deref().unwrap_or("-"),
                    "Domain configuration rejected login action '{}' for user '{}': {}",
                    action.name(),
                    event.user_id,
                    e
                );
                false
            }
            Err(e) => {
                warn!(
                    session_id = event.session_id.as_deref().unwrap_or("-"),
                    "Login action '{}' aborted for user '{}': {}",
                    action.name(),
                    event.user_id,
                    e
                );
                false
            }
        }
    }

    async fn process(
        &self,
        user_id: &UserId,
        domain: DomainName,
        action: &dyn LoginAction,
    ) -> DomainResult<PipelineOutcome> {
        debug!(stage = %PipelineStage::DomainResolved, "User '{}' belongs to domain '{}'", user_id, domain);

        let client = self.client_provider.get_for_domain(&domain).await?;
        let success = self.delegate(user_id, &domain, client, action).await?;

        info!(
            stage = %PipelineStage::Done,
            "Login action '{}' finished for user '{}' in domain '{}' (success: {})",
            action.name(),
            user_id,
            domain,
            success
        );
        Ok(PipelineOutcome::Completed { domain, success })
    }

    async fn delegate(
        &self,
        user_id: &UserId,
        domain: &DomainName,
        client: Arc<DirectoryClient>,
        action: &dyn LoginAction,
    ) -> DomainResult<bool> {
        debug!(stage = %PipelineStage::ClientReady, "Directory client ready for domain '{}'", domain);

        let config = self
            .config_provider
            .factory(domain, action.config_section())
            .await?;
        debug!(
            stage = %PipelineStage::ConfigReady,
            "Loaded '{}' config for domain '{}'",
            config.section(),
            domain
        );

        debug!(stage = %PipelineStage::Delegated, "Running login action '{}'", action.name());
        action.run(user_id, domain, client, config).await
    }
}
