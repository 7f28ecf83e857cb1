#![allow(dead_code)]

use async_trait::async_trait;
use ldap_provider_domain::{
    application::ports::{
        DirectoryClientProvider, DomainConfigProvider, DomainConfigSource, DomainStore,
        LoginAction, ServerParametersSource,
    },
    domain::{
        entities::{
            ConfigMap, DirectoryClient, DomainAssignment, DomainConfig, DomainName, UserId,
        },
        errors::{DomainError, DomainResult, StoreError},
    },
    infrastructure::adapters::{InMemoryDomainStore, StaticDomainConfiguration},
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn domain(name: &str) -> DomainName {
    DomainName::new(name).expect("valid domain name")
}

pub fn config_map(value: serde_json::Value) -> ConfigMap {
    serde_json::from_value(value).expect("JSON object")
}

/// Domain store wrapper that counts lookups and can simulate datastore outages
pub struct MockDomainStore {
    inner: InMemoryDomainStore,
    pub lookups: AtomicUsize,
    pub should_fail: Mutex<bool>,
}

impl MockDomainStore {
    pub fn new() -> Self {
        Self {
            inner: InMemoryDomainStore::new(),
            lookups: AtomicUsize::new(0),
            should_fail: Mutex::new(false),
        }
    }

    pub fn with_assignment(user_id: UserId, domain: DomainName) -> Self {
        Self {
            inner: InMemoryDomainStore::with_assignments([(user_id, domain)]),
            lookups: AtomicUsize::new(0),
            should_fail: Mutex::new(false),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock().unwrap() = should_fail;
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    fn check_should_fail(&self) -> DomainResult<()> {
        if *self.should_fail.lock().unwrap() {
            Err(StoreError::ConnectionFailed {
                message: "Mock datastore unavailable".to_string(),
            }
            .into())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DomainStore for MockDomainStore {
    async fn get_domain_for_user(&self, user_id: &UserId) -> DomainResult<Option<DomainName>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.check_should_fail()?;
        self.inner.get_domain_for_user(user_id).await
    }

    async fn set_domain_for_user(&self, user_id: &UserId, domain: &DomainName) -> DomainResult<()> {
        self.check_should_fail()?;
        self.inner.set_domain_for_user(user_id, domain).await
    }

    async fn clear_domain_for_user(&self, user_id: &UserId) -> DomainResult<()> {
        self.check_should_fail()?;
        self.inner.clear_domain_for_user(user_id).await
    }

    async fn get_assignment(&self, user_id: &UserId) -> DomainResult<Option<DomainAssignment>> {
        self.check_should_fail()?;
        self.inner.get_assignment(user_id).await
    }
}

/// Static configuration wrapper counting how often each source is consulted
pub struct CountingConfigurationSource {
    inner: StaticDomainConfiguration,
    pub server_parameter_reads: AtomicUsize,
    pub override_reads: AtomicUsize,
}

impl CountingConfigurationSource {
    pub fn new(inner: StaticDomainConfiguration) -> Self {
        Self {
            inner,
            server_parameter_reads: AtomicUsize::new(0),
            override_reads: AtomicUsize::new(0),
        }
    }

    pub fn server_parameter_reads(&self) -> usize {
        self.server_parameter_reads.load(Ordering::SeqCst)
    }

    pub fn override_reads(&self) -> usize {
        self.override_reads.load(Ordering::SeqCst)
    }
}

impl ServerParametersSource for CountingConfigurationSource {
    fn server_parameters(&self, domain: &DomainName) -> Option<ConfigMap> {
        self.server_parameter_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.server_parameters(domain)
    }
}

impl DomainConfigSource for CountingConfigurationSource {
    fn has_domain(&self, domain: &DomainName) -> bool {
        self.inner.has_domain(domain)
    }

    fn domains(&self) -> Vec<DomainName> {
        self.inner.domains()
    }

    fn section_defaults(&self, section: &str) -> Option<ConfigMap> {
        self.inner.section_defaults(section)
    }

    fn section_overrides(&self, domain: &DomainName, section: &str) -> Option<ConfigMap> {
        self.override_reads.fetch_add(1, Ordering::SeqCst);
        self.inner.section_overrides(domain, section)
    }
}

/// Provider wrapper counting calls made by the pipeline
pub struct CountingClientProvider<P> {
    inner: P,
    pub calls: AtomicUsize,
}

impl<P> CountingClientProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<P: DirectoryClientProvider> DirectoryClientProvider for CountingClientProvider<P> {
    async fn get_for_domain(&self, domain: &DomainName) -> DomainResult<Arc<DirectoryClient>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_for_domain(domain).await
    }
}

/// Provider wrapper counting calls made by the pipeline
pub struct CountingConfigProvider<P> {
    inner: P,
    pub calls: AtomicUsize,
}

impl<P> CountingConfigProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<P: DomainConfigProvider> DomainConfigProvider for CountingConfigProvider<P> {
    async fn factory(&self, domain: &DomainName, section: &str) -> DomainResult<Arc<DomainConfig>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.factory(domain, section).await
    }
}

/// One recorded invocation of a login action
#[derive(Clone)]
pub struct RecordedRun {
    pub user_id: UserId,
    pub domain: DomainName,
    pub client: Arc<DirectoryClient>,
    pub config: Arc<DomainConfig>,
}

/// Login action that records its arguments and answers with a fixed result
pub struct RecordingAction {
    section: String,
    outcome: Mutex<Option<DomainResult<bool>>>,
    runs: Mutex<Vec<RecordedRun>>,
}

impl RecordingAction {
    pub fn new(section: &str) -> Self {
        Self {
            section: section.to_string(),
            outcome: Mutex::new(None),
            runs: Mutex::new(Vec::new()),
        }
    }

    pub fn reporting(section: &str, success: bool) -> Self {
        let action = Self::new(section);
        *action.outcome.lock().unwrap() = Some(Ok(success));
        action
    }

    pub fn failing(section: &str, message: &str) -> Self {
        let action = Self::new(section);
        *action.outcome.lock().unwrap() = Some(Err(DomainError::ActionFailed {
            action: section.to_string(),
            message: message.to_string(),
        }));
        action
    }

    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.lock().unwrap().clone()
    }
}

#[async_trait]
impl LoginAction for RecordingAction {
    fn config_section(&self) -> &str {
        &self.section
    }

    async fn run(
        &self,
        user_id: &UserId,
        domain: &DomainName,
        client: Arc<DirectoryClient>,
        config: Arc<DomainConfig>,
    ) -> DomainResult<bool> {
        self.runs.lock().unwrap().push(RecordedRun {
            user_id: user_id.clone(),
            domain: domain.clone(),
            client,
            config,
        });

        match self.outcome.lock().unwrap().as_ref() {
            None | Some(Ok(true)) => Ok(true),
            Some(Ok(false)) => Ok(false),
            Some(Err(DomainError::ActionFailed { action, message })) => {
                Err(DomainError::ActionFailed {
                    action: action.clone(),
                    message: message.clone(),
                })
            }
            Some(Err(other)) => Err(DomainError::ActionFailed {
                action: self.section.clone(),
                message: other.to_string(),
            }),
        }
    }
}

/// Domain table shared by the integration tests.
///
/// - `CORP`: plain LDAP, `groupsync` and `sync` overrides
/// - `LAB`: LDAPS, no overrides
/// - `BROKEN`: connection section without a host
/// - `CONFIG_ONLY`: registered sections but no connection section
pub fn test_configuration() -> StaticDomainConfiguration {
    StaticDomainConfiguration::new()
        .with_domain_section(
            domain("CORP"),
            "connection",
            config_map(serde_json::json!({
                "server": "ldap.corp.example",
                "basedn": "dc=corp",
                "user": "cn=reader,dc=corp",
                "pass": "reader-secret"
            })),
        )
        .with_domain_section(
            domain("CORP"),
            "groupsync",
            config_map(serde_json::json!({ "baseDN": "ou=users,dc=corp" })),
        )
        .with_domain_section(
            domain("CORP"),
            "sync",
            config_map(serde_json::json!({ "timeout": 5 })),
        )
        .with_domain_section(
            domain("LAB"),
            "connection",
            config_map(serde_json::json!({ "server": "ldap.lab.example", "enctype": "ssl" })),
        )
        .with_domain_section(
            domain("BROKEN"),
            "connection",
            config_map(serde_json::json!({ "port": 389 })),
        )
        .with_domain_section(
            domain("CONFIG_ONLY"),
            "groupsync",
            config_map(serde_json::json!({ "baseDN": "ou=people,dc=config" })),
        )
        .with_section_defaults("sync", config_map(serde_json::json!({ "timeout": 30 })))
}
