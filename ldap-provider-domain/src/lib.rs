/*!
# LDAP Provider Domain

Domain-keyed resolution and client provisioning for LDAP login hooks,
following hexagonal architecture principles.

On every successful login the host hands the user to a [`LoginEventPipeline`],
which resolves the user's authentication domain, fetches that domain's
directory client and section configuration from process-wide caches, and
delegates to a pluggable [`LoginAction`] (group sync, user-info sync, ...).

## Architecture

```text
┌─────────────────────────────────────────────────────────────┐
│                 Host login hook dispatch                    │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                Application Layer                            │
├─────────────────────────────────────────────────────────────┤
│  • LoginEventPipeline       • ClientRegistry                │
│  • DomainConfigRegistry                                     │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│                 Domain Layer (Ports)                        │
├─────────────────────────────────────────────────────────────┤
│  • DomainStore              • LoginAction                   │
│  • ServerParametersSource   • DomainConfigSource            │
└─────────────────────────────────────────────────────────────┘
                              │
┌─────────────────────────────────────────────────────────────┐
│              Infrastructure Layer (Adapters)                │
├─────────────────────────────────────────────────────────────┤
│  • InMemoryDomainStore      • StaticDomainConfiguration     │
│  • EnvConfigurationAdapter  • init_tracing                  │
└─────────────────────────────────────────────────────────────┘
```

## Usage

```rust,ignore
use ldap_provider_domain::{
    infrastructure::adapters::{EnvConfigurationAdapter, InMemoryDomainStore, init_tracing},
    domain::entities::LoginEvent,
};

let adapter = EnvConfigurationAdapter::new()?;
init_tracing(adapter.logging_config());

let pipeline = adapter.build_pipeline(Arc::new(InMemoryDomainStore::new()));

// From the host's "user logged in" hook
let ok = pipeline.on_user_logged_in(&LoginEvent::new(user_id), &group_sync).await;
```
*/

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::ports::*;
pub use application::services::*;
pub use domain::entities::*;
pub use domain::errors::*;
