pub mod env_config;
pub mod logging;
pub mod memory_domain_store;
pub mod static_domain_config;

pub use env_config::*;
pub use logging::*;
pub use memory_domain_store::*;
pub use static_domain_config::*;
