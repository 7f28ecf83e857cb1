pub mod client_registry;
pub mod domain_config_registry;
pub mod login_pipeline;

pub use client_registry::*;
pub use domain_config_registry::*;
pub use login_pipeline::*;
