pub mod config;
pub mod domain_store;
pub mod login;
pub mod provisioning;

pub use config::*;
pub use domain_store::*;
pub use login::*;
pub use provisioning::*;
