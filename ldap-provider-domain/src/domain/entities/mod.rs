pub mod assignment;
pub mod common;
pub mod directory_client;
pub mod domain_config;

pub use assignment::*;
pub use common::*;
pub use directory_client::*;
pub use domain_config::*;
