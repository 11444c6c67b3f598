//! Lightsail operation and resource-state waiters
//!
//! Binds the generic [`tfwait`] waiter to the Lightsail status calls used by
//! the provider's create, update and delete paths.

pub mod api;
pub mod config;
pub mod id;
pub mod status;
pub mod wait;

pub use api::{ApiError, Client, LightsailApi, NotFoundExt};
pub use config::{ConfigError, ProviderConfig};
pub use wait::{
    wait_container_service, wait_database_backup_retention_modified, wait_database_modified,
    wait_operation,
};
