//! Lightsail API surface consumed by the waiters
//!
//! Only the read calls needed to observe operation and resource state are
//! modelled here. Everything is reached through [`LightsailApi`], so callers
//! receive the client as an explicit dependency and tests can swap it out.

pub mod client;
pub mod error;

#[cfg(test)]
pub(crate) mod test_helpers;

use async_trait::async_trait;
use serde::Serialize;

pub use client::Client;
pub use error::{ApiError, NotFoundExt};

/// An asynchronous Lightsail action returned by a mutating call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub id: String,
    pub status: Option<String>,
    pub operation_type: Option<String>,
    pub resource_name: Option<String>,
    pub resource_type: Option<String>,
    pub error_code: Option<String>,
    pub error_details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationalDatabase {
    pub name: String,
    pub state: Option<String>,
    pub backup_retention_enabled: Option<bool>,
    pub engine: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerService {
    pub name: String,
    pub state: Option<String>,
    pub url: Option<String>,
}

/// Read capability injected into every waiter and CRUD handler
#[async_trait]
pub trait LightsailApi: Send + Sync {
    async fn get_operation(&self, operation_id: &str) -> Result<Operation, ApiError>;

    async fn get_relational_database(&self, name: &str) -> Result<RelationalDatabase, ApiError>;

    async fn get_container_service(&self, name: &str) -> Result<ContainerService, ApiError>;
}
