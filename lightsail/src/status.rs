//! Status queries for Lightsail operations and resources
//!
//! Each query reads one field off a Lightsail response and reports it as the
//! state label the waiter matches against.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tfwait::{StatusQuery, StatusSnapshot};

use crate::api::{ApiError, ContainerService, LightsailApi, Operation, RelationalDatabase};

pub const OPERATION_STATUS_STARTED: &str = "Started";
pub const OPERATION_STATUS_FAILED: &str = "Failed";
pub const OPERATION_STATUS_COMPLETED: &str = "Completed";
pub const OPERATION_STATUS_SUCCEEDED: &str = "Succeeded";

pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(20 * 60);
pub const OPERATION_DELAY: Duration = Duration::from_secs(5);
pub const OPERATION_MIN_TIMEOUT: Duration = Duration::from_secs(3);

/// Relational database undergoing a modification
pub const DATABASE_STATE_MODIFYING: &str = "modifying";
/// Relational database ready for the next modification
pub const DATABASE_STATE_AVAILABLE: &str = "available";

pub const DATABASE_TIMEOUT: Duration = Duration::from_secs(20 * 60);
pub const DATABASE_DELAY: Duration = Duration::from_secs(5);
pub const DATABASE_MIN_TIMEOUT: Duration = Duration::from_secs(3);

/// Container service is being created
pub const CONTAINER_SERVICE_STATE_PENDING: &str = "PENDING";
/// Running without an active container deployment
pub const CONTAINER_SERVICE_STATE_READY: &str = "READY";
/// Launching a container deployment
pub const CONTAINER_SERVICE_STATE_DEPLOYING: &str = "DEPLOYING";
/// Running with an active container deployment
pub const CONTAINER_SERVICE_STATE_RUNNING: &str = "RUNNING";
pub const CONTAINER_SERVICE_STATE_UPDATING: &str = "UPDATING";
pub const CONTAINER_SERVICE_STATE_DELETING: &str = "DELETING";
/// Disabled; the active deployment and its containers are shut down
pub const CONTAINER_SERVICE_STATE_DISABLED: &str = "DISABLED";

pub const CONTAINER_SERVICE_TIMEOUT: Duration = Duration::from_secs(25 * 60);
pub const CONTAINER_SERVICE_DELAY: Duration = Duration::from_secs(5);
pub const CONTAINER_SERVICE_MIN_TIMEOUT: Duration = Duration::from_secs(3);

/// Backup retention flags are compared as `"true"` / `"false"` labels
pub fn bool_label(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

pub struct OperationStatusQuery {
    api: Arc<dyn LightsailApi>,
}

impl OperationStatusQuery {
    pub fn new(api: Arc<dyn LightsailApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl StatusQuery for OperationStatusQuery {
    type Target = str;
    type Payload = Operation;
    type Error = ApiError;

    async fn query(&self, operation_id: &str) -> Result<StatusSnapshot<Operation>, ApiError> {
        tracing::debug!("Checking if Lightsail Operation ({}) is Completed", operation_id);

        let op = self.api.get_operation(operation_id).await?;
        let status = op
            .status
            .clone()
            .ok_or_else(|| ApiError::missing("operation", operation_id, "status"))?;

        tracing::debug!(
            "Lightsail Operation ({}) is currently {:?}",
            operation_id,
            status
        );
        Ok(StatusSnapshot::new(status, op))
    }
}

pub struct DatabaseStateQuery {
    api: Arc<dyn LightsailApi>,
}

impl DatabaseStateQuery {
    pub fn new(api: Arc<dyn LightsailApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl StatusQuery for DatabaseStateQuery {
    type Target = str;
    type Payload = RelationalDatabase;
    type Error = ApiError;

    async fn query(&self, name: &str) -> Result<StatusSnapshot<RelationalDatabase>, ApiError> {
        tracing::debug!(
            "Checking if Lightsail Database ({}) is in an available state",
            name
        );

        let db = self.api.get_relational_database(name).await?;
        let state = db
            .state
            .clone()
            .ok_or_else(|| ApiError::missing("relational database", name, "state"))?;

        tracing::debug!("Lightsail Database ({}) is currently {:?}", name, state);
        Ok(StatusSnapshot::new(state, db))
    }
}

pub struct DatabaseBackupRetentionQuery {
    api: Arc<dyn LightsailApi>,
}

impl DatabaseBackupRetentionQuery {
    pub fn new(api: Arc<dyn LightsailApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl StatusQuery for DatabaseBackupRetentionQuery {
    type Target = str;
    type Payload = RelationalDatabase;
    type Error = ApiError;

    async fn query(&self, name: &str) -> Result<StatusSnapshot<RelationalDatabase>, ApiError> {
        tracing::debug!(
            "Checking if Lightsail Database ({}) Backup Retention setting has been updated",
            name
        );

        let db = self.api.get_relational_database(name).await?;
        let enabled = db.backup_retention_enabled.ok_or_else(|| {
            ApiError::missing("relational database", name, "backupRetentionEnabled")
        })?;

        tracing::debug!(
            "Lightsail Database ({}) Backup Retention setting is currently {}",
            name,
            enabled
        );
        Ok(StatusSnapshot::new(bool_label(enabled), db))
    }
}

pub struct ContainerServiceStateQuery {
    api: Arc<dyn LightsailApi>,
}

impl ContainerServiceStateQuery {
    pub fn new(api: Arc<dyn LightsailApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl StatusQuery for ContainerServiceStateQuery {
    type Target = str;
    type Payload = ContainerService;
    type Error = ApiError;

    async fn query(&self, name: &str) -> Result<StatusSnapshot<ContainerService>, ApiError> {
        tracing::debug!("Checking Lightsail Container Service ({}) state changes", name);

        let service = self.api.get_container_service(name).await?;
        let state = service
            .state
            .clone()
            .ok_or_else(|| ApiError::missing("container service", name, "state"))?;

        Ok(StatusSnapshot::new(state, service))
    }
}
