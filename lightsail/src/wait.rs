//! Waits that block a create/update/delete until Lightsail settles

use std::sync::Arc;
use tfwait::{StatusSnapshot, WaitError, WaitSpec};

use crate::api::{ApiError, ContainerService, LightsailApi, Operation, RelationalDatabase};
use crate::status::*;

pub type WaitResult<T> = Result<StatusSnapshot<T>, WaitError<ApiError>>;

pub fn operation_spec() -> WaitSpec {
    WaitSpec::new()
        .pending([OPERATION_STATUS_STARTED])
        .target([OPERATION_STATUS_COMPLETED, OPERATION_STATUS_SUCCEEDED])
        .timeout(OPERATION_TIMEOUT)
        .delay(OPERATION_DELAY)
        .min_timeout(OPERATION_MIN_TIMEOUT)
}

pub fn database_modified_spec() -> WaitSpec {
    WaitSpec::new()
        .pending([DATABASE_STATE_MODIFYING])
        .target([DATABASE_STATE_AVAILABLE])
        .timeout(DATABASE_TIMEOUT)
        .delay(DATABASE_DELAY)
        .min_timeout(DATABASE_MIN_TIMEOUT)
}

/// Pending on the opposite of `desired`, done once the flag reads `desired`
pub fn backup_retention_spec(desired: bool) -> WaitSpec {
    WaitSpec::new()
        .pending([bool_label(!desired)])
        .target([bool_label(desired)])
        .timeout(DATABASE_TIMEOUT)
        .delay(DATABASE_DELAY)
        .min_timeout(DATABASE_MIN_TIMEOUT)
}

pub fn container_service_spec() -> WaitSpec {
    WaitSpec::new()
        .pending([
            CONTAINER_SERVICE_STATE_PENDING,
            CONTAINER_SERVICE_STATE_UPDATING,
            CONTAINER_SERVICE_STATE_DEPLOYING,
            CONTAINER_SERVICE_STATE_DELETING,
        ])
        .target([
            CONTAINER_SERVICE_STATE_READY,
            CONTAINER_SERVICE_STATE_RUNNING,
            CONTAINER_SERVICE_STATE_DISABLED,
        ])
        .timeout(CONTAINER_SERVICE_TIMEOUT)
        .delay(CONTAINER_SERVICE_DELAY)
        .min_timeout(CONTAINER_SERVICE_MIN_TIMEOUT)
}

/// Waits for an operation to report `Completed` or `Succeeded`
pub async fn wait_operation(
    api: Arc<dyn LightsailApi>,
    operation_id: &str,
) -> WaitResult<Operation> {
    operation_spec()
        .wait(&OperationStatusQuery::new(api), operation_id)
        .await
}

/// Waits for a modified database to return to `available`
pub async fn wait_database_modified(
    api: Arc<dyn LightsailApi>,
    name: &str,
) -> WaitResult<RelationalDatabase> {
    database_modified_spec()
        .wait(&DatabaseStateQuery::new(api), name)
        .await
}

/// Waits for the backup retention flag of a database to read `desired`
pub async fn wait_database_backup_retention_modified(
    api: Arc<dyn LightsailApi>,
    name: &str,
    desired: bool,
) -> WaitResult<RelationalDatabase> {
    backup_retention_spec(desired)
        .wait(&DatabaseBackupRetentionQuery::new(api), name)
        .await
}

/// Waits for a container service to settle in `READY`, `RUNNING` or `DISABLED`
pub async fn wait_container_service(
    api: Arc<dyn LightsailApi>,
    name: &str,
) -> WaitResult<ContainerService> {
    container_service_spec()
        .wait(&ContainerServiceStateQuery::new(api), name)
        .await
}
