//! Status query capability consumed by the waiter

use async_trait::async_trait;

use crate::state::StatusSnapshot;

/// Reads the current state of one remote entity.
///
/// Implementations issue exactly one remote call per `query` and must not
/// retry internally; an error ends the wait.
#[async_trait]
pub trait StatusQuery: Send + Sync {
    /// What is being polled: an operation id, a resource name, ...
    type Target: ?Sized + Sync;
    type Payload: Send;
    type Error: std::error::Error + Send + 'static;

    async fn query(
        &self,
        target: &Self::Target,
    ) -> Result<StatusSnapshot<Self::Payload>, Self::Error>;
}
