//! Error types for tfwait

use std::time::Duration;

/// Ways a wait can end without reaching a target state.
///
/// `E` is the error type of the status query; it is handed back untouched in
/// [`WaitError::QueryFailed`].
#[derive(Debug, thiserror::Error)]
pub enum WaitError<E> {
    #[error(
        "timeout after {:?} waiting for state to become '{}' (last state: '{}')",
        .timeout,
        .target.join(", "),
        .last_state.as_deref().unwrap_or("none")
    )]
    Timeout {
        last_state: Option<String>,
        target: Vec<String>,
        timeout: Duration,
    },

    #[error("unexpected state '{}', wanted target '{}'", .state, .target.join(", "))]
    UnexpectedState { state: String, target: Vec<String> },

    #[error("status query failed: {0}")]
    QueryFailed(#[source] E),

    #[error("invalid wait configuration: {0}")]
    InvalidSpec(String),
}

impl<E> WaitError<E> {
    pub fn is_timeout(&self) -> bool {
        matches!(self, WaitError::Timeout { .. })
    }

    pub fn is_unexpected_state(&self) -> bool {
        matches!(self, WaitError::UnexpectedState { .. })
    }

    /// The status query's own error, if that is what ended the wait
    pub fn query_error(&self) -> Option<&E> {
        match self {
            WaitError::QueryFailed(err) => Some(err),
            _ => None,
        }
    }
}
