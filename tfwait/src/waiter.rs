//! Poll-until-terminal-state loop
//!
//! A [`WaitSpec`] describes one wait: which states mean "keep polling", which
//! mean "done", and how long to keep trying. It is built fresh for every
//! create/update/delete and dropped when [`WaitSpec::wait`] returns.

use std::time::Duration;

use tokio::time::{self, Instant};

use crate::error::WaitError;
use crate::query::StatusQuery;
use crate::state::StatusSnapshot;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5 * 60);
const DEFAULT_MIN_TIMEOUT: Duration = Duration::from_secs(1);
/// Stand-in deadline for timeouts too large to add to the current instant
const FAR_FUTURE: Duration = Duration::from_secs(86400 * 365 * 30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitSpec {
    pending: Vec<String>,
    target: Vec<String>,
    timeout: Duration,
    delay: Duration,
    min_timeout: Duration,
}

impl Default for WaitSpec {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            target: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            delay: Duration::ZERO,
            min_timeout: DEFAULT_MIN_TIMEOUT,
        }
    }
}

impl WaitSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pending = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn target<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target = states.into_iter().map(Into::into).collect();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn min_timeout(mut self, min_timeout: Duration) -> Self {
        self.min_timeout = min_timeout;
        self
    }

    pub fn pending_states(&self) -> &[String] {
        &self.pending
    }

    pub fn target_states(&self) -> &[String] {
        &self.target
    }

    pub fn total_timeout(&self) -> Duration {
        self.timeout
    }

    /// Sleep between two polls: the fixed delay, never below `min_timeout`
    pub fn poll_interval(&self) -> Duration {
        self.delay.max(self.min_timeout)
    }

    /// Polls `query` for `target` until a target state shows up.
    ///
    /// The first query is issued immediately. A state that is neither
    /// pending nor target ends the wait at once, as does any query error.
    /// A query still running when the deadline passes gets at most one more
    /// poll interval before the wait is abandoned with a timeout.
    pub async fn wait<Q>(
        &self,
        query: &Q,
        target: &Q::Target,
    ) -> Result<StatusSnapshot<Q::Payload>, WaitError<Q::Error>>
    where
        Q: StatusQuery + ?Sized,
    {
        if self.target.is_empty() {
            return Err(WaitError::InvalidSpec(
                "at least one target state is required".to_string(),
            ));
        }

        let interval = self.poll_interval();
        let now = Instant::now();
        let deadline = now
            .checked_add(self.timeout)
            .unwrap_or_else(|| now + FAR_FUTURE);
        let query_deadline = deadline.checked_add(interval).unwrap_or(deadline);
        let mut last_state: Option<String> = None;
        let mut polls: u32 = 0;

        tracing::debug!(
            "Waiting for state to become: {:?} (pending: {:?}, timeout: {:?})",
            self.target,
            self.pending,
            self.timeout
        );

        loop {
            polls += 1;

            let snapshot = match time::timeout_at(query_deadline, query.query(target)).await {
                Ok(Ok(snapshot)) => snapshot,
                Ok(Err(err)) => {
                    tracing::debug!("Status query failed on poll {}: {}", polls, err);
                    return Err(WaitError::QueryFailed(err));
                }
                Err(_) => {
                    tracing::warn!("Status query still running past the wait deadline");
                    return Err(self.timeout_error(last_state));
                }
            };

            tracing::debug!("Poll {}: state is {:?}", polls, snapshot.state);

            if snapshot.is_in(&self.target) {
                tracing::debug!(
                    "Reached target state {:?} after {} poll(s)",
                    snapshot.state,
                    polls
                );
                return Ok(snapshot);
            }

            if !snapshot.is_in(&self.pending) {
                tracing::warn!(
                    "Unexpected state {:?}, wanted one of {:?}",
                    snapshot.state,
                    self.target
                );
                return Err(WaitError::UnexpectedState {
                    state: snapshot.state,
                    target: self.target.clone(),
                });
            }

            last_state = Some(snapshot.state);

            let now = Instant::now();
            if now >= deadline {
                return Err(self.timeout_error(last_state));
            }

            time::sleep(interval.min(deadline - now)).await;
        }
    }

    fn timeout_error<E>(&self, last_state: Option<String>) -> WaitError<E> {
        WaitError::Timeout {
            last_state,
            target: self.target.clone(),
            timeout: self.timeout,
        }
    }
}
