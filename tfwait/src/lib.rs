//! tfwait - state-change waiter for Terraform providers
//!
//! Polls a remote status endpoint until the reported state reaches one of a
//! declared set of target states, fails fast on states it does not recognise,
//! and gives up once the configured timeout has elapsed.

pub mod error;
pub mod query;
pub mod state;
pub mod waiter;

pub use error::WaitError;
pub use query::StatusQuery;
pub use state::StatusSnapshot;
pub use waiter::WaitSpec;
