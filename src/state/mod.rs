//! Projected call state: the store, its record types, and error teeing
//!
//! Writers live in [`crate::proxy`]; readers are downstream UI layers, which
//! get snapshots and a broadcast subscription. See [`CallStateStore`] for the
//! concurrency contract.

mod store;
mod tee;
mod types;

pub use store::{CallStateStore, DEFAULT_EVENT_CAPACITY, DEFAULT_MAX_ENDED_CALLS};
pub use types::{AcceptedTransfer, CallProjection, EndedCall, ErrorRecord, StateEvent};
