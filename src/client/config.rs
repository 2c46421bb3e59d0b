//! Configuration for a stateful call client session

use crate::state::{DEFAULT_EVENT_CAPACITY, DEFAULT_MAX_ENDED_CALLS};

/// Configuration for one [`crate::client::StatefulCallClient`] session
///
/// Works out of the box via [`Default`]; the `with_*` methods chain for
/// readable overrides.
///
/// # Examples
///
/// ```rust
/// use callstate_core::ClientConfig;
///
/// let config = ClientConfig::new()
///     .with_event_channel_capacity(64)
///     .with_max_ended_calls(5);
///
/// assert_eq!(config.event_channel_capacity, 64);
/// assert_eq!(config.max_ended_calls, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Capacity of the state-event broadcast channel
    ///
    /// Subscribers that lag past this many undelivered events observe a lag
    /// error and must re-snapshot from the store.
    pub event_channel_capacity: usize,
    /// How many retired calls the store keeps for terminal views
    pub max_ended_calls: usize,
}

impl ClientConfig {
    /// Configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the state-event channel capacity
    pub fn with_event_channel_capacity(mut self, capacity: usize) -> Self {
        self.event_channel_capacity = capacity;
        self
    }

    /// Override the ended-call history bound
    pub fn with_max_ended_calls(mut self, max: usize) -> Self {
        self.max_ended_calls = max;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            event_channel_capacity: DEFAULT_EVENT_CAPACITY,
            max_ended_calls: DEFAULT_MAX_ENDED_CALLS,
        }
    }
}
