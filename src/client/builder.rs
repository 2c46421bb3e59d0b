//! Fluent builder for stateful call clients
//!
//! # Examples
//!
//! ```rust
//! use callstate_core::StatefulCallClient;
//!
//! let client = StatefulCallClient::builder()
//!     .event_channel_capacity(128)
//!     .max_ended_calls(20)
//!     .build();
//!
//! assert!(client.store().calls().is_empty());
//! ```

use crate::client::config::ClientConfig;
use crate::client::StatefulCallClient;
use crate::proxy::FeatureProxyRegistry;

/// Chainable builder for [`StatefulCallClient`]
///
/// Defaults match [`ClientConfig::default`] with the standard feature
/// registry (captions + transfer proxies) pre-loaded.
pub struct StatefulCallClientBuilder {
    config: ClientConfig,
    registry: Option<FeatureProxyRegistry>,
}

impl StatefulCallClientBuilder {
    /// Start from defaults
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            registry: None,
        }
    }

    /// Set the state-event channel capacity
    pub fn event_channel_capacity(mut self, capacity: usize) -> Self {
        self.config = self.config.with_event_channel_capacity(capacity);
        self
    }

    /// Set the ended-call history bound
    pub fn max_ended_calls(mut self, max: usize) -> Self {
        self.config = self.config.with_max_ended_calls(max);
        self
    }

    /// Replace the whole configuration at once
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom feature interception registry
    ///
    /// Start from [`FeatureProxyRegistry::with_defaults`] to keep the
    /// captions and transfer proxies, or [`FeatureProxyRegistry::empty`] to
    /// project call-level operations only.
    pub fn registry(mut self, registry: FeatureProxyRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build the client session
    pub fn build(self) -> StatefulCallClient {
        let registry = self
            .registry
            .unwrap_or_else(FeatureProxyRegistry::with_defaults);
        StatefulCallClient::with_registry(self.config, registry)
    }
}

impl Default for StatefulCallClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
