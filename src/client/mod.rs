//! The client session object owning the projection machinery
//!
//! One [`StatefulCallClient`] is created per client session and torn down
//! with it. It owns the [`CallStateStore`] and the feature registry, and is
//! the factory for [`StatefulCall`] wrappers; nothing in this crate is a
//! process-wide singleton, so two sessions never share projected state.
//!
//! # Usage
//!
//! ```rust
//! use callstate_core::{CallId, StatefulCallClient};
//!
//! let client = StatefulCallClient::builder().max_ended_calls(5).build();
//!
//! // UI layers read and subscribe through the store...
//! let store = client.store();
//! let _events = store.subscribe();
//!
//! // ...while the external caption pipeline signal lands through the same
//! // store handle.
//! store.set_captions_active(&CallId::from("call-1"), true);
//! assert!(store.call(&CallId::from("call-1")).unwrap().captions_active);
//! ```

mod builder;
mod config;

pub use builder::StatefulCallClientBuilder;
pub use config::ClientConfig;

use std::sync::Arc;

use uuid::Uuid;

use crate::call::CallId;
use crate::proxy::{FeatureProxyRegistry, StatefulCall};
use crate::sdk::CallOperations;
use crate::state::CallStateStore;

/// Session-scoped owner of the store, registry, and call wrappers
pub struct StatefulCallClient {
    session_id: Uuid,
    config: ClientConfig,
    store: Arc<CallStateStore>,
    registry: Arc<FeatureProxyRegistry>,
}

impl StatefulCallClient {
    /// Create a client with the default feature registry
    pub fn new(config: ClientConfig) -> Self {
        Self::with_registry(config, FeatureProxyRegistry::with_defaults())
    }

    /// Create a client with an explicit feature registry
    pub fn with_registry(config: ClientConfig, registry: FeatureProxyRegistry) -> Self {
        let session_id = Uuid::new_v4();
        tracing::info!(%session_id, "created stateful call client");
        Self {
            session_id,
            store: Arc::new(CallStateStore::with_limits(
                config.event_channel_capacity,
                config.max_ended_calls,
            )),
            registry: Arc::new(registry),
            config,
        }
    }

    /// Start building a client fluently
    pub fn builder() -> StatefulCallClientBuilder {
        StatefulCallClientBuilder::new()
    }

    /// This session's identifier
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The session's configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The session's state store, for reading and subscribing
    pub fn store(&self) -> Arc<CallStateStore> {
        self.store.clone()
    }

    /// Wrap an SDK call object, making it visible to the projection layer
    ///
    /// Tracking starts immediately: the call's empty projection appears in
    /// the store before the wrapper is handed back, so a subscriber set up
    /// beforehand observes the call from its first instant.
    pub fn wrap_call<C>(&self, call: Arc<C>) -> StatefulCall<C>
    where
        C: CallOperations + 'static,
    {
        let call_id = call.id();
        tracing::info!(session_id = %self.session_id, call_id = %call_id, "wrapping call");
        self.store.track_call(&call_id);
        StatefulCall::new(call, self.store.clone(), self.registry.clone())
    }

    /// Retire an ended call's projection into the bounded ended history
    pub fn retire_call(&self, call_id: &CallId) {
        self.store.retire_call(call_id);
    }
}

impl std::fmt::Debug for StatefulCallClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatefulCallClient")
            .field("session_id", &self.session_id)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish()
    }
}
