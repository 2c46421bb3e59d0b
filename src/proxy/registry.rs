//! Feature interception registry
//!
//! Maps a [`FeatureId`] to the factory that builds its interception proxy.
//! The registry is extended by registration, not by editing a dispatch
//! switch: a binding that grows a new stateful feature registers one more
//! factory and the call proxy picks it up unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use crate::call::CallId;
use crate::sdk::{FeatureId, FeatureObject};
use crate::state::CallStateStore;

use super::captions::CaptionsProxy;
use super::transfer::TransferProxy;

/// Everything a feature proxy factory needs to wrap one feature object
pub struct FeatureProxyContext {
    /// Store the proxy will project into
    pub store: Arc<CallStateStore>,
    /// Call the feature was obtained from
    pub call_id: CallId,
    /// The raw feature object handed back by the SDK
    pub inner: Arc<dyn FeatureObject>,
}

/// Builds the interception proxy for one feature id
///
/// A factory that cannot wrap the object it was handed (the capability view
/// is absent) returns the raw object instead; an unsupported feature simply
/// receives no projection.
pub type FeatureProxyFactory =
    Arc<dyn Fn(FeatureProxyContext) -> Arc<dyn FeatureObject> + Send + Sync>;

/// Registry of feature-id-keyed proxy factories
pub struct FeatureProxyRegistry {
    factories: HashMap<FeatureId, FeatureProxyFactory>,
}

impl FeatureProxyRegistry {
    /// An empty registry: every feature passes through unwrapped
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// A registry pre-loaded with the captions and transfer proxies
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(
            FeatureId::captions(),
            Arc::new(|ctx: FeatureProxyContext| match ctx.inner.clone().as_captions() {
                Some(captions) => {
                    Arc::new(CaptionsProxy::new(ctx.store, ctx.call_id, captions)) as Arc<dyn FeatureObject>
                }
                None => ctx.inner,
            }),
        );
        registry.register(
            FeatureId::transfer(),
            Arc::new(|ctx: FeatureProxyContext| match ctx.inner.clone().as_transfer() {
                Some(transfer) => {
                    Arc::new(TransferProxy::new(ctx.store, ctx.call_id, transfer)) as Arc<dyn FeatureObject>
                }
                None => ctx.inner,
            }),
        );
        registry
    }

    /// Register (or replace) the factory for a feature id
    pub fn register(&mut self, feature: FeatureId, factory: FeatureProxyFactory) {
        tracing::debug!(feature = %feature, "registered feature proxy factory");
        self.factories.insert(feature, factory);
    }

    /// Whether a factory is registered for `feature`
    pub fn is_registered(&self, feature: &FeatureId) -> bool {
        self.factories.contains_key(feature)
    }

    /// Build the proxy for `feature`, or `None` when no factory is registered
    pub fn build(
        &self,
        feature: &FeatureId,
        ctx: FeatureProxyContext,
    ) -> Option<Arc<dyn FeatureObject>> {
        self.factories.get(feature).map(|factory| factory(ctx))
    }
}

impl Default for FeatureProxyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for FeatureProxyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut ids: Vec<&FeatureId> = self.factories.keys().collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        f.debug_struct("FeatureProxyRegistry")
            .field("registered", &ids)
            .finish()
    }
}
