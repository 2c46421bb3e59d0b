//! Call interception proxy
//!
//! [`StatefulCall`] fronts an externally supplied call object with an
//! interface indistinguishable from the object itself: it implements
//! [`CallOperations`] by forwarding each special-cased operation through the
//! store's teeing wrappers, substitutes registry-built proxies for registered
//! features, and exposes everything else on the concrete call type through
//! `Deref`, unmodified.
//!
//! # Passthrough rule
//!
//! The special-cased operation set is fixed at design time: the eight plain
//! call operations and `feature`. Any other member of the wrapped type —
//! method, field, or associated data — is reached through `Deref<Target = C>`
//! exactly as the underlying object would expose it, and reading through it
//! never touches the store.

use std::ops::Deref;
use std::sync::Arc;

use async_trait::async_trait;

use crate::call::CallId;
use crate::error::SdkResult;
use crate::sdk::{CallOperations, FeatureId, FeatureObject};
use crate::state::CallStateStore;

use super::registry::{FeatureProxyContext, FeatureProxyRegistry};

/// Forwarding wrapper that projects a call's operation outcomes into state
///
/// Built by [`crate::client::StatefulCallClient::wrap_call`]; holds a
/// non-owning reference to the SDK's call object for the lifetime of the
/// wrapper. Dropping the wrapper never destroys the underlying call.
pub struct StatefulCall<C: CallOperations> {
    inner: Arc<C>,
    store: Arc<CallStateStore>,
    registry: Arc<FeatureProxyRegistry>,
}

impl<C: CallOperations> StatefulCall<C> {
    /// Wrap `inner`, projecting its operation outcomes into `store`
    pub fn new(
        inner: Arc<C>,
        store: Arc<CallStateStore>,
        registry: Arc<FeatureProxyRegistry>,
    ) -> Self {
        Self {
            inner,
            store,
            registry,
        }
    }

    /// The wrapped call object
    pub fn inner(&self) -> &Arc<C> {
        &self.inner
    }
}

impl<C: CallOperations> Deref for StatefulCall<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.inner
    }
}

impl<C: CallOperations> Clone for StatefulCall<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            store: self.store.clone(),
            registry: self.registry.clone(),
        }
    }
}

impl<C: CallOperations> std::fmt::Debug for StatefulCall<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatefulCall")
            .field("call_id", &self.inner.id())
            .field("registry", &self.registry)
            .finish()
    }
}

#[async_trait]
impl<C: CallOperations + 'static> CallOperations for StatefulCall<C> {
    fn id(&self) -> CallId {
        self.inner.id()
    }

    async fn mute(&self) -> SdkResult<()> {
        self.store
            .with_async_error_teed_to_state("Call.mute", self.inner.mute())
            .await
    }

    async fn unmute(&self) -> SdkResult<()> {
        self.store
            .with_async_error_teed_to_state("Call.unmute", self.inner.unmute())
            .await
    }

    async fn start_video(&self) -> SdkResult<()> {
        self.store
            .with_async_error_teed_to_state("Call.startVideo", self.inner.start_video())
            .await
    }

    async fn stop_video(&self) -> SdkResult<()> {
        self.store
            .with_async_error_teed_to_state("Call.stopVideo", self.inner.stop_video())
            .await
    }

    async fn start_screen_sharing(&self) -> SdkResult<()> {
        self.store
            .with_async_error_teed_to_state(
                "Call.startScreenSharing",
                self.inner.start_screen_sharing(),
            )
            .await
    }

    async fn stop_screen_sharing(&self) -> SdkResult<()> {
        self.store
            .with_async_error_teed_to_state(
                "Call.stopScreenSharing",
                self.inner.stop_screen_sharing(),
            )
            .await
    }

    async fn hold(&self) -> SdkResult<()> {
        self.store
            .with_async_error_teed_to_state("Call.hold", self.inner.hold())
            .await
    }

    async fn resume(&self) -> SdkResult<()> {
        self.store
            .with_async_error_teed_to_state("Call.resume", self.inner.resume())
            .await
    }

    /// Obtain a feature, substituting its interception proxy when one is registered
    ///
    /// An unregistered feature id is not an error: the raw feature object
    /// comes back identity-preserved and simply receives no projection.
    fn feature(&self, feature: &FeatureId) -> SdkResult<Arc<dyn FeatureObject>> {
        self.store.with_error_teed_to_state("Call.feature", || {
            let raw = self.inner.feature(feature)?;
            match self.registry.build(
                feature,
                FeatureProxyContext {
                    store: self.store.clone(),
                    call_id: self.inner.id(),
                    inner: raw.clone(),
                },
            ) {
                Some(wrapped) => Ok(wrapped),
                None => Ok(raw),
            }
        })
    }
}
