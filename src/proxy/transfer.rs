//! Interception proxy for the call-transfer feature
//!
//! Rewrites transfer-requested subscriptions so that accepting a transfer
//! also records the accepted target against the owning call. Subscription
//! itself is never teed; the projection happens when the payload's accept
//! action runs, not when the listener is registered.

use std::sync::Arc;

use chrono::Utc;

use crate::call::CallId;
use crate::sdk::{
    AcceptTransferFn, FeatureId, FeatureObject, TransferEventListener, TransferOperations,
    TransferRequestedListener, TransferRequestedPayload,
};
use crate::state::{AcceptedTransfer, CallStateStore};

/// Transfer feature wrapper that projects accepted transfers into the store
pub struct TransferProxy {
    store: Arc<CallStateStore>,
    call_id: CallId,
    inner: Arc<dyn TransferOperations>,
}

impl TransferProxy {
    /// Wrap a transfer feature belonging to `call_id`
    pub fn new(
        store: Arc<CallStateStore>,
        call_id: CallId,
        inner: Arc<dyn TransferOperations>,
    ) -> Self {
        Self {
            store,
            call_id,
            inner,
        }
    }

    /// Decorate a transfer-requested listener so accepts are projected
    ///
    /// The delivered payload is rebuilt, never mutated: the caller's listener
    /// receives a payload identical to the SDK's except that its accept
    /// action records an [`AcceptedTransfer`] before handing the accepted
    /// call object back unchanged.
    fn rewrite_requested_listener(
        &self,
        listener: TransferRequestedListener,
    ) -> TransferRequestedListener {
        let store = self.store.clone();
        let call_id = self.call_id.clone();
        Arc::new(move |payload: TransferRequestedPayload| {
            let inner_accept = payload.accept_fn();
            let store = store.clone();
            let call_id = call_id.clone();
            let teed_accept: AcceptTransferFn = Arc::new(move |options| {
                let accepted = inner_accept(options);
                store.set_accepted_transfer(
                    &call_id,
                    AcceptedTransfer {
                        call_id: accepted.id(),
                        timestamp: Utc::now(),
                    },
                );
                tracing::debug!(
                    call_id = %call_id,
                    accepted_call_id = %accepted.id(),
                    "transfer accepted"
                );
                accepted
            });
            listener(TransferRequestedPayload::new(
                payload.target_participant(),
                teed_accept,
            ));
        })
    }
}

impl TransferOperations for TransferProxy {
    fn on(&self, listener: TransferEventListener) {
        match listener {
            TransferEventListener::TransferRequested(listener) => {
                let rewritten = self.rewrite_requested_listener(listener);
                self.inner
                    .on(TransferEventListener::TransferRequested(rewritten));
            }
            // Every other subscription forwards unmodified.
            other => self.inner.on(other),
        }
    }
}

impl FeatureObject for TransferProxy {
    fn feature_id(&self) -> FeatureId {
        FeatureId::transfer()
    }

    fn as_transfer(self: Arc<Self>) -> Option<Arc<dyn TransferOperations>> {
        Some(self)
    }
}
