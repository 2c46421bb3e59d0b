//! # callstate-core — Stateful Call Projection Layer
//!
//! This crate fronts the imperative, stateful call object of a third-party
//! real-time communication SDK with interception proxies, and projects every
//! state-affecting operation performed on it into a centrally owned,
//! read-only state tree that UI code can snapshot or subscribe to:
//!
//! - every special-cased call/feature operation is *teed*: its failure is
//!   recorded against the operation's name before being re-surfaced to the
//!   caller unchanged;
//! - feature sub-objects obtained on demand are recursively wrapped through a
//!   feature-id-keyed registry;
//! - selected event subscriptions are rewritten so that externally delivered
//!   payloads update local state before reaching the caller's listener.
//!
//! The layer is a faithful mirror, not a reconciler: it never retries a
//! failed operation, never constructs or destroys SDK objects, and never
//! resolves disagreements between the SDK and the projection.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────┐
//! │    UI / application code    │──── snapshots & subscriptions ───┐
//! └──────────────┬──────────────┘                                  │
//!                │ CallOperations                                  │
//! ┌──────────────▼──────────────┐     ┌───────────────────────┐    │
//! │  StatefulCall / feature     │────►│    CallStateStore     │◄───┘
//! │  proxies (teed forwarding)  │     │  (per-call state +    │
//! └──────────────┬──────────────┘     │   error records)      │
//!                │                    └───────────────────────┘
//! ┌──────────────▼──────────────┐
//! │    third-party call SDK     │
//! └─────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use callstate_core::{CallId, StatefulCallClient};
//!
//! // One client per session; it owns the store and the feature registry.
//! let client = StatefulCallClient::builder()
//!     .event_channel_capacity(128)
//!     .build();
//!
//! let store = client.store();
//! let _events = store.subscribe();
//!
//! // Wrap each SDK call object with `client.wrap_call(..)` as it appears;
//! // from then on its operations project into the store automatically.
//! // External signals (e.g. the caption pipeline going live) land through
//! // the store's mutation points:
//! store.set_captions_active(&CallId::from("call-1"), true);
//!
//! let projection = store.call(&CallId::from("call-1")).unwrap();
//! assert!(projection.captions_active);
//! ```

#![warn(missing_docs)]

pub mod call;
pub mod client;
pub mod error;
pub mod proxy;
pub mod sdk;
pub mod state;

// Re-export main types
pub use call::CallId;
pub use client::{ClientConfig, StatefulCallClient, StatefulCallClientBuilder};
pub use error::{CallSdkError, SdkResult};
pub use proxy::{
    CaptionsProxy, FeatureProxyContext, FeatureProxyFactory, FeatureProxyRegistry, StatefulCall,
    TransferProxy, DEFAULT_SPOKEN_LANGUAGE,
};
pub use sdk::{
    AcceptTransferFn, AcceptTransferOptions, CallOperations, CaptionsOperations, FeatureId,
    FeatureObject, StartCaptionsOptions, TransferAcceptedListener, TransferAcceptedPayload,
    TransferEventListener, TransferOperations, TransferRequestedListener,
    TransferRequestedPayload,
};
pub use state::{
    AcceptedTransfer, CallProjection, CallStateStore, EndedCall, ErrorRecord, StateEvent,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
