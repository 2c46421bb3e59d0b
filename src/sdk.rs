//! Capability traits for the wrapped calling SDK
//!
//! This module declares, as explicit traits, exactly the surface of the
//! externally owned call and feature objects that the projection layer
//! special-cases. The SDK owns the lifetime of every object behind these
//! traits; this crate only holds references for the lifetime of a wrapper.
//!
//! Anything a concrete SDK binding exposes beyond these traits is reachable
//! through the proxy's passthrough rule (see [`crate::proxy::StatefulCall`])
//! and is of no interest to state projection.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────┐
//! │   UI / application code  │
//! └────────────┬─────────────┘
//!              │ CallOperations (teed)
//! ┌────────────▼─────────────┐
//! │   StatefulCall proxy     │
//! └────────────┬─────────────┘
//!              │ CallOperations / CaptionsOperations / TransferOperations
//! ┌────────────▼─────────────┐
//! │   third-party call SDK   │ ◄── traits in this module
//! └──────────────────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::call::CallId;
use crate::error::SdkResult;

// ===== FEATURE IDENTITY =====

/// Identifier for an optional capability extension of a call
///
/// Feature ids are open-ended strings so that the interception registry can
/// be extended by registration rather than by editing a dispatch switch. The
/// two ids this crate ships proxies for have well-known constructors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FeatureId(String);

impl FeatureId {
    /// Identifier of the live-captions feature
    pub fn captions() -> Self {
        Self("captions".to_string())
    }

    /// Identifier of the call-transfer feature
    pub fn transfer() -> Self {
        Self("transfer".to_string())
    }

    /// Wrap an arbitrary feature identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier's string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// ===== CALL SURFACE =====

/// The call-level operation set this layer special-cases
///
/// Implemented by the SDK binding for its call handle, and implemented again
/// by [`crate::proxy::StatefulCall`] so that wrapped and raw calls are
/// interchangeable at call sites. Every deferred operation either resolves
/// to `Ok(())` or rejects with the SDK's error, which the proxy records and
/// re-surfaces unchanged.
#[async_trait]
pub trait CallOperations: Send + Sync {
    /// The SDK-assigned identifier of this call
    fn id(&self) -> CallId;

    /// Mute the local microphone
    async fn mute(&self) -> SdkResult<()>;

    /// Unmute the local microphone
    async fn unmute(&self) -> SdkResult<()>;

    /// Start sending local video
    async fn start_video(&self) -> SdkResult<()>;

    /// Stop sending local video
    async fn stop_video(&self) -> SdkResult<()>;

    /// Start sharing the local screen
    async fn start_screen_sharing(&self) -> SdkResult<()>;

    /// Stop sharing the local screen
    async fn stop_screen_sharing(&self) -> SdkResult<()>;

    /// Place the call on hold
    async fn hold(&self) -> SdkResult<()>;

    /// Resume a held call
    async fn resume(&self) -> SdkResult<()>;

    /// Obtain the feature object for `feature`, synchronously
    ///
    /// Feature objects are created and owned by the SDK; the same id returns
    /// the same underlying feature for the lifetime of the call.
    fn feature(&self, feature: &FeatureId) -> SdkResult<Arc<dyn FeatureObject>>;
}

// ===== FEATURE SURFACE =====

/// A feature object obtained from [`CallOperations::feature`]
///
/// The `as_*` methods are the enumerated capability views this layer knows
/// how to intercept. A feature that does not carry a given capability keeps
/// the default `None`, in which case the registry hands the raw object back
/// untouched.
pub trait FeatureObject: Send + Sync {
    /// The identifier this feature was obtained under
    fn feature_id(&self) -> FeatureId;

    /// View this feature as the captions capability set, if it carries one
    fn as_captions(self: Arc<Self>) -> Option<Arc<dyn CaptionsOperations>> {
        None
    }

    /// View this feature as the transfer capability set, if it carries one
    fn as_transfer(self: Arc<Self>) -> Option<Arc<dyn TransferOperations>> {
        None
    }
}

/// Options accepted by [`CaptionsOperations::start_captions`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartCaptionsOptions {
    /// Language the speaker will be speaking, e.g. `"fr-fr"`
    pub spoken_language: Option<String>,
}

impl StartCaptionsOptions {
    /// Options carrying a spoken language
    pub fn with_spoken_language(language: impl Into<String>) -> Self {
        Self {
            spoken_language: Some(language.into()),
        }
    }
}

/// Operation set of the live-captions feature
#[async_trait]
pub trait CaptionsOperations: Send + Sync {
    /// Start the caption pipeline
    async fn start_captions(&self, options: Option<StartCaptionsOptions>) -> SdkResult<()>;

    /// Stop the caption pipeline
    async fn stop_captions(&self) -> SdkResult<()>;

    /// Change the language being spoken on the call
    async fn set_spoken_language(&self, language: &str) -> SdkResult<()>;

    /// Change the language captions are rendered in
    async fn set_caption_language(&self, language: &str) -> SdkResult<()>;
}

// ===== TRANSFER SURFACE =====

/// Options accepted by [`TransferRequestedPayload::accept`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcceptTransferOptions {
    /// Join the transfer-target call with audio muted
    pub audio_muted: bool,
    /// Join the transfer-target call with video off
    pub video_off: bool,
}

/// The accept action carried by a transfer-requested payload
///
/// Invoking it accepts the transfer and synchronously hands back the newly
/// created transfer-target call object.
pub type AcceptTransferFn =
    Arc<dyn Fn(Option<AcceptTransferOptions>) -> Arc<dyn CallOperations> + Send + Sync>;

/// Payload delivered to a transfer-requested listener
///
/// Carries the transfer target's identity and the `accept` action. Payloads
/// are immutable once built; the transfer proxy rebuilds a fresh payload
/// around a decorated accept action rather than mutating a delivered one.
#[derive(Clone)]
pub struct TransferRequestedPayload {
    target_participant: String,
    accept: AcceptTransferFn,
}

impl TransferRequestedPayload {
    /// Build a payload around an accept action
    pub fn new(target_participant: impl Into<String>, accept: AcceptTransferFn) -> Self {
        Self {
            target_participant: target_participant.into(),
            accept,
        }
    }

    /// Who the call would be transferred to
    pub fn target_participant(&self) -> &str {
        &self.target_participant
    }

    /// Accept the transfer, receiving the transfer-target call object
    pub fn accept(&self, options: Option<AcceptTransferOptions>) -> Arc<dyn CallOperations> {
        (self.accept)(options)
    }

    /// The accept action itself, for decorating
    pub(crate) fn accept_fn(&self) -> AcceptTransferFn {
        self.accept.clone()
    }
}

impl std::fmt::Debug for TransferRequestedPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferRequestedPayload")
            .field("target_participant", &self.target_participant)
            .field("accept", &"<accept action>")
            .finish()
    }
}

/// Payload delivered once a transfer has been accepted end-to-end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferAcceptedPayload {
    /// Identifier of the transfer-target call
    pub target_call_id: CallId,
}

/// Listener for transfer-requested events
pub type TransferRequestedListener = Arc<dyn Fn(TransferRequestedPayload) + Send + Sync>;

/// Listener for transfer-accepted events
pub type TransferAcceptedListener = Arc<dyn Fn(TransferAcceptedPayload) + Send + Sync>;

/// An event subscription on the transfer feature
///
/// The event name and its listener travel together so each subscription stays
/// fully typed; the transfer proxy matches on the variant it rewrites and
/// forwards every other variant unmodified.
pub enum TransferEventListener {
    /// Subscribe to transfer-requested events
    TransferRequested(TransferRequestedListener),
    /// Subscribe to transfer-accepted events
    TransferAccepted(TransferAcceptedListener),
}

impl std::fmt::Debug for TransferEventListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransferRequested(_) => f.write_str("TransferEventListener::TransferRequested"),
            Self::TransferAccepted(_) => f.write_str("TransferEventListener::TransferAccepted"),
        }
    }
}

/// Operation set of the call-transfer feature
pub trait TransferOperations: Send + Sync {
    /// Register an event listener on the feature
    fn on(&self, listener: TransferEventListener);
}
