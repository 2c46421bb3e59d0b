//! End-to-end projection tests over the public API
//!
//! Drives a mocked SDK call through a `StatefulCallClient` session exactly
//! the way an application would, and asserts what a UI subscriber observes.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use callstate_core::{
    CallId, CallOperations, CallSdkError, CaptionsOperations, FeatureId, FeatureObject,
    SdkResult, StartCaptionsOptions, StateEvent, StatefulCallClient,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Minimal SDK call double: `mute` can be made to fail, captions always work
struct MiniCall {
    id: CallId,
    mute_fails: AtomicBool,
    captions: Arc<MiniCaptions>,
}

impl MiniCall {
    fn new(id: &str) -> Self {
        Self {
            id: CallId::from(id),
            mute_fails: AtomicBool::new(false),
            captions: Arc::new(MiniCaptions),
        }
    }
}

#[async_trait]
impl CallOperations for MiniCall {
    fn id(&self) -> CallId {
        self.id.clone()
    }

    async fn mute(&self) -> SdkResult<()> {
        if self.mute_fails.load(Ordering::SeqCst) {
            return Err(CallSdkError::rejected("microphone busy"));
        }
        Ok(())
    }

    async fn unmute(&self) -> SdkResult<()> {
        Ok(())
    }

    async fn start_video(&self) -> SdkResult<()> {
        Ok(())
    }

    async fn stop_video(&self) -> SdkResult<()> {
        Ok(())
    }

    async fn start_screen_sharing(&self) -> SdkResult<()> {
        Ok(())
    }

    async fn stop_screen_sharing(&self) -> SdkResult<()> {
        Ok(())
    }

    async fn hold(&self) -> SdkResult<()> {
        Ok(())
    }

    async fn resume(&self) -> SdkResult<()> {
        Ok(())
    }

    fn feature(&self, feature: &FeatureId) -> SdkResult<Arc<dyn FeatureObject>> {
        if *feature == FeatureId::captions() {
            Ok(self.captions.clone())
        } else {
            Err(CallSdkError::feature_unavailable(feature.as_str()))
        }
    }
}

struct MiniCaptions;

#[async_trait]
impl CaptionsOperations for MiniCaptions {
    async fn start_captions(&self, _options: Option<StartCaptionsOptions>) -> SdkResult<()> {
        Ok(())
    }

    async fn stop_captions(&self) -> SdkResult<()> {
        Ok(())
    }

    async fn set_spoken_language(&self, _language: &str) -> SdkResult<()> {
        Ok(())
    }

    async fn set_caption_language(&self, _language: &str) -> SdkResult<()> {
        Ok(())
    }
}

impl FeatureObject for MiniCaptions {
    fn feature_id(&self) -> FeatureId {
        FeatureId::captions()
    }

    fn as_captions(self: Arc<Self>) -> Option<Arc<dyn CaptionsOperations>> {
        Some(self)
    }
}

#[tokio::test]
async fn wrapping_a_call_makes_it_visible_before_first_operation() {
    init_tracing();
    let client = StatefulCallClient::builder().build();
    let store = client.store();
    let mut events = store.subscribe();

    let _wrapped = client.wrap_call(Arc::new(MiniCall::new("call-1")));

    assert!(store.call(&CallId::from("call-1")).is_some());
    match events.recv().await.unwrap() {
        StateEvent::CallUpdated { call_id, .. } => assert_eq!(call_id, CallId::from("call-1")),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn failed_mute_reaches_caller_and_subscriber() {
    let call = Arc::new(MiniCall::new("call-1"));
    call.mute_fails.store(true, Ordering::SeqCst);

    let client = StatefulCallClient::builder().build();
    let store = client.store();
    let wrapped = client.wrap_call(call);
    let mut events = store.subscribe();

    let error = wrapped.mute().await.unwrap_err();
    assert_eq!(error, CallSdkError::rejected("microphone busy"));

    match events.recv().await.unwrap() {
        StateEvent::ErrorRecorded { operation, record } => {
            assert_eq!(operation, "Call.mute");
            assert_eq!(record.message, error.to_string());
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[tokio::test]
async fn later_success_does_not_clear_a_prior_error_record() {
    let call = Arc::new(MiniCall::new("call-1"));
    call.mute_fails.store(true, Ordering::SeqCst);

    let client = StatefulCallClient::builder().build();
    let wrapped = client.wrap_call(call.clone());

    assert!(wrapped.mute().await.is_err());
    call.mute_fails.store(false, Ordering::SeqCst);
    assert!(wrapped.mute().await.is_ok());

    let record = client.store().error("Call.mute").expect("record survives success");
    assert_eq!(record.message, "operation rejected: microphone busy");
}

#[tokio::test]
async fn captions_flow_projects_through_the_session_store() {
    let client = StatefulCallClient::builder().build();
    let store = client.store();
    let wrapped = client.wrap_call(Arc::new(MiniCall::new("call-1")));
    let call_id = CallId::from("call-1");

    let captions = wrapped
        .feature(&FeatureId::captions())
        .unwrap()
        .as_captions()
        .unwrap();
    captions.start_captions(None).await.unwrap();

    let projection = store.call(&call_id).unwrap();
    assert_eq!(projection.selected_spoken_language.as_deref(), Some("en-us"));
    assert!(projection.start_captions_in_progress);

    // The caption pipeline going live is an external signal.
    store.set_captions_active(&call_id, true);

    captions.stop_captions().await.unwrap();
    let projection = store.call(&call_id).unwrap();
    assert!(!projection.captions_active);
    assert!(!projection.start_captions_in_progress);
}

#[tokio::test]
async fn retired_calls_land_in_bounded_history() {
    let client = StatefulCallClient::builder().max_ended_calls(1).build();
    let store = client.store();

    for id in ["call-1", "call-2"] {
        let wrapped = client.wrap_call(Arc::new(MiniCall::new(id)));
        wrapped.mute().await.unwrap();
        client.retire_call(&CallId::from(id));
    }

    assert!(store.calls().is_empty());
    let ended = store.ended_calls();
    assert_eq!(ended.len(), 1, "history bounded by max_ended_calls");
    assert_eq!(ended[0].call_id, CallId::from("call-2"));
}

#[tokio::test]
async fn sessions_never_share_projected_state() {
    let first = StatefulCallClient::builder().build();
    let second = StatefulCallClient::builder().build();

    let _wrapped = first.wrap_call(Arc::new(MiniCall::new("call-1")));

    assert!(first.store().call(&CallId::from("call-1")).is_some());
    assert!(second.store().call(&CallId::from("call-1")).is_none());
    assert_ne!(first.session_id(), second.session_id());
}
