//! Interception proxy for the live-captions feature
//!
//! Wraps every captions operation in an async tee under `"Call.feature"` and
//! performs the success-path projection: language selections, the
//! start-in-progress flag, and clearing both caption flags on stop.

use std::sync::Arc;

use async_trait::async_trait;

use crate::call::CallId;
use crate::error::SdkResult;
use crate::sdk::{CaptionsOperations, FeatureId, FeatureObject, StartCaptionsOptions};
use crate::state::CallStateStore;

/// Spoken language assumed when a start supplies none
pub const DEFAULT_SPOKEN_LANGUAGE: &str = "en-us";

/// Captions feature wrapper that projects operation outcomes into the store
pub struct CaptionsProxy {
    store: Arc<CallStateStore>,
    call_id: CallId,
    inner: Arc<dyn CaptionsOperations>,
}

impl CaptionsProxy {
    /// Wrap a captions feature belonging to `call_id`
    pub fn new(
        store: Arc<CallStateStore>,
        call_id: CallId,
        inner: Arc<dyn CaptionsOperations>,
    ) -> Self {
        Self {
            store,
            call_id,
            inner,
        }
    }
}

#[async_trait]
impl CaptionsOperations for CaptionsProxy {
    /// Start the caption pipeline, projecting configuration progress
    ///
    /// The in-progress flag goes up before the underlying start is invoked
    /// and stays up after it resolves; only a subsequent stop clears it. The
    /// flag models "is the caption pipeline being (re)configured", so a
    /// successful start alone does not end configuration.
    async fn start_captions(&self, options: Option<StartCaptionsOptions>) -> SdkResult<()> {
        self.store
            .with_async_error_teed_to_state("Call.feature", async {
                self.store
                    .set_start_captions_in_progress(&self.call_id, true);
                let language = options
                    .as_ref()
                    .and_then(|opts| opts.spoken_language.clone())
                    .unwrap_or_else(|| DEFAULT_SPOKEN_LANGUAGE.to_string());
                self.inner.start_captions(options).await?;
                self.store
                    .set_selected_spoken_language(&self.call_id, language);
                Ok(())
            })
            .await
    }

    /// Stop the caption pipeline, clearing both caption flags on success
    async fn stop_captions(&self) -> SdkResult<()> {
        self.store
            .with_async_error_teed_to_state("Call.feature", async {
                self.inner.stop_captions().await?;
                self.store.set_captions_active(&self.call_id, false);
                self.store
                    .set_start_captions_in_progress(&self.call_id, false);
                Ok(())
            })
            .await
    }

    /// Change the spoken language, projecting the selection on success
    async fn set_spoken_language(&self, language: &str) -> SdkResult<()> {
        self.store
            .with_async_error_teed_to_state("Call.feature", async {
                self.inner.set_spoken_language(language).await?;
                self.store
                    .set_selected_spoken_language(&self.call_id, language);
                Ok(())
            })
            .await
    }

    /// Change the caption language, projecting the selection on success
    async fn set_caption_language(&self, language: &str) -> SdkResult<()> {
        self.store
            .with_async_error_teed_to_state("Call.feature", async {
                self.inner.set_caption_language(language).await?;
                self.store
                    .set_selected_caption_language(&self.call_id, language);
                Ok(())
            })
            .await
    }
}

impl FeatureObject for CaptionsProxy {
    fn feature_id(&self) -> FeatureId {
        FeatureId::captions()
    }

    fn as_captions(self: Arc<Self>) -> Option<Arc<dyn CaptionsOperations>> {
        Some(self)
    }
}
