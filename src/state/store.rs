//! Centrally owned store of projected call state
//!
//! The store is the only shared mutable resource in the crate. It is created
//! once per client session, handed by reference to every component that needs
//! to mutate or read it, and torn down with the session; it is never a hidden
//! process-wide singleton.
//!
//! Every mutation entry point is synchronous and safe to call concurrently:
//! each field update is a single atomic entry replace in a [`DashMap`], so a
//! reader sees either the whole update or none of it. Mutations triggered by
//! two concurrent operations on the same field land in completion order,
//! which is the intended last-writer-wins semantics for fields that model
//! "current status".
//!
//! # Examples
//!
//! ```rust
//! use callstate_core::{CallId, CallStateStore};
//!
//! let store = CallStateStore::new();
//! let call_id = CallId::from("call-1");
//!
//! store.track_call(&call_id);
//! store.set_selected_spoken_language(&call_id, "fr-fr");
//!
//! let projection = store.call(&call_id).expect("tracked");
//! assert_eq!(projection.selected_spoken_language.as_deref(), Some("fr-fr"));
//! assert!(!projection.captions_active);
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use chrono::Utc;
use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::call::CallId;

use super::types::{AcceptedTransfer, CallProjection, EndedCall, ErrorRecord, StateEvent};

/// Default capacity of the state-event broadcast channel
pub const DEFAULT_EVENT_CAPACITY: usize = 256;

/// Default number of retired calls kept for terminal views
pub const DEFAULT_MAX_ENDED_CALLS: usize = 10;

/// Addressable, centrally owned tree of projected call state
///
/// Writers are the interception proxies; readers are UI/application layers,
/// either by snapshot ([`CallStateStore::call`], [`CallStateStore::errors`])
/// or by subscription ([`CallStateStore::subscribe`]).
#[derive(Debug)]
pub struct CallStateStore {
    /// Live per-call projections, keyed by SDK call id
    calls: DashMap<CallId, CallProjection>,
    /// Final projections of retired calls, oldest first, bounded
    ended_calls: Mutex<VecDeque<EndedCall>>,
    /// Most recent failure per operation name
    errors: DashMap<String, ErrorRecord>,
    /// Bound on `ended_calls`
    max_ended_calls: usize,
    /// Broadcast side of the subscription channel
    event_tx: broadcast::Sender<StateEvent>,
}

impl CallStateStore {
    /// Create a store with default limits
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_EVENT_CAPACITY, DEFAULT_MAX_ENDED_CALLS)
    }

    /// Create a store with an explicit event-channel capacity and ended-call bound
    pub fn with_limits(event_capacity: usize, max_ended_calls: usize) -> Self {
        let (event_tx, _) = broadcast::channel(event_capacity.max(1));
        Self {
            calls: DashMap::new(),
            ended_calls: Mutex::new(VecDeque::new()),
            errors: DashMap::new(),
            max_ended_calls,
            event_tx,
        }
    }

    // ===== LIFECYCLE =====

    /// Begin tracking a call, creating its empty projection
    ///
    /// Idempotent: tracking an already-tracked call leaves its projection
    /// untouched.
    pub fn track_call(&self, call_id: &CallId) {
        let snapshot = self
            .calls
            .entry(call_id.clone())
            .or_default()
            .value()
            .clone();
        tracing::debug!(call_id = %call_id, "tracking call");
        self.emit(StateEvent::CallUpdated {
            call_id: call_id.clone(),
            projection: snapshot,
        });
    }

    /// Retire an ended call, moving its projection into the ended history
    ///
    /// Retiring an untracked call is a no-op. The ended history is bounded by
    /// the store's `max_ended_calls`, oldest entry evicted first.
    pub fn retire_call(&self, call_id: &CallId) {
        let Some((_, projection)) = self.calls.remove(call_id) else {
            return;
        };
        let mut ended = self
            .ended_calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        ended.push_back(EndedCall {
            call_id: call_id.clone(),
            projection,
            ended_at: Utc::now(),
        });
        while ended.len() > self.max_ended_calls {
            ended.pop_front();
        }
        drop(ended);
        tracing::debug!(call_id = %call_id, "retired call");
        self.emit(StateEvent::CallRetired {
            call_id: call_id.clone(),
        });
    }

    // ===== MUTATIONS =====
    //
    // All per-call mutators create the call's slot lazily when handed an
    // unknown id. Mutating state for a call that has since been retired
    // therefore re-creates a slot rather than failing; stale writers are
    // tolerated, not fatal.

    /// Record the most recent failure of `operation`, overwriting any prior one
    pub fn record_error(&self, operation: &str, error: &dyn std::fmt::Display) {
        let record = ErrorRecord {
            operation: operation.to_string(),
            message: error.to_string(),
            timestamp: Utc::now(),
        };
        tracing::warn!(operation, message = %record.message, "operation failure recorded");
        self.errors.insert(operation.to_string(), record.clone());
        self.emit(StateEvent::ErrorRecorded {
            operation: operation.to_string(),
            record,
        });
    }

    /// Set whether captions are actively being delivered
    ///
    /// This is the mutation point for the external caption-pipeline signal;
    /// the captions proxy itself only ever drives the flag to `false`.
    pub fn set_captions_active(&self, call_id: &CallId, active: bool) {
        self.update_call(call_id, |projection| projection.captions_active = active);
    }

    /// Set whether a caption start is being (re)configured
    pub fn set_start_captions_in_progress(&self, call_id: &CallId, in_progress: bool) {
        self.update_call(call_id, |projection| {
            projection.start_captions_in_progress = in_progress
        });
    }

    /// Set the selected spoken language
    pub fn set_selected_spoken_language(&self, call_id: &CallId, language: impl Into<String>) {
        let language = language.into();
        self.update_call(call_id, |projection| {
            projection.selected_spoken_language = Some(language)
        });
    }

    /// Set the selected caption language
    pub fn set_selected_caption_language(&self, call_id: &CallId, language: impl Into<String>) {
        let language = language.into();
        self.update_call(call_id, |projection| {
            projection.selected_caption_language = Some(language)
        });
    }

    /// Record the most recent accepted transfer for a call
    pub fn set_accepted_transfer(&self, call_id: &CallId, transfer: AcceptedTransfer) {
        self.update_call(call_id, |projection| {
            projection.accepted_transfer = Some(transfer)
        });
    }

    // ===== SNAPSHOT READS =====

    /// Snapshot of one call's projection
    pub fn call(&self, call_id: &CallId) -> Option<CallProjection> {
        self.calls.get(call_id).map(|entry| entry.value().clone())
    }

    /// Snapshot of every live call's projection
    pub fn calls(&self) -> Vec<(CallId, CallProjection)> {
        self.calls
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Snapshot of the ended-call history, oldest first
    pub fn ended_calls(&self) -> Vec<EndedCall> {
        self.ended_calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .cloned()
            .collect()
    }

    /// Most recent recorded failure of `operation`, if any
    pub fn error(&self, operation: &str) -> Option<ErrorRecord> {
        self.errors.get(operation).map(|entry| entry.value().clone())
    }

    /// Snapshot of every operation's most recent failure
    pub fn errors(&self) -> HashMap<String, ErrorRecord> {
        self.errors
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Subscribe to state mutations
    ///
    /// Receivers that fall behind the channel capacity observe a lag error
    /// and can re-snapshot through the read methods.
    pub fn subscribe(&self) -> broadcast::Receiver<StateEvent> {
        self.event_tx.subscribe()
    }

    // ===== INTERNAL =====

    /// Apply one field update atomically and broadcast the new snapshot
    fn update_call<F>(&self, call_id: &CallId, apply: F)
    where
        F: FnOnce(&mut CallProjection),
    {
        let snapshot = {
            let mut entry = self.calls.entry(call_id.clone()).or_default();
            apply(entry.value_mut());
            entry.value().clone()
        };
        self.emit(StateEvent::CallUpdated {
            call_id: call_id.clone(),
            projection: snapshot,
        });
    }

    /// Broadcast an event, ignoring the no-subscriber case
    fn emit(&self, event: StateEvent) {
        let _ = self.event_tx.send(event);
    }
}

impl Default for CallStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CallSdkError;

    fn store() -> CallStateStore {
        CallStateStore::with_limits(16, 2)
    }

    #[test]
    fn mutating_unknown_call_creates_slot_lazily() {
        let store = store();
        let call_id = CallId::from("call-lazy");

        store.set_selected_caption_language(&call_id, "de-de");

        let projection = store.call(&call_id).expect("slot created lazily");
        assert_eq!(projection.selected_caption_language.as_deref(), Some("de-de"));
        assert!(!projection.captions_active);
    }

    #[test]
    fn record_error_overwrites_prior_record() {
        let store = store();
        store.record_error("Call.mute", &CallSdkError::rejected("first"));
        store.record_error("Call.mute", &CallSdkError::rejected("second"));

        let record = store.error("Call.mute").expect("recorded");
        assert_eq!(record.message, "operation rejected: second");
        assert_eq!(store.errors().len(), 1);
    }

    #[test]
    fn retire_moves_projection_into_bounded_history() {
        let store = store();
        for n in 0..3 {
            let call_id = CallId::from(format!("call-{n}"));
            store.track_call(&call_id);
            store.set_captions_active(&call_id, true);
            store.retire_call(&call_id);
        }

        let ended = store.ended_calls();
        assert_eq!(ended.len(), 2, "history capped at max_ended_calls");
        assert_eq!(ended[0].call_id, CallId::from("call-1"));
        assert_eq!(ended[1].call_id, CallId::from("call-2"));
        assert!(ended[1].projection.captions_active);
        assert!(store.call(&CallId::from("call-2")).is_none());
    }

    #[test]
    fn retiring_untracked_call_is_a_noop() {
        let store = store();
        store.retire_call(&CallId::from("never-seen"));
        assert!(store.ended_calls().is_empty());
    }

    #[tokio::test]
    async fn subscribers_observe_full_snapshots() {
        let store = store();
        let mut events = store.subscribe();
        let call_id = CallId::from("call-sub");

        store.set_selected_spoken_language(&call_id, "en-gb");

        match events.recv().await.expect("event delivered") {
            StateEvent::CallUpdated {
                call_id: id,
                projection,
            } => {
                assert_eq!(id, call_id);
                assert_eq!(projection.selected_spoken_language.as_deref(), Some("en-gb"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
