//! Projected state records held by the store
//!
//! These are the value types the rest of the crate writes into
//! [`crate::state::CallStateStore`] and UI layers read back out. All of them
//! are plain data: cloneable, serializable snapshots with no handle back to
//! the SDK objects they describe.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::call::CallId;

/// Per-call projected state
///
/// Mutated exclusively by the interception proxies in reaction to operation
/// outcomes or forwarded events; UI code only ever reads it. A fresh
/// projection has every flag off and every selection unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallProjection {
    /// Whether the caption pipeline is currently delivering captions
    ///
    /// Driven to `true` only by an external signal through
    /// [`crate::state::CallStateStore::set_captions_active`]; the captions
    /// proxy itself only ever drives it back to `false` on a successful stop.
    pub captions_active: bool,
    /// Whether a caption start is being (re)configured
    ///
    /// Set before a start operation is invoked and cleared only by a
    /// successful stop, never by the start resolving.
    pub start_captions_in_progress: bool,
    /// Spoken language selected by the last successful start or set operation
    pub selected_spoken_language: Option<String>,
    /// Caption language selected by the last successful set operation
    pub selected_caption_language: Option<String>,
    /// Most recent transfer accepted from this call
    pub accepted_transfer: Option<AcceptedTransfer>,
}

/// Record of a transfer accepted through a rewritten event listener
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedTransfer {
    /// Identifier of the newly created transfer-target call
    pub call_id: CallId,
    /// When the accept action was invoked
    pub timestamp: DateTime<Utc>,
}

/// Most recent failure of one named operation
///
/// Keyed in the store by `operation` (`"Call.mute"`, `"Call.feature"`, ...).
/// A later success of the same operation does not clear the record; clearing
/// is an explicit concern of error-surfacing UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// Operation that raised the failure
    pub operation: String,
    /// Rendered message of the failure, as the SDK reported it
    pub message: String,
    /// When the failure was recorded
    pub timestamp: DateTime<Utc>,
}

/// A retired call's final projection, kept for terminal "call ended" views
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndedCall {
    /// Identifier the call was tracked under
    pub call_id: CallId,
    /// Projection at the moment the call was retired
    pub projection: CallProjection,
    /// When the call was retired from the live map
    pub ended_at: DateTime<Utc>,
}

/// Event broadcast to store subscribers after every mutation
///
/// Each variant carries a full post-mutation snapshot, so a subscriber never
/// has to re-derive state from a delta and never observes a partial update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateEvent {
    /// A call's projection changed (or the call was first tracked)
    CallUpdated {
        /// Call whose projection changed
        call_id: CallId,
        /// Projection after the mutation
        projection: CallProjection,
    },
    /// A call was retired from the live map
    CallRetired {
        /// Call that ended
        call_id: CallId,
    },
    /// An operation failure was recorded
    ErrorRecorded {
        /// Operation that failed
        operation: String,
        /// The stored record
        record: ErrorRecord,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_snapshots_round_trip_through_json() {
        let projection = CallProjection {
            captions_active: true,
            start_captions_in_progress: false,
            selected_spoken_language: Some("fr-fr".to_string()),
            selected_caption_language: None,
            accepted_transfer: Some(AcceptedTransfer {
                call_id: CallId::from("call-42"),
                timestamp: chrono::Utc::now(),
            }),
        };
        let event = StateEvent::CallUpdated {
            call_id: CallId::from("call-1"),
            projection: projection.clone(),
        };

        let json = serde_json::to_string(&event).expect("serializes");
        let decoded: StateEvent = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(decoded, event);
    }
}
