//! Call identity types shared across the crate
//!
//! A call id is whatever opaque string the underlying calling SDK assigns to
//! a call. This layer never mints call ids of its own; it only keys projected
//! state by them, so the type is a thin newtype over the SDK's string form.
//!
//! # Examples
//!
//! ```rust
//! use callstate_core::CallId;
//!
//! let id = CallId::from("call-42");
//! assert_eq!(id.as_str(), "call-42");
//! assert_eq!(id.to_string(), "call-42");
//! ```

use serde::{Deserialize, Serialize};

/// Opaque, stable identifier for one in-progress call
///
/// Created when a call object first becomes visible to this layer and used to
/// index all per-call projected state. Cheap to clone, hashable, and ordered
/// so it can key the shared state maps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallId(String);

impl CallId {
    /// Wrap an SDK-assigned call identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as the SDK's original string form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CallId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CallId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
