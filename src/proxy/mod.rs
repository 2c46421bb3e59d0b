//! Interception proxies over the wrapped SDK surface
//!
//! [`StatefulCall`] fronts the call object; the [`FeatureProxyRegistry`]
//! builds feature-specific wrappers ([`CaptionsProxy`], [`TransferProxy`]) on
//! demand. All of them write into the session's [`crate::state::CallStateStore`]
//! and none of them ever read projected state back.

mod call;
mod captions;
mod registry;
mod transfer;


pub use call::StatefulCall;
pub use captions::{CaptionsProxy, DEFAULT_SPOKEN_LANGUAGE};
pub use registry::{FeatureProxyContext, FeatureProxyFactory, FeatureProxyRegistry};
pub use transfer::TransferProxy;
