//! Listener seam.
//!
//! # Data Flow
//! ```text
//! PolicyDocument
//!     → build() → JSON string
//!     → options.rs (ListenerOptions::traffic_policy)
//!     → endpoint.rs (PolicyEndpoint::establish, bounded by timeout)
//!     → listener, or PolicyRejected { remote message }
//! ```

pub mod endpoint;
pub mod options;

pub use endpoint::{establish, ListenerError, PolicyEndpoint};
pub use options::ListenerOptions;
