//! Traffic policy data model.
//!
//! # Data Flow
//! ```text
//! ActionConfig (typed payload)
//!     → PolicyAction (kind + config)
//!     → PolicyRule (expressions + actions)
//!     → PolicyDocument (inbound[] + outbound[] + enabled)
//!     → encode() → EncodedDocument
//!     → build() → JSON string for the listener
//! ```
//!
//! # Design Decisions
//! - All values are immutable; `with_*` returns a new value
//! - Each config variant owns its wire encoding (url-rewrite emits `from`/`to`)
//! - Rule and action order is preserved end to end (edge is first-match)
//! - No validation of action semantics; the edge owns that vocabulary

pub mod action;
pub mod configs;
pub mod document;
pub mod error;
pub mod rule;
pub mod wire;

pub use action::{ActionConfig, ActionKind, PolicyAction, UnknownActionKind};
pub use configs::*;
pub use document::PolicyDocument;
pub use error::{PolicyError, PolicyResult};
pub use rule::PolicyRule;
pub use wire::{EncodedAction, EncodedDocument, EncodedRule};
