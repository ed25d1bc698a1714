//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! routing, policy, listener
//!     → tracing events (structured fields)
//!     → logging.rs (EnvFilter + fmt layer)
//!     → stderr
//! ```

pub mod logging;

pub use logging::init_logging;
