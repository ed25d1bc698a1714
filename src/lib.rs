//! Traffic policy compiler library.
//!
//! Compiles a route tree with per-route rule templates into a single policy
//! document for an edge listener.

pub mod config;
pub mod context;
pub mod listener;
pub mod observability;
pub mod policy;
pub mod routing;

pub use config::schema::PolicyConfig;
pub use context::PolicyContext;
pub use policy::{PolicyDocument, PolicyRule};
pub use routing::{RouteNode, RouteTreeCompiler};
