//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route tree (from the web-routing layer)
//!     → node.rs (RouteView: pattern, children, rule templates)
//!     → compiler.rs (pre-order walk, prefix accumulation)
//!     → matcher.rs (anchor rewrite → req.URL.matches('<pattern>'))
//!     → CompiledRules (inbound[], outbound[])
//! ```
//!
//! # Design Decisions
//! - Route trees are only read, never mutated
//! - Deterministic: same tree always yields the same rules in the same order
//! - First match wins at the edge, so declaration order is load-bearing

pub mod compiler;
pub mod matcher;
pub mod node;

pub use compiler::{compile, CompiledRules, RouteTreeCompiler};
pub use matcher::{fix_regex, match_expression, BaseDomain};
pub use node::{RouteNode, RouteView};
