//! Configuration schema definitions.
//!
//! This module defines the route file format. All types derive Serde traits
//! for deserialization from TOML.

use serde::Deserialize;

use crate::policy::{ActionConfig, PolicyAction, PolicyRule};
use crate::routing::RouteNode;

/// Root of a route file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Domain substituted for the start anchor of root patterns.
    pub base_domain: String,

    /// Whether the edge should enforce the document.
    pub enabled: bool,

    /// Listener settings.
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route tree, roots in declaration order.
    pub routes: Vec<RouteConfig>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            base_domain: String::new(),
            enabled: true,
            listener: ListenerConfig::default(),
            observability: ObservabilityConfig::default(),
            routes: Vec::new(),
        }
    }
}

impl PolicyConfig {
    /// Convert the configured routes into route nodes.
    pub fn route_nodes(&self) -> Vec<RouteNode> {
        self.routes.iter().map(RouteNode::from).collect()
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Upper bound on establishing a listener, in seconds.
    pub establish_timeout_secs: u64,

    /// Local address traffic is forwarded to.
    pub forwards_to: Option<String>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            establish_timeout_secs: 30,
            forwards_to: None,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// A route and its optional rule templates.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteConfig {
    /// Pattern in the routing dialect (`^` and `\Z` anchors).
    pub pattern: String,

    /// Route identifier for logging.
    #[serde(default)]
    pub name: Option<String>,

    /// Rule template applied to requests.
    #[serde(default)]
    pub inbound: Option<RuleConfig>,

    /// Rule template applied to responses.
    #[serde(default)]
    pub outbound: Option<RuleConfig>,

    /// Nested routes, prefixed by this route's pattern.
    #[serde(default)]
    pub children: Vec<RouteConfig>,
}

/// A rule template.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub name: Option<String>,

    /// Extra expressions ANDed with the route's match expression.
    #[serde(default)]
    pub expressions: Vec<String>,

    /// Actions as `{ type = "...", config = { ... } }` tables.
    #[serde(default)]
    pub actions: Vec<ActionConfig>,
}

impl From<&RuleConfig> for PolicyRule {
    fn from(config: &RuleConfig) -> Self {
        let mut rule = PolicyRule::new();
        if let Some(name) = &config.name {
            rule = rule.with_name(name.as_str());
        }
        for expression in &config.expressions {
            rule = rule.with_expression(expression.as_str());
        }
        for action in &config.actions {
            let action = PolicyAction::from(action.clone());
            rule = rule.with_action(action.kind, action.config);
        }
        rule
    }
}

impl From<&RouteConfig> for RouteNode {
    fn from(config: &RouteConfig) -> Self {
        let mut node = RouteNode::new(config.pattern.as_str());
        if let Some(name) = &config.name {
            node = node.with_name(name.as_str());
        }
        if let Some(inbound) = &config.inbound {
            node = node.with_inbound_rule(PolicyRule::from(inbound));
        }
        if let Some(outbound) = &config.outbound {
            node = node.with_outbound_rule(PolicyRule::from(outbound));
        }
        node.with_children(config.children.iter().map(RouteNode::from))
    }
}
