//! Route tree view consumed by the compiler.

use crate::policy::PolicyRule;

/// Minimal view of a routing layer's route node.
///
/// Any routing layer can implement this over its own node type; the compiler
/// only needs the pattern source, the ordered children and the optional rule
/// templates.
pub trait RouteView {
    /// Pattern in the routing dialect, e.g. `^post/(?P<id>[0-9]+)/\Z`.
    fn pattern_source(&self) -> &str;

    /// Children in declaration order.
    fn children(&self) -> &[Self]
    where
        Self: Sized;

    fn inbound_rule_template(&self) -> Option<&PolicyRule>;

    fn outbound_rule_template(&self) -> Option<&PolicyRule>;

    /// Route identifier, used only in logs.
    fn name(&self) -> Option<&str> {
        None
    }
}

/// A concrete route node.
///
/// Leaves map to views; nodes with children are include/namespace groups
/// whose pattern prefixes every descendant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteNode {
    pattern: String,
    name: Option<String>,
    children: Vec<RouteNode>,
    inbound: Option<PolicyRule>,
    outbound: Option<PolicyRule>,
}

impl RouteNode {
    /// A route matching a regex in the routing dialect.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            ..Self::default()
        }
    }

    /// A group route whose pattern prefixes all of `children`.
    pub fn include(pattern: impl Into<String>, children: impl IntoIterator<Item = RouteNode>) -> Self {
        Self::new(pattern).with_children(children)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_inbound_rule(mut self, rule: PolicyRule) -> Self {
        self.inbound = Some(rule);
        self
    }

    pub fn with_outbound_rule(mut self, rule: PolicyRule) -> Self {
        self.outbound = Some(rule);
        self
    }

    pub fn with_child(mut self, child: RouteNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = RouteNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RouteNode::node_count).sum::<usize>()
    }
}

impl RouteView for RouteNode {
    fn pattern_source(&self) -> &str {
        &self.pattern
    }

    fn children(&self) -> &[Self] {
        &self.children
    }

    fn inbound_rule_template(&self) -> Option<&PolicyRule> {
        self.inbound.as_ref()
    }

    fn outbound_rule_template(&self) -> Option<&PolicyRule> {
        self.outbound.as_ref()
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::DenyConfig;

    #[test]
    fn test_include_keeps_child_order() {
        let group = RouteNode::include(
            "^credit/",
            [RouteNode::new("^b/"), RouteNode::new("^a/"), RouteNode::new("^c/")],
        );
        let patterns: Vec<_> = group.children().iter().map(|c| c.pattern_source()).collect();
        assert_eq!(patterns, ["^b/", "^a/", "^c/"]);
        assert_eq!(group.node_count(), 4);
    }

    #[test]
    fn test_templates_are_optional() {
        let plain = RouteNode::new("^home/");
        assert!(plain.inbound_rule_template().is_none());
        assert!(plain.outbound_rule_template().is_none());

        let guarded = plain.with_inbound_rule(PolicyRule::new().with_deny(DenyConfig::new(403)));
        assert!(guarded.inbound_rule_template().is_some());
        assert!(guarded.outbound_rule_template().is_none());
    }

    #[test]
    fn test_name_is_optional() {
        assert_eq!(RouteNode::new("^home/").name(), None);
        assert_eq!(RouteNode::new("^home/").with_name("home").name(), Some("home"));
    }
}
