//! Route tree compilation.
//!
//! # Responsibilities
//! - Walk the route tree in pre-order, children in declaration order
//! - Accumulate the parent pattern prefix down the tree
//! - Attach the derived match expression to every rule template found
//!
//! # Design Decisions
//! - Single pass, no backtracking, no I/O
//! - Output order equals visitation order (first-match at the edge)
//! - Nodes without templates only propagate their prefix

use crate::policy::PolicyRule;
use crate::routing::matcher::{fix_regex, match_expression, BaseDomain};
use crate::routing::node::RouteView;

/// Ordered rule lists produced by one compilation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledRules {
    pub inbound: Vec<PolicyRule>,
    pub outbound: Vec<PolicyRule>,
}

impl CompiledRules {
    pub fn has_policies(&self) -> bool {
        !self.inbound.is_empty() || !self.outbound.is_empty()
    }

    /// Total number of rules in both directions.
    pub fn len(&self) -> usize {
        self.inbound.len() + self.outbound.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.has_policies()
    }

    pub fn add_inbound_rule(&mut self, rule: PolicyRule) {
        self.inbound.push(rule);
    }

    pub fn add_outbound_rule(&mut self, rule: PolicyRule) {
        self.outbound.push(rule);
    }

    pub fn into_parts(self) -> (Vec<PolicyRule>, Vec<PolicyRule>) {
        (self.inbound, self.outbound)
    }
}

/// Compiles route trees into ordered policy rules.
#[derive(Debug, Clone, Default)]
pub struct RouteTreeCompiler {
    base_domain: BaseDomain,
}

impl RouteTreeCompiler {
    pub fn new(base_domain: impl Into<BaseDomain>) -> Self {
        Self {
            base_domain: base_domain.into(),
        }
    }

    pub fn base_domain(&self) -> &BaseDomain {
        &self.base_domain
    }

    /// Rewrite a pattern source against this compiler's base domain.
    pub fn fix_regex(&self, pattern: &str, parent: Option<&str>) -> String {
        fix_regex(pattern, parent, &self.base_domain)
    }

    /// Compile every root in order.
    pub fn compile<N: RouteView>(&self, roots: &[N]) -> CompiledRules {
        let mut rules = CompiledRules::default();
        for root in roots {
            self.visit(root, None, &mut rules);
        }
        tracing::debug!(
            base_domain = %self.base_domain,
            roots = roots.len(),
            inbound = rules.inbound.len(),
            outbound = rules.outbound.len(),
            "Route tree compiled"
        );
        rules
    }

    fn visit<N: RouteView>(&self, node: &N, parent: Option<&str>, rules: &mut CompiledRules) {
        let pattern = self.fix_regex(node.pattern_source(), parent);
        let expression = match_expression(&pattern);
        let route = node.name().unwrap_or("-");
        tracing::trace!(route, source = node.pattern_source(), pattern = %pattern, "Visiting route");

        if let Some(template) = node.inbound_rule_template() {
            tracing::debug!(route, direction = "inbound", expression = %expression, "Attaching rule");
            rules.add_inbound_rule(template.with_expression(expression.as_str()));
        }
        if let Some(template) = node.outbound_rule_template() {
            tracing::debug!(route, direction = "outbound", expression = %expression, "Attaching rule");
            rules.add_outbound_rule(template.with_expression(expression.as_str()));
        }

        for child in node.children() {
            self.visit(child, Some(&pattern), rules);
        }
    }
}

/// Compile `roots` against `base_domain` in one call.
pub fn compile<N: RouteView>(roots: &[N], base_domain: impl Into<BaseDomain>) -> CompiledRules {
    RouteTreeCompiler::new(base_domain).compile(roots)
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::policy::{AddHeadersConfig, DenyConfig};
    use crate::routing::node::RouteNode;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    fn header_rule(value: &str) -> PolicyRule {
        PolicyRule::new().with_add_headers(AddHeadersConfig::new().with_header("x-route", value))
    }

    #[test]
    fn test_root_expression() {
        let roots = [RouteNode::new("^admin/$")
            .with_inbound_rule(PolicyRule::new().with_deny(DenyConfig::new(403)))];
        let rules = compile(&roots, "");

        assert_eq!(rules.inbound.len(), 1);
        assert!(rules.outbound.is_empty());
        assert_eq!(rules.inbound[0].expressions(), ["req.URL.matches('admin/$')"]);
    }

    #[test]
    fn test_nested_expression() {
        let roots = [RouteNode::include(
            "^blog/",
            [RouteNode::new("^post/(?P<id>[0-9]+)/\\Z").with_outbound_rule(header_rule("post"))],
        )];
        let rules = compile(&roots, "");

        assert_eq!(
            rules.outbound[0].expressions(),
            ["req.URL.matches('blog/post/(?P<id>[0-9]+)/$')"]
        );
    }

    #[test]
    fn test_group_without_template_emits_nothing() {
        let roots = [RouteNode::include("^api/", [RouteNode::new("^v1/")])];
        let rules = compile(&roots, "example.com");
        assert!(!rules.has_policies());
        assert_eq!(rules.len(), 0);
    }

    #[test]
    fn test_preorder_visitation() {
        let roots = [
            RouteNode::new("^a/").with_outbound_rule(header_rule("a")),
            RouteNode::include(
                "^b/",
                [
                    RouteNode::new("^d/").with_outbound_rule(header_rule("d")),
                    RouteNode::new("^c/").with_outbound_rule(header_rule("c")),
                ],
            )
            .with_outbound_rule(header_rule("b")),
            RouteNode::new("^e/").with_outbound_rule(header_rule("e")),
        ];
        let rules = compile(&roots, "");

        let expressions: Vec<_> = rules
            .outbound
            .iter()
            .map(|r| r.expressions()[0].as_str())
            .collect();
        assert_eq!(
            expressions,
            [
                "req.URL.matches('a/')",
                "req.URL.matches('b/')",
                "req.URL.matches('b/d/')",
                "req.URL.matches('b/c/')",
                "req.URL.matches('e/')",
            ]
        );
    }

    #[test]
    fn test_templates_are_not_modified() {
        let template = PolicyRule::new().with_expression("req.Method == 'POST'");
        let roots = [RouteNode::new("^x/").with_inbound_rule(template.clone())];
        let rules = compile(&roots, "");

        assert_eq!(template.expressions().len(), 1);
        assert_eq!(
            rules.inbound[0].expressions(),
            ["req.Method == 'POST'", "req.URL.matches('x/')"]
        );
    }

    #[test]
    fn test_route_name_is_logged() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let roots = [RouteNode::new("^admin/")
            .with_name("admin-site")
            .with_inbound_rule(PolicyRule::new().with_deny(DenyConfig::new(403)))];
        tracing::subscriber::with_default(subscriber, || compile(&roots, ""));

        let logs = logs.contents();
        assert!(logs.contains("Attaching rule"), "logs were: {}", logs);
        assert!(logs.contains("route=") && logs.contains("admin-site"), "logs were: {}", logs);
    }

    #[test]
    fn test_same_node_both_directions() {
        let roots = [RouteNode::new("^both/")
            .with_inbound_rule(PolicyRule::new().with_deny(DenyConfig::new(401)))
            .with_outbound_rule(header_rule("both"))];
        let (inbound, outbound) = compile(&roots, "").into_parts();

        assert_eq!(inbound.len(), 1);
        assert_eq!(outbound.len(), 1);
        assert_eq!(inbound[0].expressions(), outbound[0].expressions());
    }
}
