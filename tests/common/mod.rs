//! Shared fixtures for integration tests.

#![allow(dead_code)]

use traffic_policy::policy::{
    AddHeadersConfig, DenyConfig, PolicyRule, RateLimitConfig, UrlRewriteConfig,
};
use traffic_policy::routing::RouteNode;

/// Outbound rule adding `added-header-urls: <value>`.
pub fn header_rule(value: &str) -> PolicyRule {
    PolicyRule::new().with_add_headers(AddHeadersConfig::new().with_header("added-header-urls", value))
}

pub fn deny_rule(status_code: u16) -> PolicyRule {
    PolicyRule::new().with_deny(DenyConfig::new(status_code))
}

/// A small site: a few top-level views plus an included `credit/` group.
pub fn site_routes() -> Vec<RouteNode> {
    vec![
        RouteNode::new("^\\Z").with_outbound_rule(header_rule("home-page")),
        RouteNode::new("^year/(?P<year>[0-9]+)/\\Z").with_outbound_rule(header_rule("route-params")),
        RouteNode::new("^regex/(?:test-(?P<number>[0-9]+)/)?$")
            .with_outbound_rule(header_rule("regex")),
        RouteNode::new("^admin/").with_inbound_rule(deny_rule(403)),
        RouteNode::include(
            "^credit/",
            [
                RouteNode::new("^admin/\\Z"),
                RouteNode::new("^reports/\\Z")
                    .with_outbound_rule(header_rule("nested, no route param")),
                RouteNode::new("^reports/(?P<id>[0-9]+)/\\Z")
                    .with_outbound_rule(header_rule("nested, with route param"))
                    .with_inbound_rule(
                        PolicyRule::new()
                            .with_rate_limit(RateLimitConfig {
                                name: "reports".into(),
                                algorithm: "sliding_window".into(),
                                capacity: 10,
                                rate: "60s".into(),
                                bucket_key: [("ip".to_string(), "conn.ClientIP".to_string())]
                                    .into_iter()
                                    .collect(),
                            })
                            .with_url_rewrite(UrlRewriteConfig::new("/credit/reports/old", "/credit/reports/")),
                    ),
            ],
        ),
    ]
}
