//! Initialization context shared by framework glue.
//!
//! Holds the base domain, the default document compiled rules are merged
//! into, and listener settings. Constructed explicitly at startup and passed
//! to whatever registers routes.

use std::time::Duration;

use crate::config::{ListenerConfig, PolicyConfig};
use crate::listener::ListenerOptions;
use crate::policy::{PolicyDocument, PolicyResult};
use crate::routing::{CompiledRules, RouteTreeCompiler, RouteView};

#[derive(Debug, Clone, Default)]
pub struct PolicyContext {
    compiler: RouteTreeCompiler,
    defaults: PolicyDocument,
    listener: ListenerConfig,
}

impl PolicyContext {
    pub fn new(base_domain: impl Into<String>) -> Self {
        Self {
            compiler: RouteTreeCompiler::new(base_domain.into()),
            ..Self::default()
        }
    }

    pub fn from_config(config: &PolicyConfig) -> Self {
        Self {
            compiler: RouteTreeCompiler::new(config.base_domain.as_str()),
            defaults: PolicyDocument::new().with_enabled(config.enabled),
            listener: config.listener.clone(),
        }
    }

    /// Replace the document compiled rules are appended to.
    pub fn with_defaults(mut self, defaults: PolicyDocument) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn compiler(&self) -> &RouteTreeCompiler {
        &self.compiler
    }

    pub fn defaults(&self) -> &PolicyDocument {
        &self.defaults
    }

    pub fn establish_timeout(&self) -> Duration {
        Duration::from_secs(self.listener.establish_timeout_secs)
    }

    pub fn compile<N: RouteView>(&self, roots: &[N]) -> CompiledRules {
        self.compiler.compile(roots)
    }

    /// Default document followed by the rules compiled from `roots`.
    pub fn document_for<N: RouteView>(&self, roots: &[N]) -> PolicyDocument {
        self.defaults.with_compiled_rules(self.compile(roots))
    }

    /// Listener options carrying the document for `roots`.
    pub fn listener_options<N: RouteView>(&self, roots: &[N]) -> PolicyResult<ListenerOptions> {
        let mut options = ListenerOptions::new();
        if let Some(forwards_to) = &self.listener.forwards_to {
            options = options.forwards_to(forwards_to.as_str());
        }
        options.with_document(&self.document_for(roots))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{DenyConfig, LogConfig, PolicyRule};
    use crate::routing::RouteNode;

    #[test]
    fn test_defaults_come_first() {
        let context = PolicyContext::new("").with_defaults(
            PolicyDocument::new().with_inbound_rule(PolicyRule::new().with_log(LogConfig::new())),
        );
        let roots = [RouteNode::new("^admin/")
            .with_inbound_rule(PolicyRule::new().with_deny(DenyConfig::new(403)))];

        let doc = context.document_for(&roots);
        assert_eq!(doc.inbound_rules().len(), 2);
        assert!(doc.inbound_rules()[0].expressions().is_empty());
        assert_eq!(doc.inbound_rules()[1].expressions(), ["req.URL.matches('admin/')"]);
        assert!(context.defaults().inbound_rules().len() == 1);
    }

    #[test]
    fn test_from_config() {
        let mut config = PolicyConfig::default();
        config.base_domain = "example.com".into();
        config.enabled = false;
        config.listener.forwards_to = Some("localhost:8000".into());
        config.listener.establish_timeout_secs = 7;

        let context = PolicyContext::from_config(&config);
        assert_eq!(context.compiler().base_domain().as_str(), "example.com/");
        assert_eq!(context.establish_timeout(), Duration::from_secs(7));

        let options = context.listener_options::<RouteNode>(&[]).unwrap();
        assert_eq!(options.forwards_to_addr(), Some("localhost:8000"));
        assert_eq!(
            options.traffic_policy_json(),
            Some(r#"{"inbound": [], "outbound": [], "enabled": false}"#)
        );
    }
}
