//! Policy document builder.

use crate::policy::error::PolicyResult;
use crate::policy::rule::PolicyRule;
use crate::policy::wire::{EncodedDocument, EncodedRule};
use crate::routing::CompiledRules;

/// Ordered inbound and outbound rules plus the enabled flag.
///
/// Rules are evaluated first-match by the edge, so insertion order is kept
/// all the way to the wire.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDocument {
    inbound: Vec<PolicyRule>,
    outbound: Vec<PolicyRule>,
    enabled: bool,
}

impl Default for PolicyDocument {
    fn default() -> Self {
        Self {
            inbound: Vec::new(),
            outbound: Vec::new(),
            enabled: true,
        }
    }
}

impl PolicyDocument {
    /// An empty, enabled document.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inbound_rules(&self) -> &[PolicyRule] {
        &self.inbound
    }

    pub fn outbound_rules(&self) -> &[PolicyRule] {
        &self.outbound
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_empty(&self) -> bool {
        self.inbound.is_empty() && self.outbound.is_empty()
    }

    #[must_use]
    pub fn with_inbound_rule(&self, rule: PolicyRule) -> Self {
        let mut doc = self.clone();
        doc.inbound.push(rule);
        doc
    }

    #[must_use]
    pub fn with_outbound_rule(&self, rule: PolicyRule) -> Self {
        let mut doc = self.clone();
        doc.outbound.push(rule);
        doc
    }

    #[must_use]
    pub fn with_enabled(&self, enabled: bool) -> Self {
        let mut doc = self.clone();
        doc.enabled = enabled;
        doc
    }

    /// Append compiled route rules after the rules already present.
    #[must_use]
    pub fn with_compiled_rules(&self, rules: CompiledRules) -> Self {
        let mut doc = self.clone();
        doc.inbound.extend(rules.inbound);
        doc.outbound.extend(rules.outbound);
        doc
    }

    /// Encode into the canonical nested structure.
    pub fn encode(&self) -> PolicyResult<EncodedDocument> {
        Ok(EncodedDocument {
            inbound: encode_rules(&self.inbound)?,
            outbound: encode_rules(&self.outbound)?,
            enabled: self.enabled,
        })
    }

    /// Serialize to the JSON string handed to the listener.
    pub fn build(&self) -> PolicyResult<String> {
        let json = self.encode()?.to_json()?;
        tracing::debug!(
            inbound = self.inbound.len(),
            outbound = self.outbound.len(),
            enabled = self.enabled,
            bytes = json.len(),
            "Policy document built"
        );
        Ok(json)
    }

    pub fn build_pretty(&self) -> PolicyResult<String> {
        self.encode()?.to_json_pretty()
    }
}

fn encode_rules(rules: &[PolicyRule]) -> PolicyResult<Vec<EncodedRule>> {
    rules.iter().map(PolicyRule::encode).collect()
}
