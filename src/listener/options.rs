//! Listener options carrying the policy document.

use crate::policy::{PolicyDocument, PolicyResult};

/// Settings handed to an endpoint when establishing a listener.
///
/// The policy is carried as an opaque JSON string; nothing here inspects it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    traffic_policy: Option<String>,
    forwards_to: Option<String>,
    metadata: Option<String>,
}

impl ListenerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Traffic policy document, as JSON.
    pub fn traffic_policy(mut self, policy: impl Into<String>) -> Self {
        self.traffic_policy = Some(policy.into());
        self
    }

    /// Same as [`traffic_policy`](Self::traffic_policy).
    #[deprecated(note = "use traffic_policy instead")]
    pub fn policy(self, policy: impl Into<String>) -> Self {
        self.traffic_policy(policy)
    }

    /// Build `document` and attach it as the traffic policy.
    pub fn with_document(self, document: &PolicyDocument) -> PolicyResult<Self> {
        Ok(self.traffic_policy(document.build()?))
    }

    pub fn forwards_to(mut self, forwards_to: impl Into<String>) -> Self {
        self.forwards_to = Some(forwards_to.into());
        self
    }

    /// Opaque, user-supplied metadata reported by the endpoint.
    pub fn metadata(mut self, metadata: impl Into<String>) -> Self {
        self.metadata = Some(metadata.into());
        self
    }

    pub fn traffic_policy_json(&self) -> Option<&str> {
        self.traffic_policy.as_deref()
    }

    pub fn forwards_to_addr(&self) -> Option<&str> {
        self.forwards_to.as_deref()
    }

    pub fn metadata_value(&self) -> Option<&str> {
        self.metadata.as_deref()
    }
}
