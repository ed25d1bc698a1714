//! Policy rules.
//!
//! A rule is a value. Every `with_*` method leaves the receiver untouched
//! and returns a new rule owning its own expression and action lists.

use crate::policy::action::{ActionConfig, ActionKind, PolicyAction};
use crate::policy::configs::{
    AddHeadersConfig, CustomResponseConfig, DenyConfig, JwtValidationConfig, LogConfig,
    RateLimitConfig, RemoveHeadersConfig, UrlRewriteConfig,
};
use crate::policy::error::PolicyResult;
use crate::policy::wire::EncodedRule;

/// Match expressions (ANDed) plus the actions to run when they all match.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolicyRule {
    name: Option<String>,
    expressions: Vec<String>,
    actions: Vec<PolicyAction>,
}

impl PolicyRule {
    /// An empty rule: no name, no expressions, no actions.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn expressions(&self) -> &[String] {
        &self.expressions
    }

    pub fn actions(&self) -> &[PolicyAction] {
        &self.actions
    }

    #[must_use]
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        let mut rule = self.clone();
        rule.name = Some(name.into());
        rule
    }

    /// Append a match expression.
    #[must_use]
    pub fn with_expression(&self, expression: impl Into<String>) -> Self {
        let mut rule = self.clone();
        rule.expressions.push(expression.into());
        rule
    }

    /// Append an action of the given kind.
    #[must_use]
    pub fn with_action(&self, kind: ActionKind, config: impl Into<ActionConfig>) -> Self {
        let mut rule = self.clone();
        rule.actions.push(PolicyAction::new(kind, config));
        rule
    }

    #[must_use]
    pub fn with_log(&self, config: LogConfig) -> Self {
        self.with_action(ActionKind::Log, config)
    }

    #[must_use]
    pub fn with_custom_response(&self, config: CustomResponseConfig) -> Self {
        self.with_action(ActionKind::CustomResponse, config)
    }

    #[must_use]
    pub fn with_deny(&self, config: DenyConfig) -> Self {
        self.with_action(ActionKind::Deny, config)
    }

    #[must_use]
    pub fn with_rate_limit(&self, config: RateLimitConfig) -> Self {
        self.with_action(ActionKind::RateLimit, config)
    }

    #[must_use]
    pub fn with_url_rewrite(&self, config: UrlRewriteConfig) -> Self {
        self.with_action(ActionKind::UrlRewrite, config)
    }

    #[must_use]
    pub fn with_add_headers(&self, config: AddHeadersConfig) -> Self {
        self.with_action(ActionKind::AddHeaders, config)
    }

    #[must_use]
    pub fn with_remove_headers(&self, config: RemoveHeadersConfig) -> Self {
        self.with_action(ActionKind::RemoveHeaders, config)
    }

    #[must_use]
    pub fn with_jwt_validation(&self, config: JwtValidationConfig) -> Self {
        self.with_action(ActionKind::JwtValidation, config)
    }

    pub(crate) fn encode(&self) -> PolicyResult<EncodedRule> {
        Ok(EncodedRule {
            expressions: self.expressions.clone(),
            name: self.name.clone().unwrap_or_default(),
            actions: self
                .actions
                .iter()
                .map(PolicyAction::encode)
                .collect::<PolicyResult<_>>()?,
        })
    }
}
