//! Action kinds and the tagged config union.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::policy::configs::{
    AddHeadersConfig, ConfigEncoding, CustomResponseConfig, DenyConfig, JwtValidationConfig,
    LogConfig, RateLimitConfig, RemoveHeadersConfig, UrlRewriteConfig,
};
use crate::policy::error::PolicyResult;
use crate::policy::wire::EncodedAction;

/// Action types understood by the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Log,
    CustomResponse,
    Deny,
    RateLimit,
    UrlRewrite,
    AddHeaders,
    RemoveHeaders,
    JwtValidation,
}

impl ActionKind {
    pub const ALL: [ActionKind; 8] = [
        ActionKind::Log,
        ActionKind::CustomResponse,
        ActionKind::Deny,
        ActionKind::RateLimit,
        ActionKind::UrlRewrite,
        ActionKind::AddHeaders,
        ActionKind::RemoveHeaders,
        ActionKind::JwtValidation,
    ];

    /// Wire name of the action, e.g. `add-headers`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Log => "log",
            ActionKind::CustomResponse => "custom-response",
            ActionKind::Deny => "deny",
            ActionKind::RateLimit => "rate-limit",
            ActionKind::UrlRewrite => "url-rewrite",
            ActionKind::AddHeaders => "add-headers",
            ActionKind::RemoveHeaders => "remove-headers",
            ActionKind::JwtValidation => "jwt-validation",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown action name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action kind `{0}`")]
pub struct UnknownActionKind(pub String);

impl FromStr for ActionKind {
    type Err = UnknownActionKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownActionKind(s.to_string()))
    }
}

/// Payload of a policy action, one variant per [`ActionKind`].
///
/// Deserializes from `{ "type": <kind>, "config": { .. } }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "kebab-case")]
pub enum ActionConfig {
    Log(LogConfig),
    CustomResponse(CustomResponseConfig),
    Deny(DenyConfig),
    RateLimit(RateLimitConfig),
    UrlRewrite(UrlRewriteConfig),
    AddHeaders(AddHeadersConfig),
    RemoveHeaders(RemoveHeadersConfig),
    JwtValidation(JwtValidationConfig),
}

impl ActionConfig {
    /// The kind this payload belongs to.
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionConfig::Log(_) => ActionKind::Log,
            ActionConfig::CustomResponse(_) => ActionKind::CustomResponse,
            ActionConfig::Deny(_) => ActionKind::Deny,
            ActionConfig::RateLimit(_) => ActionKind::RateLimit,
            ActionConfig::UrlRewrite(_) => ActionKind::UrlRewrite,
            ActionConfig::AddHeaders(_) => ActionKind::AddHeaders,
            ActionConfig::RemoveHeaders(_) => ActionKind::RemoveHeaders,
            ActionConfig::JwtValidation(_) => ActionKind::JwtValidation,
        }
    }

    /// Dispatch to the variant's own wire encoding.
    pub fn encode(&self) -> PolicyResult<Value> {
        match self {
            ActionConfig::Log(c) => c.encode(),
            ActionConfig::CustomResponse(c) => c.encode(),
            ActionConfig::Deny(c) => c.encode(),
            ActionConfig::RateLimit(c) => c.encode(),
            ActionConfig::UrlRewrite(c) => c.encode(),
            ActionConfig::AddHeaders(c) => c.encode(),
            ActionConfig::RemoveHeaders(c) => c.encode(),
            ActionConfig::JwtValidation(c) => c.encode(),
        }
    }
}

macro_rules! config_from {
    ($($variant:ident($config:ty)),+ $(,)?) => {
        $(
            impl From<$config> for ActionConfig {
                fn from(config: $config) -> Self {
                    ActionConfig::$variant(config)
                }
            }
        )+
    };
}

config_from! {
    Log(LogConfig),
    CustomResponse(CustomResponseConfig),
    Deny(DenyConfig),
    RateLimit(RateLimitConfig),
    UrlRewrite(UrlRewriteConfig),
    AddHeaders(AddHeadersConfig),
    RemoveHeaders(RemoveHeadersConfig),
    JwtValidation(JwtValidationConfig),
}

/// A single action within a rule.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyAction {
    pub kind: ActionKind,
    pub config: ActionConfig,
}

impl PolicyAction {
    pub fn new(kind: ActionKind, config: impl Into<ActionConfig>) -> Self {
        Self {
            kind,
            config: config.into(),
        }
    }

    pub(crate) fn encode(&self) -> PolicyResult<EncodedAction> {
        Ok(EncodedAction {
            kind: self.kind.as_str().to_string(),
            config: self.config.encode()?,
        })
    }
}

impl From<ActionConfig> for PolicyAction {
    fn from(config: ActionConfig) -> Self {
        Self {
            kind: config.kind(),
            config,
        }
    }
}
