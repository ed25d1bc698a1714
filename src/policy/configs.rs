//! Typed payloads for each policy action.
//!
//! All types derive `Deserialize` so rule templates can be read from route
//! files. Wire encoding goes through [`ConfigEncoding`], never through a
//! naive field dump of the construction-time names.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::policy::error::{PolicyError, PolicyResult};

/// Wire encoding of an action config.
///
/// Every variant of [`ActionConfig`](crate::policy::ActionConfig) implements
/// this. Structurally plain configs dump their fields; configs whose wire
/// shape differs from their Rust shape override it.
pub trait ConfigEncoding {
    /// Encode the config as the JSON object placed under `"config"`.
    fn encode(&self) -> PolicyResult<Value>;
}

/// Dump a config's fields as a JSON object.
fn encode_fields<T: Serialize>(kind: &'static str, config: &T) -> PolicyResult<Value> {
    let value = serde_json::to_value(config)
        .map_err(|source| PolicyError::Encode { kind, source })?;
    match value {
        Value::Object(_) => Ok(value),
        other => Err(PolicyError::NotAnObject {
            kind,
            found: json_type_name(&other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

macro_rules! field_encoding {
    ($($config:ty => $kind:literal),+ $(,)?) => {
        $(
            impl ConfigEncoding for $config {
                fn encode(&self) -> PolicyResult<Value> {
                    encode_fields($kind, self)
                }
            }
        )+
    };
}

field_encoding! {
    LogConfig => "log",
    CustomResponseConfig => "custom-response",
    DenyConfig => "deny",
    RateLimitConfig => "rate-limit",
    AddHeadersConfig => "add-headers",
    RemoveHeadersConfig => "remove-headers",
    JwtValidationConfig => "jwt-validation",
}

/// Config for the `log` action.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Arbitrary metadata attached to the log event.
    #[serde(default)]
    pub metadata: BTreeMap<String, Value>,
}

impl LogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// Config for the `custom-response` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomResponseConfig {
    pub status_code: u16,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

impl CustomResponseConfig {
    pub fn new(status_code: u16, content: impl Into<String>) -> Self {
        Self {
            status_code,
            content: content.into(),
            headers: BTreeMap::new(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Config for the `deny` action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenyConfig {
    pub status_code: u16,
}

impl DenyConfig {
    pub fn new(status_code: u16) -> Self {
        Self { status_code }
    }
}

/// Config for the `rate-limit` action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Limiter name, unique per edge.
    pub name: String,
    /// Bucketing algorithm, e.g. `sliding_window`.
    pub algorithm: String,
    /// Requests allowed per window.
    pub capacity: u64,
    /// Window length, e.g. `60s`.
    pub rate: String,
    /// Expressions selecting the bucket a request counts against.
    #[serde(default)]
    pub bucket_key: BTreeMap<String, String>,
}

/// Config for the `url-rewrite` action.
///
/// Encoded on the wire as `{"from": .., "to": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UrlRewriteConfig {
    #[serde(rename = "from", alias = "match")]
    pub match_pattern: String,
    #[serde(rename = "to", alias = "replacement")]
    pub replacement: String,
}

impl UrlRewriteConfig {
    pub fn new(match_pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            match_pattern: match_pattern.into(),
            replacement: replacement.into(),
        }
    }
}

impl ConfigEncoding for UrlRewriteConfig {
    fn encode(&self) -> PolicyResult<Value> {
        Ok(serde_json::json!({
            "from": self.match_pattern,
            "to": self.replacement,
        }))
    }
}

/// Config for the `add-headers` action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AddHeadersConfig {
    pub headers: BTreeMap<String, String>,
}

impl AddHeadersConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

/// Config for the `remove-headers` action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemoveHeadersConfig {
    pub headers: Vec<String>,
}

impl RemoveHeadersConfig {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
        }
    }
}

/// Config for the `jwt-validation` action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtValidationConfig {
    pub issuer: JwtIssuerConfig,
    pub audience: JwtAudienceConfig,
    pub http: JwtHttpConfig,
    pub jwt: JwtSigningConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JwtIssuerConfig {
    pub allow_list: Vec<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JwtAudienceConfig {
    pub allow_list: Vec<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JwtHttpConfig {
    pub tokens: Vec<JwtHttpToken>,
}

/// Where the edge looks for a bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtHttpToken {
    pub r#type: String,
    pub method: String,
    pub name: String,
    #[serde(default)]
    pub prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JwtSigningConfig {
    pub allowed_algorithms: Vec<String>,
    pub keys: JwtSigningKeys,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JwtSigningKeys {
    pub sources: Vec<JwtSigningKeySources>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JwtSigningKeySources {
    pub additional_jkus: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_rewrite_uses_wire_names() {
        let encoded = UrlRewriteConfig::new("/old/(.*)", "/new/$1").encode().unwrap();
        let object = encoded.as_object().unwrap();

        assert_eq!(object.get("from").unwrap(), "/old/(.*)");
        assert_eq!(object.get("to").unwrap(), "/new/$1");
        assert!(!object.contains_key("match"));
        assert!(!object.contains_key("match_pattern"));
        assert!(!object.contains_key("replacement"));
    }

    #[test]
    fn test_plain_configs_dump_fields() {
        let deny = DenyConfig::new(403).encode().unwrap();
        assert_eq!(deny, serde_json::json!({ "status_code": 403 }));

        let headers = AddHeadersConfig::new()
            .with_header("x-b", "2")
            .with_header("x-a", "1")
            .encode()
            .unwrap();
        assert_eq!(
            serde_json::to_string(&headers).unwrap(),
            r#"{"headers":{"x-a":"1","x-b":"2"}}"#
        );
    }

    #[test]
    fn test_jwt_token_type_field_name() {
        let token = JwtHttpToken {
            r#type: "jwt".into(),
            method: "header".into(),
            name: "Authorization".into(),
            prefix: "Bearer ".into(),
        };
        let value = serde_json::to_value(&token).unwrap();
        assert_eq!(value["type"], "jwt");
    }

    #[test]
    fn test_url_rewrite_accepts_both_input_names() {
        let wire: UrlRewriteConfig =
            serde_json::from_str(r#"{"from": "a", "to": "b"}"#).unwrap();
        let construction_names: UrlRewriteConfig =
            serde_json::from_str(r#"{"match": "a", "replacement": "b"}"#).unwrap();
        assert_eq!(wire, construction_names);
    }
}
