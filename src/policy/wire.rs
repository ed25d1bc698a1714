//! Canonical wire shape of a policy document.
//!
//! Field order in these structs is the field order on the wire. The JSON
//! renderer separates items with `", "` and keys from values with `": "`,
//! so an empty disabled document renders as
//! `{"inbound": [], "outbound": [], "enabled": false}`.

use std::io;

use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use serde_json::Value;

use crate::policy::error::{PolicyError, PolicyResult};

/// Encoded policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedDocument {
    pub inbound: Vec<EncodedRule>,
    pub outbound: Vec<EncodedRule>,
    pub enabled: bool,
}

/// Encoded policy rule. A rule without a name encodes it as `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedRule {
    pub expressions: Vec<String>,
    pub name: String,
    pub actions: Vec<EncodedAction>,
}

/// Encoded action: wire type name plus the config object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub config: Value,
}

impl EncodedDocument {
    /// Render in the canonical single-line form.
    pub fn to_json(&self) -> PolicyResult<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
        self.serialize(&mut ser).map_err(PolicyError::Render)?;
        String::from_utf8(buf).map_err(|e| PolicyError::Render(serde_json::Error::custom(e)))
    }

    /// Render indented, for humans.
    pub fn to_json_pretty(&self) -> PolicyResult<String> {
        serde_json::to_string_pretty(self).map_err(PolicyError::Render)
    }
}

/// Compact JSON with a space after every `,` and `:`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
