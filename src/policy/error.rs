//! Policy encoding errors.

use thiserror::Error;

/// Errors raised while encoding a policy document.
///
/// Both variants indicate a config type without working wire support. They
/// are never recovered from locally.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// A config could not be turned into JSON.
    #[error("failed to encode `{kind}` action config: {source}")]
    Encode {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// A config encoded to something other than a JSON object.
    #[error("`{kind}` action config encoded as {found}, expected an object")]
    NotAnObject {
        kind: &'static str,
        found: &'static str,
    },

    /// The final document could not be rendered.
    #[error("failed to render policy document: {0}")]
    Render(#[source] serde_json::Error),
}

/// Result type for policy encoding.
pub type PolicyResult<T> = Result<T, PolicyError>;
