//! Endpoint seam for establishing listeners.
//!
//! # Responsibilities
//! - Hand the policy string to an external endpoint
//! - Bound the wait with a timeout
//! - Keep policy rejections distinct from transport failures
//!
//! # Design Decisions
//! - The endpoint is the only place policy content is validated
//! - Remote diagnostics are passed through verbatim

use std::future::Future;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::listener::options::ListenerOptions;
use crate::policy::PolicyError;

/// Errors surfaced while establishing a listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The edge refused the traffic policy.
    #[error("traffic policy rejected: {message}")]
    PolicyRejected { message: String },

    /// The session or transport failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The endpoint did not answer in time.
    #[error("listener not established after {0:?}")]
    Timeout(Duration),

    /// The policy document could not be built.
    #[error(transparent)]
    Policy(#[from] PolicyError),
}

impl ListenerError {
    pub fn rejected(message: impl Into<String>) -> Self {
        ListenerError::PolicyRejected {
            message: message.into(),
        }
    }

    pub fn is_policy_rejection(&self) -> bool {
        matches!(self, ListenerError::PolicyRejected { .. })
    }
}

/// External endpoint that accepts a policy and opens a listener.
pub trait PolicyEndpoint {
    type Listener;

    fn establish(
        &self,
        options: &ListenerOptions,
    ) -> impl Future<Output = Result<Self::Listener, ListenerError>> + Send;
}

/// Establish a listener, waiting at most `timeout`.
pub async fn establish<E: PolicyEndpoint>(
    endpoint: &E,
    options: &ListenerOptions,
    timeout: Duration,
) -> Result<E::Listener, ListenerError> {
    let started = Instant::now();
    let has_policy = options.traffic_policy_json().is_some();

    let result = match tokio::time::timeout(timeout, endpoint.establish(options)).await {
        Ok(result) => result,
        Err(_) => Err(ListenerError::Timeout(timeout)),
    };

    match &result {
        Ok(_) => tracing::info!(
            has_policy,
            forwards_to = options.forwards_to_addr().unwrap_or("-"),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Listener established"
        ),
        Err(ListenerError::PolicyRejected { message }) => {
            tracing::warn!(message = %message, "Traffic policy rejected by edge")
        }
        Err(e) => tracing::error!(error = %e, "Failed to establish listener"),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Accepting;

    impl PolicyEndpoint for Accepting {
        type Listener = String;

        async fn establish(&self, options: &ListenerOptions) -> Result<String, ListenerError> {
            Ok(options.traffic_policy_json().unwrap_or_default().to_string())
        }
    }

    struct Stalled;

    impl PolicyEndpoint for Stalled {
        type Listener = ();

        async fn establish(&self, _options: &ListenerOptions) -> Result<(), ListenerError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_policy_passed_through_unchanged() {
        let options = ListenerOptions::new().traffic_policy("{{");
        let listener = establish(&Accepting, &options, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(listener, "{{");
    }

    #[tokio::test]
    async fn test_timeout() {
        let err = establish(&Stalled, &ListenerOptions::new(), Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(matches!(err, ListenerError::Timeout(d) if d == Duration::from_millis(50)));
        assert!(!err.is_policy_rejection());
    }
}
