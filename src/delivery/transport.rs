//! HTTP transport for the form relay.
//!
//! The transport is synchronous (`ureq`) and is run on tokio's blocking pool
//! by [`FormRelay`](super::FormRelay). Its result is only logged.

use crate::config::Config;
use crate::error::{RelayError, RelayResult};
use std::sync::Arc;
use std::time::Duration;

/// One-way submission of form fields to a remote endpoint.
pub trait RelayTransport: Send + Sync {
    /// POST `fields` to `action` as a form submission. The response body is
    /// never read.
    fn submit(&self, action: &str, fields: &[(String, String)]) -> RelayResult<()>;
}

/// `ureq`-backed relay transport.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Arc<ureq::Agent>,
}

impl UreqTransport {
    /// Create a transport using the configured request timeout.
    pub fn new(config: &Config) -> Self {
        Self::with_timeout(Duration::from_secs(config.request_timeout))
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            agent: Arc::new(agent),
        }
    }

    /// Map a ureq error to a RelayError.
    fn map_error(error: ureq::Error) -> RelayError {
        match error {
            ureq::Error::Status(code, _) => RelayError::Status { status: code },
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    RelayError::Transport("Connection failed".to_string())
                } else {
                    RelayError::Transport(transport.to_string())
                }
            }
        }
    }
}

impl RelayTransport for UreqTransport {
    fn submit(&self, action: &str, fields: &[(String, String)]) -> RelayResult<()> {
        let pairs: Vec<(&str, &str)> = fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        tracing::debug!("POST {} ({} fields)", action, pairs.len());

        self.agent
            .post(action)
            .send_form(&pairs)
            .map(|_| ())
            .map_err(Self::map_error)
    }
}
