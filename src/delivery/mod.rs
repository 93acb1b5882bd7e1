//! Delivery strategies for validated enquiries.
//!
//! Exactly one strategy is active per deployment, chosen from configuration at
//! start-up:
//!
//! - [`FormRelay`]: POST the mapped fields to a third-party form endpoint and
//!   forget about it.
//! - [`MailHandoff`]: build a `mailto:` link and hand it to the caller.
//!
//! Neither can confirm that the enquiry arrived. Both report success as soon
//! as the hand-off has been started.

mod mail;
mod relay;
mod transport;

pub use mail::{MailDispatch, MailHandoff};
pub use relay::{FormRelay, RelayChannels, RelayDispatch};
pub use transport::{RelayTransport, UreqTransport};

use crate::config::Config;
use crate::error::DeliveryResult;
use crate::metrics::Metrics;
use crate::models::ValidatedInquiry;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Message shown to the visitor after any successful hand-off.
pub const SUCCESS_MESSAGE: &str =
    "Thank you — your inquiry had been send. We'll contact you shortly.";

/// Which delivery strategy a deployment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStrategy {
    /// Third-party form relay; the form is cleared after sending
    Relay,
    /// Local mail client hand-off; the form locks after sending
    Mail,
}

impl FromStr for DeliveryStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relay" | "form" | "google-form" => Ok(Self::Relay),
            "mail" | "mailto" => Ok(Self::Mail),
            other => Err(format!("Expected 'relay' or 'mail', got: {}", other)),
        }
    }
}

impl fmt::Display for DeliveryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Relay => f.write_str("relay"),
            Self::Mail => f.write_str("mail"),
        }
    }
}

/// What a strategy did with the enquiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DeliveryDetail {
    Relay(RelayDispatch),
    Mail(MailDispatch),
}

/// Outcome of starting a delivery. Always optimistic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    pub strategy: DeliveryStrategy,
    pub message: String,
    pub detail: DeliveryDetail,
}

impl DeliveryReceipt {
    pub(crate) fn new(strategy: DeliveryStrategy, detail: DeliveryDetail) -> Self {
        Self {
            strategy,
            message: SUCCESS_MESSAGE.to_string(),
            detail,
        }
    }

    /// The `mailto:` link, when the mail strategy produced this receipt.
    pub fn mail_link(&self) -> Option<&str> {
        match &self.detail {
            DeliveryDetail::Mail(dispatch) => Some(&dispatch.link),
            DeliveryDetail::Relay(_) => None,
        }
    }

    /// The submitted field pairs, when the relay strategy produced this receipt.
    pub fn relay_fields(&self) -> Option<&[(String, String)]> {
        match &self.detail {
            DeliveryDetail::Relay(dispatch) => Some(&dispatch.fields),
            DeliveryDetail::Mail(_) => None,
        }
    }
}

/// A way of getting a validated enquiry off the page.
#[async_trait]
pub trait Delivery: Send + Sync {
    /// Which strategy this is.
    fn strategy(&self) -> DeliveryStrategy;

    /// Start delivering the enquiry. Returns without waiting for the remote
    /// side, which cannot be observed.
    async fn deliver(&self, inquiry: &ValidatedInquiry) -> DeliveryResult<DeliveryReceipt>;
}

/// Build the strategy selected in configuration.
pub fn from_config(config: &Config, metrics: Metrics) -> Arc<dyn Delivery> {
    match config.delivery_strategy {
        DeliveryStrategy::Relay => {
            let transport = Arc::new(UreqTransport::new(config)) as Arc<dyn RelayTransport>;
            Arc::new(FormRelay::new(config, transport, metrics))
        }
        DeliveryStrategy::Mail => Arc::new(MailHandoff::new(config, metrics)),
    }
}
