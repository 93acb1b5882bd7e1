//! Third-party form relay.
//!
//! Each submission opens a short-lived relay channel, hands the mapped fields
//! to the transport on a blocking worker, and schedules the channel's removal
//! after a fixed grace period. Nothing waits for the send and the endpoint's
//! answer is never read; the visitor is told the enquiry went out as soon as
//! the send has started.

use super::{Delivery, DeliveryDetail, DeliveryReceipt, DeliveryStrategy, RelayTransport};
use crate::config::{Config, FieldMapping};
use crate::domain::InquiryField;
use crate::error::{DeliveryError, DeliveryResult};
use crate::metrics::Metrics;
use crate::models::ValidatedInquiry;
use async_trait::async_trait;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// What the relay sent, as reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelayDispatch {
    /// Name of the transient channel used for this submission
    pub channel: String,

    /// Endpoint the fields were posted to
    pub action: String,

    /// External field id / value pairs, in form order
    pub fields: Vec<(String, String)>,
}

/// Registry of relay channels that have not been cleaned up yet.
#[derive(Debug, Clone, Default)]
pub struct RelayChannels {
    open: Arc<Mutex<HashSet<String>>>,
}

impl RelayChannels {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        // A poisoned set of names is still usable.
        self.open.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn open(&self, name: &str) {
        self.lock().insert(name.to_string());
    }

    /// Remove a channel. Returns false if it was already gone.
    pub fn close(&self, name: &str) -> bool {
        self.lock().remove(name)
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.lock().contains(name)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Delivery strategy A: fire-and-forget POST to a form collection endpoint.
pub struct FormRelay {
    action: String,
    fields: FieldMapping,
    transport: Arc<dyn RelayTransport>,
    grace_period: Duration,
    channels: RelayChannels,
    metrics: Metrics,
    sequence: AtomicU64,
}

impl FormRelay {
    /// Create a relay from configuration.
    pub fn new(config: &Config, transport: Arc<dyn RelayTransport>, metrics: Metrics) -> Self {
        Self {
            action: config.relay_form_action.clone(),
            fields: config.relay_fields.clone(),
            transport,
            grace_period: Duration::from_secs(config.relay_cleanup_grace_secs),
            channels: RelayChannels::new(),
            metrics,
            sequence: AtomicU64::new(0),
        }
    }

    /// Override the cleanup grace period.
    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Channels still awaiting cleanup.
    pub fn channels(&self) -> &RelayChannels {
        &self.channels
    }

    /// Map every form field to its external id.
    ///
    /// Always yields all six pairs; unset optional fields are sent as empty
    /// strings.
    pub fn payload(&self, inquiry: &ValidatedInquiry) -> Vec<(String, String)> {
        InquiryField::ALL
            .iter()
            .map(|&field| {
                (
                    self.fields.id_for(field).to_string(),
                    inquiry.value(field).to_string(),
                )
            })
            .collect()
    }

    fn next_channel_name(&self) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed);
        format!(
            "hidden-relay-{}-{}",
            chrono::Utc::now().timestamp_millis(),
            seq
        )
    }
}

#[async_trait]
impl Delivery for FormRelay {
    fn strategy(&self) -> DeliveryStrategy {
        DeliveryStrategy::Relay
    }

    async fn deliver(&self, inquiry: &ValidatedInquiry) -> DeliveryResult<DeliveryReceipt> {
        let runtime = tokio::runtime::Handle::try_current()
            .map_err(|e| DeliveryError::Initiate(e.to_string()))?;

        let fields = self.payload(inquiry);
        let channel = self.next_channel_name();
        self.channels.open(&channel);

        let send = {
            let transport = self.transport.clone();
            let action = self.action.clone();
            let body = fields.clone();
            let metrics = self.metrics.clone();
            let channel = channel.clone();

            runtime.spawn_blocking(move || {
                let start = Instant::now();
                let result = transport.submit(&action, &body);
                metrics.record_relay_send(start.elapsed(), result.is_err());

                match result {
                    Ok(()) => tracing::debug!(channel = %channel, "Relay submission sent"),
                    Err(e) => tracing::warn!(
                        channel = %channel,
                        error = %e,
                        "Relay submission failed after optimistic success"
                    ),
                }
            })
        };

        // Cleanup is tied to the clock, not to the send.
        {
            let channels = self.channels.clone();
            let metrics = self.metrics.clone();
            let grace_period = self.grace_period;
            let channel = channel.clone();

            runtime.spawn(async move {
                tokio::time::sleep(grace_period).await;
                if !send.is_finished() {
                    tracing::debug!(channel = %channel, "Relay send still in flight at cleanup, detaching");
                }
                drop(send);
                if channels.close(&channel) {
                    metrics.record_relay_channel_closed();
                }
            });
        }

        self.metrics.record_relay_dispatched();
        tracing::info!(channel = %channel, "Enquiry handed to form relay");

        Ok(DeliveryReceipt::new(
            DeliveryStrategy::Relay,
            DeliveryDetail::Relay(RelayDispatch {
                channel,
                action: self.action.clone(),
                fields,
            }),
        ))
    }
}
