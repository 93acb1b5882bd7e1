//! Basic metrics instrumentation for the intake pipeline.
//!
//! Counters for submissions, validation failures and what each delivery
//! strategy did. Relay transport errors are counted here for operators; they
//! are never reported back to the visitor.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Metrics collector for the intake pipeline.
#[derive(Debug, Clone)]
pub struct Metrics {
    /// Submit attempts, valid or not
    submissions_total: Arc<AtomicU64>,

    /// Submit attempts rejected by validation
    validation_failures_total: Arc<AtomicU64>,

    /// Relay submissions started
    relay_dispatched_total: Arc<AtomicU64>,

    /// Relay sends that failed in the transport
    relay_transport_errors_total: Arc<AtomicU64>,

    /// Relay channels removed after the grace period
    relay_channels_closed_total: Arc<AtomicU64>,

    /// Total relay send duration in milliseconds
    relay_duration_total_ms: Arc<AtomicU64>,

    /// Mail links handed off
    mail_links_total: Arc<AtomicU64>,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self {
            submissions_total: Arc::new(AtomicU64::new(0)),
            validation_failures_total: Arc::new(AtomicU64::new(0)),
            relay_dispatched_total: Arc::new(AtomicU64::new(0)),
            relay_transport_errors_total: Arc::new(AtomicU64::new(0)),
            relay_channels_closed_total: Arc::new(AtomicU64::new(0)),
            relay_duration_total_ms: Arc::new(AtomicU64::new(0)),
            mail_links_total: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record_submission(&self) {
        self.submissions_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_validation_failure(&self) {
        self.validation_failures_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_relay_dispatched(&self) {
        self.relay_dispatched_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a finished relay send and whether the transport reported an error.
    pub fn record_relay_send(&self, duration: Duration, failed: bool) {
        self.relay_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
        if failed {
            self.relay_transport_errors_total
                .fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_relay_channel_closed(&self) {
        self.relay_channels_closed_total
            .fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_mail_link(&self) {
        self.mail_links_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn submissions_total(&self) -> u64 {
        self.submissions_total.load(Ordering::Relaxed)
    }

    pub fn validation_failures_total(&self) -> u64 {
        self.validation_failures_total.load(Ordering::Relaxed)
    }

    pub fn relay_dispatched_total(&self) -> u64 {
        self.relay_dispatched_total.load(Ordering::Relaxed)
    }

    pub fn relay_transport_errors_total(&self) -> u64 {
        self.relay_transport_errors_total.load(Ordering::Relaxed)
    }

    pub fn relay_channels_closed_total(&self) -> u64 {
        self.relay_channels_closed_total.load(Ordering::Relaxed)
    }

    pub fn relay_duration_total_ms(&self) -> u64 {
        self.relay_duration_total_ms.load(Ordering::Relaxed)
    }

    pub fn mail_links_total(&self) -> u64 {
        self.mail_links_total.load(Ordering::Relaxed)
    }

    /// Reset all metrics to zero.
    pub fn reset(&self) {
        self.submissions_total.store(0, Ordering::Relaxed);
        self.validation_failures_total.store(0, Ordering::Relaxed);
        self.relay_dispatched_total.store(0, Ordering::Relaxed);
        self.relay_transport_errors_total.store(0, Ordering::Relaxed);
        self.relay_channels_closed_total.store(0, Ordering::Relaxed);
        self.relay_duration_total_ms.store(0, Ordering::Relaxed);
        self.mail_links_total.store(0, Ordering::Relaxed);
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            submissions_total: self.submissions_total(),
            validation_failures_total: self.validation_failures_total(),
            relay_dispatched_total: self.relay_dispatched_total(),
            relay_transport_errors_total: self.relay_transport_errors_total(),
            relay_channels_closed_total: self.relay_channels_closed_total(),
            relay_duration_total_ms: self.relay_duration_total_ms(),
            mail_links_total: self.mail_links_total(),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct MetricsSummary {
    pub submissions_total: u64,
    pub validation_failures_total: u64,
    pub relay_dispatched_total: u64,
    pub relay_transport_errors_total: u64,
    pub relay_channels_closed_total: u64,
    pub relay_duration_total_ms: u64,
    pub mail_links_total: u64,
}
