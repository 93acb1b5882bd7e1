//! Intake service.
//!
//! Business logic for editing, validating and submitting the contact form.

use crate::delivery::{Delivery, DeliveryReceipt};
use crate::domain::{InquiryField, ValidationError};
use crate::error::FormResult;
use crate::form::{FormSnapshot, InquiryForm, SubmitOutcome};
use crate::metrics::{Metrics, MetricsSummary};
use crate::models::{ContactInquiry, ValidatedInquiry};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Result of a submit, together with what the visitor now sees.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitReport {
    /// True when the enquiry was handed to the delivery strategy
    pub accepted: bool,
    /// Inline validation message when not accepted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<DeliveryReceipt>,
    pub form: FormSnapshot,
}

/// Intake service trait for business operations.
#[async_trait]
pub trait IntakeService: Send + Sync {
    /// Edit one field of the session's form.
    async fn update_field(&self, field: InquiryField, value: &str) -> FormResult<FormSnapshot>;

    /// Current form state.
    async fn view(&self) -> FormSnapshot;

    /// Submit the session's form.
    async fn submit(&self) -> FormResult<SubmitReport>;

    /// Start over with an empty form.
    async fn reload(&self) -> FormSnapshot;

    /// Check a complete enquiry without touching the session's form.
    fn validate(&self, inquiry: &ContactInquiry) -> Result<ValidatedInquiry, ValidationError>;

    fn metrics(&self) -> MetricsSummary;
}

/// Default implementation of IntakeService.
pub struct IntakeServiceImpl {
    form: Mutex<InquiryForm>,
    metrics: Metrics,
}

impl IntakeServiceImpl {
    /// Create a new intake service around a delivery strategy.
    pub fn new(delivery: Arc<dyn Delivery>, metrics: Metrics) -> Self {
        Self {
            form: Mutex::new(InquiryForm::new(delivery)),
            metrics,
        }
    }
}

#[async_trait]
impl IntakeService for IntakeServiceImpl {
    async fn update_field(&self, field: InquiryField, value: &str) -> FormResult<FormSnapshot> {
        let mut form = self.form.lock().await;
        form.update_field(field, value)?;
        Ok(form.snapshot())
    }

    async fn view(&self) -> FormSnapshot {
        self.form.lock().await.snapshot()
    }

    async fn submit(&self) -> FormResult<SubmitReport> {
        let mut form = self.form.lock().await;
        self.metrics.record_submission();

        let outcome = form.submit().await?;
        let report = match outcome {
            SubmitOutcome::Rejected(e) => {
                self.metrics.record_validation_failure();
                SubmitReport {
                    accepted: false,
                    error: Some(e.to_string()),
                    receipt: None,
                    form: form.snapshot(),
                }
            }
            SubmitOutcome::Delivered(receipt) => SubmitReport {
                accepted: true,
                error: None,
                receipt: Some(receipt),
                form: form.snapshot(),
            },
        };

        Ok(report)
    }

    async fn reload(&self) -> FormSnapshot {
        let mut form = self.form.lock().await;
        form.reload();
        form.snapshot()
    }

    fn validate(&self, inquiry: &ContactInquiry) -> Result<ValidatedInquiry, ValidationError> {
        inquiry.validate()
    }

    fn metrics(&self) -> MetricsSummary {
        self.metrics.summary()
    }
}
