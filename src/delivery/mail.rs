//! Mail client hand-off.
//!
//! Renders the enquiry as a labelled plain-text body and wraps it in a
//! `mailto:` link. Returning the link to the caller, who navigates to it, is
//! the whole delivery: whether a mail handler exists, or whether the visitor
//! actually presses send, is invisible from here.

use super::{Delivery, DeliveryDetail, DeliveryReceipt, DeliveryStrategy};
use crate::config::Config;
use crate::error::DeliveryResult;
use crate::metrics::Metrics;
use crate::models::ValidatedInquiry;
use async_trait::async_trait;
use serde::Serialize;

/// The link produced by a mail hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MailDispatch {
    /// `mailto:` target to navigate to
    pub link: String,
}

/// Delivery strategy B: hand the enquiry to the visitor's mail client.
pub struct MailHandoff {
    recipient: String,
    subject_template: String,
    metrics: Metrics,
}

impl MailHandoff {
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        Self {
            recipient: config.mail_recipient.clone(),
            subject_template: config.mail_subject.clone(),
            metrics,
        }
    }

    /// Subject line with `{name}` filled in.
    pub fn compose_subject(&self, inquiry: &ValidatedInquiry) -> String {
        self.subject_template.replace("{name}", inquiry.name())
    }

    /// Plain-text body, one `Label: value` line per field.
    ///
    /// Name, phone, email and city are always present. The preferred time
    /// and message lines are left out when empty.
    pub fn compose_body(&self, inquiry: &ValidatedInquiry) -> String {
        let mut lines = vec![
            format!("Name: {}", inquiry.name()),
            format!("Phone: {}", inquiry.phone()),
            format!("Email: {}", inquiry.email()),
            format!("City: {}", inquiry.city()),
        ];

        if !inquiry.preferred_time().is_anytime() {
            lines.push(format!("Preferred time: {}", inquiry.preferred_time()));
        }
        if !inquiry.message().is_empty() {
            lines.push(format!("Message: {}", inquiry.message()));
        }

        lines.join("\n")
    }

    /// `mailto:<recipient>?subject=<encoded>&body=<encoded>`
    pub fn mail_link(&self, inquiry: &ValidatedInquiry) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient,
            urlencoding::encode(&self.compose_subject(inquiry)),
            urlencoding::encode(&self.compose_body(inquiry)),
        )
    }
}

#[async_trait]
impl Delivery for MailHandoff {
    fn strategy(&self) -> DeliveryStrategy {
        DeliveryStrategy::Mail
    }

    async fn deliver(&self, inquiry: &ValidatedInquiry) -> DeliveryResult<DeliveryReceipt> {
        let link = self.mail_link(inquiry);
        self.metrics.record_mail_link();
        tracing::info!(recipient = %self.recipient, "Enquiry handed to mail client");

        Ok(DeliveryReceipt::new(
            DeliveryStrategy::Mail,
            DeliveryDetail::Mail(MailDispatch { link }),
        ))
    }
}
