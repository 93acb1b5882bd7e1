//! The contact form and its submission state machine.
//!
//! ```text
//! Editing --submit--> Validating --invalid--> Editing (+ inline error)
//!                                 --valid, relay--> EditingCleared
//!                                 --valid, mail---> Submitted (terminal)
//! ```
//!
//! There is no state for confirmed delivery; success is reported as soon as
//! the delivery strategy has been handed the enquiry.

use crate::delivery::{Delivery, DeliveryReceipt, DeliveryStrategy};
use crate::domain::{InquiryField, ValidationError};
use crate::error::{FormError, FormResult};
use crate::models::ContactInquiry;
use serde::Serialize;
use std::sync::Arc;

/// Inline message shown when a delivery could not even be started.
pub const SUBMIT_FAILED_MESSAGE: &str =
    "Couldn't submit form. Please try again or contact us directly.";

/// Where the form is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormState {
    /// Accepting input (initial state)
    Editing,
    /// Inside `submit`. Only seen from outside when a submit future was
    /// dropped before delivery finished; the next submit recovers from it.
    Validating,
    /// Handed to the mail client; no further submits this page lifetime
    Submitted,
    /// Handed to the relay and cleared; ready for a fresh enquiry
    EditingCleared,
}

/// Result of a submit attempt that reached validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the entity is kept for correction
    Rejected(ValidationError),
    /// Handed to the delivery strategy
    Delivered(DeliveryReceipt),
}

/// What the visitor currently sees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub state: FormState,
    pub strategy: DeliveryStrategy,
    pub fields: ContactInquiry,
    pub error: Option<String>,
    pub error_field: Option<InquiryField>,
    pub can_submit: bool,
    pub button_label: &'static str,
    pub success_message: Option<String>,
}

/// One visitor's contact form for one page lifetime.
pub struct InquiryForm {
    delivery: Arc<dyn Delivery>,
    inquiry: ContactInquiry,
    state: FormState,
    error: Option<String>,
    error_field: Option<InquiryField>,
    sending: bool,
    last_receipt: Option<DeliveryReceipt>,
}

impl InquiryForm {
    /// A freshly loaded, empty form.
    pub fn new(delivery: Arc<dyn Delivery>) -> Self {
        Self {
            delivery,
            inquiry: ContactInquiry::default(),
            state: FormState::Editing,
            error: None,
            error_field: None,
            sending: false,
            last_receipt: None,
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn inquiry(&self) -> &ContactInquiry {
        &self.inquiry
    }

    /// The inline error currently shown, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_receipt(&self) -> Option<&DeliveryReceipt> {
        self.last_receipt.as_ref()
    }

    /// Whether the submit control is enabled.
    ///
    /// `sending` is set for the duration of the delivery call, so it is only
    /// visible here after a submit was dropped while awaiting delivery.
    pub fn can_submit(&self) -> bool {
        !self.sending && !matches!(self.state, FormState::Submitted | FormState::Validating)
    }

    fn button_label(&self) -> &'static str {
        if self.sending {
            "Sending..."
        } else if self.state == FormState::Submitted {
            "Submitted"
        } else {
            "Send enquiry"
        }
    }

    /// Apply one edit. The phone field is sanitized to digits.
    ///
    /// Typing into a cleared form starts a new enquiry. Edits after a mail
    /// hand-off are accepted but cannot be submitted.
    pub fn update_field(&mut self, field: InquiryField, value: &str) -> FormResult<()> {
        self.inquiry.set(field, value)?;
        if self.state == FormState::EditingCleared {
            self.state = FormState::Editing;
        }
        Ok(())
    }

    /// Validate and, if valid, hand the enquiry to the delivery strategy.
    ///
    /// # Errors
    ///
    /// - `FormError::SubmitDisabled` after a mail hand-off.
    /// - `FormError::Delivery` if the strategy could not start; the entity
    ///   is kept and an inline error is shown.
    ///
    /// A validation failure is not an error: it comes back as
    /// [`SubmitOutcome::Rejected`] with the inline message set.
    pub async fn submit(&mut self) -> FormResult<SubmitOutcome> {
        if self.sending || self.state == FormState::Validating {
            tracing::warn!("Previous submit was abandoned mid-delivery, resetting");
            self.sending = false;
            self.state = FormState::Editing;
        }
        if self.state == FormState::Submitted {
            return Err(FormError::SubmitDisabled("already submitted"));
        }

        self.state = FormState::Validating;
        self.error = None;
        self.error_field = None;
        self.last_receipt = None;

        let validated = match self.inquiry.validate() {
            Ok(validated) => validated,
            Err(e) => {
                tracing::debug!(field = %e.field(), "Enquiry rejected by validation");
                self.state = FormState::Editing;
                self.error = Some(e.to_string());
                self.error_field = Some(e.field());
                return Ok(SubmitOutcome::Rejected(e));
            }
        };

        self.sending = true;
        let delivery = self.delivery.clone();
        let result = delivery.deliver(&validated).await;
        self.sending = false;

        match result {
            Ok(receipt) => {
                self.state = match receipt.strategy {
                    DeliveryStrategy::Relay => {
                        self.inquiry = ContactInquiry::default();
                        FormState::EditingCleared
                    }
                    DeliveryStrategy::Mail => FormState::Submitted,
                };
                self.last_receipt = Some(receipt.clone());
                Ok(SubmitOutcome::Delivered(receipt))
            }
            Err(e) => {
                tracing::error!("Submit error: {}", e);
                self.state = FormState::Editing;
                self.error = Some(SUBMIT_FAILED_MESSAGE.to_string());
                Err(FormError::Delivery(e))
            }
        }
    }

    /// Throw everything away, as a full page reload would.
    pub fn reload(&mut self) {
        *self = Self::new(self.delivery.clone());
    }

    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            state: self.state,
            strategy: self.delivery.strategy(),
            fields: self.inquiry.clone(),
            error: self.error.clone(),
            error_field: self.error_field,
            can_submit: self.can_submit(),
            button_label: self.button_label(),
            success_message: self.last_receipt.as_ref().map(|r| r.message.clone()),
        }
    }
}
