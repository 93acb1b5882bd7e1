//! Form lifecycle tests for both delivery strategies.

mod mocks;

use contact_intake::delivery::DeliveryDetail;
use contact_intake::domain::InquiryField;
use contact_intake::error::{DeliveryError, FormError};
use contact_intake::form::SUBMIT_FAILED_MESSAGE;
use contact_intake::{
    Config, Delivery, FormRelay, FormState, InquiryForm, MailHandoff, Metrics, SubmitOutcome,
    SUCCESS_MESSAGE,
};
use mocks::MockTransport;
use std::sync::Arc;
use std::time::Duration;

fn relay_form(transport: MockTransport) -> (InquiryForm, Arc<FormRelay>, Metrics) {
    let metrics = Metrics::new();
    let relay = Arc::new(
        FormRelay::new(&Config::default(), Arc::new(transport), metrics.clone())
            .with_grace_period(Duration::from_millis(100)),
    );
    let form = InquiryForm::new(relay.clone() as Arc<dyn Delivery>);
    (form, relay, metrics)
}

fn mail_form() -> InquiryForm {
    InquiryForm::new(Arc::new(MailHandoff::new(&Config::default(), Metrics::new())))
}

fn fill_jane(form: &mut InquiryForm, preferred_time: &str, message: &str) {
    form.update_field(InquiryField::Name, "Jane Tan").unwrap();
    form.update_field(InquiryField::Phone, "60123456789").unwrap();
    form.update_field(InquiryField::Email, "jane@example.com").unwrap();
    form.update_field(InquiryField::City, "Semenyih").unwrap();
    form.update_field(InquiryField::PreferredTime, preferred_time)
        .unwrap();
    form.update_field(InquiryField::Message, message).unwrap();
}

fn decoded_body(link: &str) -> String {
    let query = link.split_once('?').expect("link has a query").1;
    let body = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("body="))
        .expect("link has a body");
    urlencoding::decode(body).unwrap().into_owned()
}

#[tokio::test]
async fn test_relay_submit_sends_six_mapped_fields() {
    let transport = MockTransport::new();
    let (mut form, _relay, _) = relay_form(transport.clone());
    fill_jane(&mut form, "", "");

    let outcome = form.submit().await.unwrap();
    let receipt = match outcome {
        SubmitOutcome::Delivered(receipt) => receipt,
        other => panic!("expected delivery, got {:?}", other),
    };
    assert_eq!(receipt.message, SUCCESS_MESSAGE);

    let fields = receipt.relay_fields().unwrap();
    assert_eq!(fields.len(), 6);
    let lookup = |id: &str| {
        fields
            .iter()
            .find(|(k, _)| k == id)
            .map(|(_, v)| v.as_str())
    };
    assert_eq!(lookup("entry.1623702764"), Some("Jane Tan"));
    assert_eq!(lookup("entry.307574555"), Some("60123456789"));
    assert_eq!(lookup("entry.226559707"), Some("jane@example.com"));
    assert_eq!(lookup("entry.706402315"), Some("Semenyih"));
    assert_eq!(lookup("entry.37580560"), Some(""));
    assert_eq!(lookup("entry.1272408800"), Some(""));

    assert!(transport.wait_for(1, Duration::from_secs(2)).await);
    let sent = &transport.submissions()[0];
    assert_eq!(sent.action, contact_intake::config::DEFAULT_FORM_ACTION);
    assert_eq!(&sent.fields, fields);
}

#[tokio::test]
async fn test_relay_submit_clears_form_and_allows_resubmission() {
    let transport = MockTransport::new();
    let (mut form, _relay, _) = relay_form(transport.clone());
    fill_jane(&mut form, "Evening (4pm–8pm)", "Type B please");

    form.submit().await.unwrap();
    assert_eq!(form.state(), FormState::EditingCleared);
    assert!(form.inquiry().is_blank());
    assert!(form.can_submit());
    assert_eq!(
        form.snapshot().success_message.as_deref(),
        Some(SUCCESS_MESSAGE)
    );

    form.update_field(InquiryField::Name, "Ahmad").unwrap();
    assert_eq!(form.state(), FormState::Editing);

    fill_jane(&mut form, "", "");
    form.submit().await.unwrap();
    assert!(transport.wait_for(2, Duration::from_secs(2)).await);
}

#[tokio::test]
async fn test_relay_success_is_optimistic_even_when_transport_fails() {
    let transport = MockTransport::new().failing(503);
    let (mut form, relay, metrics) = relay_form(transport.clone());
    fill_jane(&mut form, "", "");

    let outcome = form.submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Delivered(_)));
    assert_eq!(form.error(), None);

    assert!(transport.wait_for(1, Duration::from_secs(2)).await);
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert_eq!(metrics.relay_transport_errors_total(), 1);
    assert!(relay.channels().is_empty());
}

#[tokio::test]
async fn test_relay_cleanup_does_not_wait_for_slow_send() {
    let transport = MockTransport::new().with_delay(Duration::from_millis(600));
    let (mut form, relay, metrics) = relay_form(transport.clone());
    fill_jane(&mut form, "", "");

    let outcome = form.submit().await.unwrap();
    let channel = match outcome {
        SubmitOutcome::Delivered(receipt) => match receipt.detail {
            DeliveryDetail::Relay(dispatch) => dispatch.channel,
            other => panic!("expected relay detail, got {:?}", other),
        },
        other => panic!("expected delivery, got {:?}", other),
    };
    assert!(relay.channels().is_open(&channel));

    // Grace period is 100ms; the send takes 600ms.
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(!relay.channels().is_open(&channel));
    assert_eq!(metrics.relay_channels_closed_total(), 1);
    assert_eq!(transport.submission_count(), 0);

    assert!(transport.wait_for(1, Duration::from_secs(2)).await);
}

#[tokio::test]
async fn test_mail_body_has_four_lines_without_optional_fields() {
    let mut form = mail_form();
    fill_jane(&mut form, "", "");

    let outcome = form.submit().await.unwrap();
    let receipt = match outcome {
        SubmitOutcome::Delivered(receipt) => receipt,
        other => panic!("expected delivery, got {:?}", other),
    };

    let link = receipt.mail_link().unwrap();
    assert!(link.starts_with("mailto:sales@mlegasi.com.my?subject="));

    let body = decoded_body(link);
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Name: Jane Tan",
            "Phone: 60123456789",
            "Email: jane@example.com",
            "City: Semenyih",
        ]
    );
    assert!(!body.contains("Preferred time"));
    assert!(!body.contains("Message"));
}

#[tokio::test]
async fn test_mail_body_has_six_lines_with_optional_fields() {
    let mut form = mail_form();
    fill_jane(&mut form, "Morning (9am–12pm)", "Interested in Type A");

    let outcome = form.submit().await.unwrap();
    let link = match outcome {
        SubmitOutcome::Delivered(receipt) => receipt.mail_link().unwrap().to_string(),
        other => panic!("expected delivery, got {:?}", other),
    };

    let body = decoded_body(&link);
    let lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[4], "Preferred time: Morning (9am–12pm)");
    assert_eq!(lines[5], "Message: Interested in Type A");
}

#[tokio::test]
async fn test_mail_submit_disables_control_for_page_lifetime() {
    let mut form = mail_form();
    fill_jane(&mut form, "", "");
    form.submit().await.unwrap();

    assert_eq!(form.state(), FormState::Submitted);
    for _ in 0..3 {
        assert!(!form.can_submit());
        assert!(matches!(
            form.submit().await,
            Err(FormError::SubmitDisabled(_))
        ));
    }

    form.reload();
    assert!(form.can_submit());
    assert!(form.inquiry().is_blank());
}

#[tokio::test]
async fn test_missing_fields_report_first_in_order() {
    let cases = [
        (InquiryField::Name, "Please enter your full name."),
        (
            InquiryField::Phone,
            "Please enter a valid phone number (digits only).",
        ),
        (InquiryField::Email, "Please enter a valid email address."),
        (
            InquiryField::City,
            "Please enter the city you are currently staying in.",
        ),
    ];

    for (missing, message) in cases {
        let mut form = mail_form();
        fill_jane(&mut form, "", "");
        form.update_field(missing, "").unwrap();

        match form.submit().await.unwrap() {
            SubmitOutcome::Rejected(e) => assert_eq!(e.field(), missing),
            other => panic!("expected rejection for {}, got {:?}", missing, other),
        }
        assert_eq!(form.error(), Some(message));
        assert_eq!(form.state(), FormState::Editing);
    }
}

#[test]
fn test_relay_that_cannot_start_keeps_enquiry_and_shows_error() {
    let transport = MockTransport::new();
    let (mut form, relay, metrics) = relay_form(transport.clone());
    fill_jane(&mut form, "", "Type A");

    // No tokio runtime here, so the send cannot be spawned.
    let result = futures::executor::block_on(form.submit());
    assert!(matches!(
        result,
        Err(FormError::Delivery(DeliveryError::Initiate(_)))
    ));

    assert_eq!(form.state(), FormState::Editing);
    assert_eq!(form.error(), Some(SUBMIT_FAILED_MESSAGE));
    assert_eq!(form.inquiry().name, "Jane Tan");
    assert_eq!(form.inquiry().message, "Type A");
    assert!(form.can_submit());
    assert!(form.last_receipt().is_none());

    assert!(relay.channels().is_empty());
    assert_eq!(metrics.relay_dispatched_total(), 0);
    assert_eq!(transport.submission_count(), 0);
}
