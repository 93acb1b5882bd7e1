//! Integration tests for the ureq relay transport using mockito for HTTP mocking.

use contact_intake::error::RelayError;
use contact_intake::models::ContactInquiry;
use contact_intake::{Config, Delivery, FormRelay, Metrics, RelayTransport, UreqTransport};
use mockito::{Matcher, Server};
use std::sync::Arc;
use std::time::Duration;

fn fields() -> Vec<(String, String)> {
    vec![
        ("entry.1623702764".to_string(), "Jane Tan".to_string()),
        ("entry.1272408800".to_string(), "Type A & B?".to_string()),
    ]
}

#[test]
fn test_submit_posts_form_encoded_fields() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/formResponse")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("entry.1623702764".into(), "Jane Tan".into()),
            Matcher::UrlEncoded("entry.1272408800".into(), "Type A & B?".into()),
        ]))
        .with_status(200)
        .with_body("<html>opaque</html>")
        .create();

    let transport = UreqTransport::with_timeout(Duration::from_secs(5));
    let action = format!("{}/formResponse", server.url());
    transport.submit(&action, &fields()).unwrap();

    mock.assert();
}

#[test]
fn test_submit_maps_error_status() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/formResponse")
        .with_status(429)
        .create();

    let transport = UreqTransport::with_timeout(Duration::from_secs(5));
    let action = format!("{}/formResponse", server.url());
    let err = transport.submit(&action, &fields()).unwrap_err();

    mock.assert();
    assert!(matches!(err, RelayError::Status { status: 429 }));
}

#[test]
fn test_submit_connection_failure() {
    let transport = UreqTransport::with_timeout(Duration::from_secs(2));
    let err = transport
        .submit("http://127.0.0.1:1/formResponse", &fields())
        .unwrap_err();

    assert!(matches!(err, RelayError::Transport(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_relay_reaches_endpoint_without_being_awaited() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/formResponse")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("entry.1623702764".into(), "Jane Tan".into()),
            Matcher::UrlEncoded("entry.307574555".into(), "60123456789".into()),
            Matcher::UrlEncoded("entry.226559707".into(), "jane@example.com".into()),
            Matcher::UrlEncoded("entry.706402315".into(), "Semenyih".into()),
            Matcher::UrlEncoded("entry.37580560".into(), "".into()),
            Matcher::UrlEncoded("entry.1272408800".into(), "".into()),
        ]))
        .with_status(200)
        .create_async()
        .await;

    let config = Config {
        relay_form_action: format!("{}/formResponse", server.url()),
        ..Config::default()
    };
    let metrics = Metrics::new();
    let transport = Arc::new(UreqTransport::new(&config)) as Arc<dyn RelayTransport>;
    let relay = FormRelay::new(&config, transport, metrics.clone())
        .with_grace_period(Duration::from_millis(50));

    let inquiry = ContactInquiry {
        name: "Jane Tan".to_string(),
        phone: "60123456789".to_string(),
        email: "jane@example.com".to_string(),
        city: "Semenyih".to_string(),
        ..Default::default()
    }
    .validate()
    .unwrap();

    relay.deliver(&inquiry).await.unwrap();

    let mut matched = false;
    for _ in 0..100 {
        if mock.matched_async().await {
            matched = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(matched, "relay never reached the endpoint");
    assert_eq!(metrics.relay_dispatched_total(), 1);
}
