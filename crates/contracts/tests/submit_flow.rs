use std::cell::RefCell;

use async_trait::async_trait;
use contracts::usecases::u601_generate_keys::{
    FormField, FormState, HttpReply, KeyService, KeyTransport, StatusLine, SubmitOutcome,
    TransportError, ValidationError,
};
use serde_json::{json, Value};

/// Records every request and answers with a canned reply
struct MockEndpoint {
    reply: Result<HttpReply, TransportError>,
    calls: RefCell<Vec<(String, Value)>>,
}

impl MockEndpoint {
    fn answering(status: u16, body: &str) -> Self {
        Self {
            reply: Ok(HttpReply {
                status,
                body: body.to_string(),
            }),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn failing(error: TransportError) -> Self {
        Self {
            reply: Err(error),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

#[async_trait(?Send)]
impl KeyTransport for MockEndpoint {
    async fn post_json(&self, url: &str, body: String) -> Result<HttpReply, TransportError> {
        let body: Value = serde_json::from_str(&body).expect("request body is JSON");
        self.calls.borrow_mut().push((url.to_string(), body));
        self.reply.clone()
    }
}

fn single_key_form() -> FormState {
    let mut form = FormState::default();
    form.set_text(FormField::Type, "single");
    form.set_text(FormField::Quantity, "3");
    form.set_checked(FormField::Package(3652), true);
    form.set_text(FormField::Duration, "30");
    form.set_text(FormField::Unit, "days");
    form.set_checked(FormField::IsCleanable, false);
    form
}

#[tokio::test]
async fn test_keys_from_data_array_are_rendered() {
    let endpoint = MockEndpoint::answering(200, r#"{"data": ["authtool-ABC", "authtool-XYZ"]}"#);
    let service = KeyService::new(endpoint);

    let outcome = service.submit(true, &single_key_form()).await;

    assert_eq!(outcome.keys(), ["authtool-ABC", "authtool-XYZ"]);
    assert_eq!(outcome.status_line(), StatusLine::success("Key(s) created: 2"));
    assert!(outcome.rendered().unwrap().contains("authtool-XYZ"));

    let calls = service.transport().calls.borrow();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, "/api/key");
    assert_eq!(
        calls[0].1,
        json!({
            "type": "single",
            "quantity": 3,
            "packageIds": [3652],
            "duration": 30,
            "unit": "days",
            "isCleanable": false
        })
    );
}

#[tokio::test]
async fn test_empty_package_selection_sends_nothing() {
    let service = KeyService::new(MockEndpoint::answering(200, "{}"));
    let mut form = single_key_form();
    form.set_checked(FormField::Package(3652), false);
    form.set_text(FormField::PackageExtra, "abc, ");

    let outcome = service.submit(true, &form).await;

    assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::NoPackages));
    assert_eq!(
        outcome.status_line(),
        StatusLine::failure("Select at least 1 package")
    );
    assert_eq!(service.transport().call_count(), 0);
}

#[tokio::test]
async fn test_locked_gate_sends_nothing() {
    let service = KeyService::new(MockEndpoint::answering(200, "{}"));

    let outcome = service.submit(false, &single_key_form()).await;

    assert_eq!(outcome, SubmitOutcome::Locked);
    assert_eq!(service.transport().call_count(), 0);
}

#[tokio::test]
async fn test_form_endpoint_overrides_configured_one() {
    let service = KeyService::new(MockEndpoint::answering(200, "[]"))
        .with_default_url("https://keys.example.test/api/key");

    service.submit(true, &single_key_form()).await;
    let mut form = single_key_form();
    form.set_text(FormField::Api, " /custom/key ");
    service.submit(true, &form).await;

    let calls = service.transport().calls.borrow();
    assert_eq!(calls[0].0, "https://keys.example.test/api/key");
    assert_eq!(calls[1].0, "/custom/key");
}

#[tokio::test]
async fn test_plain_text_reply_is_scanned_for_keys() {
    let endpoint = MockEndpoint::answering(200, "ok: authtool-1 authtool-2\n");
    let service = KeyService::new(endpoint);

    let outcome = service.submit(true, &single_key_form()).await;

    assert_eq!(outcome.keys(), ["authtool-1", "authtool-2"]);
    assert!(outcome.rendered().unwrap().contains("\"raw\""));
}

#[tokio::test]
async fn test_http_error_still_renders_body() {
    let endpoint = MockEndpoint::answering(422, r#"{"error": "unknown package"}"#);
    let service = KeyService::new(endpoint);

    let outcome = service.submit(true, &single_key_form()).await;

    assert_eq!(outcome.status_line(), StatusLine::failure("HTTP error 422"));
    assert!(outcome.rendered().unwrap().contains("unknown package"));
    assert!(outcome.keys().is_empty());
}

#[tokio::test]
async fn test_malformed_json_is_a_request_failure() {
    let service = KeyService::new(MockEndpoint::answering(200, "{\"data\": [\"authtool"));

    let outcome = service.submit(true, &single_key_form()).await;

    assert!(matches!(
        outcome,
        SubmitOutcome::Failed(TransportError::MalformedJson(_))
    ));
    assert_eq!(outcome.status_line(), StatusLine::failure("Request failed"));
}

#[tokio::test]
async fn test_network_failure_reports_error_text() {
    let endpoint = MockEndpoint::failing(TransportError::Network("connection refused".into()));
    let service = KeyService::new(endpoint);

    let outcome = service.submit(true, &single_key_form()).await;

    assert_eq!(
        outcome.rendered().as_deref(),
        Some("Network error: connection refused")
    );
    assert_eq!(outcome.status_line(), StatusLine::failure("Request failed"));
    assert_eq!(service.transport().call_count(), 1);
}

#[tokio::test]
async fn test_multi_with_single_activation_is_rejected() {
    let service = KeyService::new(MockEndpoint::answering(200, "{}"));
    let mut form = single_key_form();
    form.set_text(FormField::Type, "multi");
    form.set_text(FormField::ActivateCount, "1");

    let outcome = service.submit(true, &form).await;

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected(ValidationError::ActivateCountTooLow)
    );
    assert_eq!(service.transport().call_count(), 0);
}
