use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use uxaudit::audit::{AuditSession, GroundingSource, WorkflowState};
use uxaudit::error::{AuditError, ExtractError};

use super::gemini_stub::{
    TEST_KEY, TEXT_PATH, auditor, error_body, fenced, report_json, text_body,
};

#[tokio::test]
async fn fenced_report_with_grounding_yields_audit_data() {
    let server = MockServer::start().await;
    let reply = format!("Here you go!\n{}", fenced(&report_json(78)));

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(header("x-goog-api-key", TEST_KEY))
        .and(body_partial_json(json!({
            "tools": [{"googleSearch": {}}],
            "generationConfig": {"temperature": 0.2}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body(
            &reply,
            &[
                ("https://pagespeed.web.dev/analysis", "PageSpeed Insights"),
                ("https://example.com", "Example Domain"),
            ],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let data = auditor(&server)
        .perform_ui_audit("https://example.com")
        .await
        .unwrap();

    assert_eq!(data.audit.sections.len(), 5);
    assert_eq!(data.audit.overall_score, 78);
    assert_eq!(
        data.sources,
        vec![
            GroundingSource::web("https://pagespeed.web.dev/analysis", "PageSpeed Insights"),
            GroundingSource::web("https://example.com", "Example Domain"),
        ]
    );
    server.verify().await;
}

#[tokio::test]
async fn prompt_carries_target_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_body(&report_json(50).to_string(), &[])),
        )
        .mount(&server)
        .await;

    let data = auditor(&server)
        .perform_ui_audit("https://shop.example/checkout")
        .await
        .unwrap();
    assert!(data.sources.is_empty());

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("https://shop.example/checkout"));
    assert_eq!(body["contents"][0]["role"], "user");
}

#[tokio::test]
async fn server_error_is_retried_then_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(
            ResponseTemplate::new(503)
                .set_body_json(error_body(503, "UNAVAILABLE", "The model is overloaded.")),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_body(&fenced(&report_json(64)), &[])),
        )
        .mount(&server)
        .await;

    let data = auditor(&server)
        .perform_ui_audit("https://example.com")
        .await
        .unwrap();

    assert_eq!(data.audit.overall_score, 64);
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn persistent_server_error_exhausts_retries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(error_body(500, "INTERNAL", "boom")),
        )
        .expect(4)
        .mount(&server)
        .await;

    let err = auditor(&server)
        .perform_ui_audit("https://example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::Request(ref e) if e.status() == Some(500)));
    assert!(err.to_string().starts_with("request failed"));
    server.verify().await;
}

#[tokio::test]
async fn client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_body(
            400,
            "INVALID_ARGUMENT",
            "Request contains an invalid argument.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let err = auditor(&server)
        .perform_ui_audit("https://example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::Request(ref e) if e.status() == Some(400)));
    assert!(err.to_string().contains("invalid argument"));
    server.verify().await;
}

#[tokio::test]
async fn prose_only_reply_is_malformed_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body(
            "I'm unable to access that website right now.",
            &[],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let err = auditor(&server)
        .perform_ui_audit("https://example.com")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AuditError::MalformedResponse(ExtractError::NoJsonObject)
    ));
    server.verify().await;
}

#[tokio::test]
async fn blank_reply_is_malformed_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("   ", &[])))
        .expect(1)
        .mount(&server)
        .await;

    let err = auditor(&server)
        .perform_ui_audit("https://example.com")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AuditError::MalformedResponse(ExtractError::NoJsonObject)
    ));
    assert!(err.to_string().starts_with("failed to parse response"));
    server.verify().await;
}

#[tokio::test]
async fn missing_candidates_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .expect(1)
        .mount(&server)
        .await;

    let err = auditor(&server)
        .perform_ui_audit("https://example.com")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AuditError::MalformedResponse(ExtractError::NoJsonObject)
    ));
    server.verify().await;
}

#[tokio::test]
async fn out_of_range_score_is_rejected() {
    let server = MockServer::start().await;
    let mut report = report_json(70);
    report["sections"][1]["score"] = json!(12);

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body(&report.to_string(), &[])))
        .mount(&server)
        .await;

    let err = auditor(&server)
        .perform_ui_audit("https://example.com")
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AuditError::MalformedResponse(ExtractError::InvalidReport(_))
    ));
}

#[tokio::test]
async fn blocked_prompt_is_content_blocked() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [],
            "promptFeedback": {"blockReason": "SAFETY"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = auditor(&server)
        .perform_ui_audit("https://example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::ContentBlocked(ref reason) if reason.contains("SAFETY")));
}

#[tokio::test]
async fn concurrent_audits_do_not_interfere() {
    let server = MockServer::start().await;

    for (needle, overall) in [("https://a.example", 91), ("https://b.example", 33)] {
        Mock::given(method("POST"))
            .and(path(TEXT_PATH))
            .and(wiremock::matchers::body_string_contains(needle))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(text_body(&fenced(&report_json(overall)), &[(needle, needle)])),
            )
            .expect(1)
            .mount(&server)
            .await;
    }

    let auditor = auditor(&server);
    let (a, b) = tokio::join!(
        auditor.perform_ui_audit("https://a.example"),
        auditor.perform_ui_audit("https://b.example"),
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.audit.overall_score, 91);
    assert_eq!(a.sources[0].web.uri, "https://a.example");
    assert_eq!(b.audit.overall_score, 33);
    assert_eq!(b.sources[0].web.uri, "https://b.example");
    server.verify().await;
}

#[tokio::test]
async fn session_publishes_final_state() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_body(&fenced(&report_json(80)), &[])),
        )
        .mount(&server)
        .await;

    let session = AuditSession::new(auditor(&server));
    let result = session.run("https://example.com").await.unwrap().unwrap();

    assert!(matches!(session.state().as_ref(), WorkflowState::Succeeded(data) if *data == result));
    assert!(!session.is_busy());
}
