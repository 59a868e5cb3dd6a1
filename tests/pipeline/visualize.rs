use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use uxaudit::audit::{VisualizationStatus, VisualizationTask};
use uxaudit::error::AuditError;

use super::gemini_stub::{
    IMAGE_PATH, TEST_KEY, TEXT_PATH, error_body, image_body, text_body, visualizer,
};

const STYLE: &str = "Minimal, white background, rounded blue buttons, Inter typeface.";

async fn mount_style(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(body_partial_json(json!({"generationConfig": {"temperature": 0.1}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body(STYLE, &[])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn style_then_image_writes_single_jpeg_request() {
    let server = MockServer::start().await;
    mount_style(&server).await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(header("x-goog-api-key", TEST_KEY))
        .and(body_partial_json(json!({
            "parameters": {
                "sampleCount": 1,
                "aspectRatio": "16:9",
                "outputOptions": {"mimeType": "image/jpeg"}
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_body("/9j/4AAQ")))
        .expect(1)
        .mount(&server)
        .await;

    let example = visualizer(&server)
        .visualize("https://example.com", "Give the signup button more contrast")
        .await
        .unwrap();

    assert_eq!(example.image_base64, "/9j/4AAQ");
    assert_eq!(example.mime_type, "image/jpeg");
    assert_eq!(example.decode().unwrap()[..2], [0xFF, 0xD8]);

    let received = server.received_requests().await.unwrap();
    let image_request = received
        .iter()
        .find(|r| r.url.path() == IMAGE_PATH)
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&image_request.body).unwrap();
    let prompt = body["instances"][0]["prompt"].as_str().unwrap();
    assert!(prompt.contains(STYLE));
    assert!(prompt.contains("Give the signup button more contrast"));
    server.verify().await;
}

#[tokio::test]
async fn zero_images_is_generation_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"predictions": []})))
        .expect(1)
        .mount(&server)
        .await;

    let err = visualizer(&server)
        .generate_visual_example("Tighten the header", STYLE)
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::GenerationFailed(_)));
    assert!(err.to_string().starts_with("generation failed"));
    server.verify().await;
}

#[tokio::test]
async fn empty_body_is_generation_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let err = visualizer(&server)
        .generate_visual_example("Tighten the header", STYLE)
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::GenerationFailed(_)));
}

#[tokio::test]
async fn rai_filtered_prediction_is_content_blocked() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "predictions": [{"raiFilteredReason": "The image was filtered by safety settings."}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = visualizer(&server)
        .generate_visual_example("Tighten the header", STYLE)
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::ContentBlocked(ref reason) if reason.contains("safety")));
    assert!(
        err.to_string()
            .starts_with("generation blocked by content policy")
    );
}

#[tokio::test]
async fn responsible_ai_rejection_is_content_blocked_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_body(
            400,
            "INVALID_ARGUMENT",
            "Image generation failed with the following error: The prompt could not be submitted. \
             This prompt contains sensitive words that violate Google's Responsible AI practices.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let err = visualizer(&server)
        .generate_visual_example("Tighten the header", STYLE)
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::ContentBlocked(_)));
    server.verify().await;
}

#[tokio::test]
async fn image_server_error_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_json(error_body(500, "INTERNAL", "oops")))
        .up_to_n_times(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_body("aGVsbG8=")))
        .mount(&server)
        .await;

    let example = visualizer(&server)
        .generate_visual_example("Tighten the header", STYLE)
        .await
        .unwrap();

    assert_eq!(example.decode().unwrap(), b"hello");
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn style_failure_skips_image_stage() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(error_body(
            403,
            "PERMISSION_DENIED",
            "API key not valid.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_body("aGVsbG8=")))
        .expect(0)
        .mount(&server)
        .await;

    let task = VisualizationTask::new("Tighten the header");
    let err = task
        .run(&visualizer(&server), "https://example.com")
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::Request(ref e) if e.status() == Some(403)));
    assert!(matches!(task.status().as_ref(), VisualizationStatus::Failed(_)));
    server.verify().await;
}

#[tokio::test]
async fn blank_style_description_skips_image_stage() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_body("   ", &[])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_body("aGVsbG8=")))
        .expect(0)
        .mount(&server)
        .await;

    let err = visualizer(&server)
        .visualize("https://example.com", "Tighten the header")
        .await
        .unwrap_err();

    assert!(matches!(err, AuditError::GenerationFailed(_)));
    assert!(err.to_string().starts_with("generation failed"));
    server.verify().await;
}
