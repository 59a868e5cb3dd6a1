#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::{Value, json};
use strum::IntoEnumIterator;
use wiremock::MockServer;

use uxaudit::audit::{
    AuditCategory, AuditSettings, Auditor, RetryPolicy, VisualizationSettings, Visualizer,
};
use uxaudit::llm::{GeminiClient, ModelClient};

pub const TEST_KEY: &str = "test-key";
pub const TEXT_PATH: &str = "/models/gemini-2.5-flash:generateContent";
pub const IMAGE_PATH: &str = "/models/imagen-3.0-generate-002:predict";

/// Fast retries so backoff does not slow the suite down.
pub fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(3, Duration::from_millis(1))
}

pub fn client(server: &MockServer) -> Arc<dyn ModelClient> {
    Arc::new(GeminiClient::with_base_url(Some(TEST_KEY), &server.uri()))
}

pub fn auditor(server: &MockServer) -> Auditor {
    Auditor::new(client(server), AuditSettings::default(), fast_retry())
}

pub fn visualizer(server: &MockServer) -> Visualizer {
    Visualizer::new(
        client(server),
        VisualizationSettings::default(),
        fast_retry(),
    )
}

/// Five well-formed sections in prompt order.
pub fn report_json(overall: u32) -> Value {
    let sections: Vec<Value> = AuditCategory::iter()
        .map(|category| {
            json!({
                "title": category.title(),
                "explanation": "Why this matters.",
                "score": 7,
                "positivePoints": ["Clear navigation"],
                "areasForImprovement": [
                    {"point": format!("Improve {category}"), "isVisualizable": true}
                ]
            })
        })
        .collect();
    json!({
        "overallScore": overall,
        "summary": "Good overall, slow on mobile.",
        "sections": sections,
    })
}

/// A `generateContent` body carrying `text` and optional grounding chunks.
pub fn text_body(text: &str, chunks: &[(&str, &str)]) -> Value {
    let grounding: Vec<Value> = chunks
        .iter()
        .map(|(uri, title)| json!({"web": {"uri": uri, "title": title}}))
        .collect();
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP",
            "groundingMetadata": {"groundingChunks": grounding}
        }]
    })
}

pub fn fenced(value: &Value) -> String {
    format!("```json\n{}\n```", serde_json::to_string_pretty(value).unwrap())
}

pub fn error_body(code: u16, status: &str, message: &str) -> Value {
    json!({"error": {"code": code, "message": message, "status": status}})
}

pub fn image_body(b64: &str) -> Value {
    json!({"predictions": [{"bytesBase64Encoded": b64, "mimeType": "image/jpeg"}]})
}
