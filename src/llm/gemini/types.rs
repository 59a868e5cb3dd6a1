use serde::{Deserialize, Serialize};

// ── generateContent ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(super) struct GenerateContentRequest {
    pub(super) contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub(super) tools: Vec<GeminiTool>,
    #[serde(rename = "generationConfig")]
    pub(super) generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(super) struct Content {
    pub(super) role: String,
    pub(super) parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
pub(super) struct Part {
    pub(super) text: String,
}

/// Serializes as `{"googleSearch":{}}`.
#[derive(Debug, Serialize)]
pub(super) struct GeminiTool {
    #[serde(rename = "googleSearch")]
    pub(super) google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
pub(super) struct GoogleSearch {}

#[derive(Debug, Serialize)]
pub(super) struct GenerationConfig {
    pub(super) temperature: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub(super) candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    pub(super) prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct Candidate {
    #[serde(default)]
    pub(super) content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    pub(super) finish_reason: Option<String>,
    #[serde(rename = "groundingMetadata")]
    pub(super) grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CandidateContent {
    #[serde(default)]
    pub(super) parts: Vec<ResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ResponsePart {
    pub(super) text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PromptFeedback {
    #[serde(rename = "blockReason")]
    pub(super) block_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct GroundingMetadata {
    #[serde(rename = "groundingChunks", default)]
    pub(super) grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct GroundingChunk {
    pub(super) web: Option<WebChunk>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct WebChunk {
    pub(super) uri: Option<String>,
    pub(super) title: Option<String>,
}

// ── predict (Imagen) ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub(super) struct PredictRequest {
    pub(super) instances: Vec<PredictInstance>,
    pub(super) parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
pub(super) struct PredictInstance {
    pub(super) prompt: String,
}

#[derive(Debug, Serialize)]
pub(super) struct PredictParameters {
    #[serde(rename = "sampleCount")]
    pub(super) sample_count: u32,
    #[serde(rename = "aspectRatio")]
    pub(super) aspect_ratio: String,
    #[serde(rename = "outputOptions")]
    pub(super) output_options: OutputOptions,
}

#[derive(Debug, Serialize)]
pub(super) struct OutputOptions {
    #[serde(rename = "mimeType")]
    pub(super) mime_type: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct PredictResponse {
    #[serde(default)]
    pub(super) predictions: Vec<Prediction>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct Prediction {
    #[serde(rename = "bytesBase64Encoded")]
    pub(super) bytes_base64_encoded: Option<String>,
    #[serde(rename = "mimeType")]
    pub(super) mime_type: Option<String>,
    #[serde(rename = "raiFilteredReason")]
    pub(super) rai_filtered_reason: Option<String>,
}

// ── errors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelope {
    pub(super) error: ApiError,
}

#[derive(Debug, Deserialize)]
pub(super) struct ApiError {
    #[serde(default)]
    pub(super) message: String,
    pub(super) status: Option<String>,
}
