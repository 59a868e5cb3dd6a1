use serde::{Deserialize, Serialize};

/// Server-side tools a text request may enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelTool {
    /// Web search grounding; the response carries citations.
    GoogleSearch,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextRequest {
    pub model: String,
    pub prompt: String,
    pub tools: Vec<ModelTool>,
    pub temperature: f64,
}

impl TextRequest {
    /// Single-turn request with search grounding enabled.
    pub fn grounded(model: impl Into<String>, prompt: impl Into<String>, temperature: f64) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            tools: vec![ModelTool::GoogleSearch],
            temperature,
        }
    }

    pub fn uses_search(&self) -> bool {
        self.tools.contains(&ModelTool::GoogleSearch)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    pub uri: String,
    pub title: String,
}

/// Citation attached by the model's search tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub web: WebSource,
}

impl GroundingSource {
    pub fn web(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            web: WebSource {
                uri: uri.into(),
                title: title.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextResponse {
    pub text: String,
    /// In the order the provider returned them; not deduplicated.
    pub grounding_sources: Vec<GroundingSource>,
}

impl TextResponse {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            grounding_sources: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub number_of_images: u32,
    pub output_mime_type: String,
    pub aspect_ratio: String,
}

impl ImageRequest {
    /// One 16:9 JPEG.
    pub fn single_jpeg(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            number_of_images: 1,
            output_mime_type: "image/jpeg".into(),
            aspect_ratio: "16:9".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Base64-encoded image payload as returned by the provider.
    pub image_bytes: String,
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageResponse {
    pub generated_images: Vec<GeneratedImage>,
    /// Safety-filter reason when the provider withheld an image.
    pub filtered_reason: Option<String>,
}
