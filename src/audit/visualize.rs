//! Two-stage visual example workflow.
//!
//! Stage A asks the text model (with search) to describe the site's visual
//! style. Stage B feeds that description and one improvement point to the
//! image model and returns a single monochrome wireframe. Stage B never
//! starts unless stage A produced a description.

use super::prompt::{style_description_prompt, visual_example_prompt};
use super::retry::RetryPolicy;
use super::types::VisualExample;
use crate::config::Config;
use crate::error::{AuditError, LlmError};
use crate::llm::{ImageRequest, ModelClient, TextRequest};
use std::sync::Arc;

pub const DEFAULT_IMAGE_MODEL: &str = "imagen-3.0-generate-002";
pub const DEFAULT_STYLE_TEMPERATURE: f64 = 0.1;

const FALLBACK_MIME_TYPE: &str = "image/jpeg";

#[derive(Debug, Clone, PartialEq)]
pub struct VisualizationSettings {
    pub text_model: String,
    pub image_model: String,
    pub style_temperature: f64,
}

impl Default for VisualizationSettings {
    fn default() -> Self {
        Self {
            text_model: super::orchestrator::DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            style_temperature: DEFAULT_STYLE_TEMPERATURE,
        }
    }
}

impl VisualizationSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            text_model: config.models.text_model.clone(),
            image_model: config.models.image_model.clone(),
            style_temperature: config.models.style_temperature,
        }
    }
}

#[derive(Clone)]
pub struct Visualizer {
    client: Arc<dyn ModelClient>,
    settings: VisualizationSettings,
    retry: RetryPolicy,
}

impl Visualizer {
    pub fn new(
        client: Arc<dyn ModelClient>,
        settings: VisualizationSettings,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            client,
            settings,
            retry,
        }
    }

    /// Stage A. Returns the model's trimmed one-paragraph style description.
    pub async fn website_style_description(&self, url: &str) -> Result<String, AuditError> {
        let request = TextRequest::grounded(
            self.settings.text_model.as_str(),
            style_description_prompt(url),
            self.settings.style_temperature,
        );

        let client = self.client.as_ref();
        let request = &request;
        let response = self
            .retry
            .run("style_description", move || async move {
                client.generate_content(request).await.map_err(AuditError::from)
            })
            .await?;

        let description = response.text.trim();
        if description.is_empty() {
            return Err(AuditError::GenerationFailed(
                "style analysis returned no description".into(),
            ));
        }
        tracing::debug!(url, chars = description.len(), "Style description ready");
        Ok(description.to_string())
    }

    /// Stage B. Exactly one image is requested; an empty result is a
    /// failure, never a placeholder.
    pub async fn generate_visual_example(
        &self,
        improvement: &str,
        style_description: &str,
    ) -> Result<VisualExample, AuditError> {
        let request = ImageRequest::single_jpeg(
            self.settings.image_model.as_str(),
            visual_example_prompt(improvement, style_description),
        );

        let client = self.client.as_ref();
        let request = &request;
        let response = self
            .retry
            .run("visual_example", move || async move {
                client.generate_images(request).await.map_err(classify_image_error)
            })
            .await?;

        let Some(image) = response.generated_images.into_iter().next() else {
            return Err(match response.filtered_reason {
                Some(reason) => AuditError::ContentBlocked(reason),
                None => AuditError::GenerationFailed("image model returned no images".into()),
            });
        };

        Ok(VisualExample {
            image_base64: image.image_bytes,
            mime_type: image
                .mime_type
                .unwrap_or_else(|| FALLBACK_MIME_TYPE.to_string()),
        })
    }

    /// Stage A then stage B for a single improvement point.
    pub async fn visualize(&self, url: &str, improvement: &str) -> Result<VisualExample, AuditError> {
        let style = self.website_style_description(url).await?;
        self.generate_visual_example(improvement, &style).await
    }
}

/// Map an image-call failure, treating provider messages that mention the
/// safety filter as a content block.
fn classify_image_error(err: LlmError) -> AuditError {
    if let LlmError::Status { status, message, .. } = &err
        && *status < 500
        && mentions_content_filter(message)
    {
        return AuditError::ContentBlocked(message.clone());
    }
    AuditError::from(err)
}

fn mentions_content_filter(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("responsible ai") || lower.contains("filtered")
}
