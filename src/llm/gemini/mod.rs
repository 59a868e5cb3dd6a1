//! Google Gemini client covering the two endpoints the audit pipeline needs:
//! - `generateContent` for grounded text (audit report, style description)
//! - `predict` on an Imagen model for wireframe images
//!
//! Authentication is a single API key sent in the `x-goog-api-key` header.

use crate::error::LlmError;
use crate::llm::{
    build_provider_client, sanitize_api_error,
    traits::{ModelClient, ModelFuture},
    types::{
        GeneratedImage, GroundingSource, ImageRequest, ImageResponse, ModelTool, TextRequest,
        TextResponse,
    },
};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use zeroize::Zeroizing;

mod types;
use types::{
    Content, ErrorEnvelope, GeminiTool, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, GoogleSearch, OutputOptions, Part, PredictInstance, PredictParameters,
    PredictRequest, PredictResponse,
};

const PROVIDER: &str = "gemini";

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Checked in order when no key is passed in explicitly.
pub const API_KEY_ENV_VARS: [&str; 3] = ["GEMINI_API_KEY", "API_KEY", "GOOGLE_API_KEY"];

pub struct GeminiClient {
    api_key: Option<Zeroizing<String>>,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    /// Create a client against the public Gemini endpoint.
    ///
    /// Key priority: the explicit key, then `GEMINI_API_KEY`, `API_KEY`,
    /// `GOOGLE_API_KEY`. A missing key is not an error here; the first
    /// request fails with [`LlmError::MissingApiKey`].
    pub fn new(api_key: Option<&str>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<&str>, base_url: &str) -> Self {
        Self::with_http_client(api_key, base_url, build_provider_client())
    }

    pub fn with_http_client(api_key: Option<&str>, base_url: &str, client: Client) -> Self {
        Self::with_key_lookup(api_key, base_url, client, |var| std::env::var(var).ok())
    }

    /// Like [`GeminiClient::with_http_client`], but the fallback key variables
    /// are read through `lookup` instead of the process environment.
    pub fn with_key_lookup<F>(
        api_key: Option<&str>,
        base_url: &str,
        client: Client,
        lookup: F,
    ) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let resolved_key = api_key
            .filter(|key| !key.trim().is_empty())
            .map(String::from)
            .or_else(|| {
                API_KEY_ENV_VARS
                    .iter()
                    .filter_map(|var| lookup(var))
                    .find(|key| !key.trim().is_empty())
            });

        Self {
            api_key: resolved_key.map(Zeroizing::new),
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        self.api_key
            .as_deref()
            .map(String::as_str)
            .ok_or_else(|| LlmError::MissingApiKey {
                provider: PROVIDER.to_string(),
            })
    }

    fn model_name(model: &str) -> String {
        if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/{}:{method}", self.base_url, Self::model_name(model))
    }

    fn build_content_request(request: &TextRequest) -> GenerateContentRequest {
        let tools = request
            .tools
            .iter()
            .map(|tool| match tool {
                ModelTool::GoogleSearch => GeminiTool {
                    google_search: GoogleSearch {},
                },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            tools,
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        }
    }

    fn build_predict_request(request: &ImageRequest) -> PredictRequest {
        PredictRequest {
            instances: vec![PredictInstance {
                prompt: request.prompt.clone(),
            }],
            parameters: PredictParameters {
                sample_count: request.number_of_images,
                aspect_ratio: request.aspect_ratio.clone(),
                output_options: OutputOptions {
                    mime_type: request.output_mime_type.clone(),
                },
            },
        }
    }

    async fn post_json<B, R>(&self, url: String, body: &B) -> Result<R, LlmError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let api_key = self.api_key()?;

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;

        let response = Self::ensure_success_status(response).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;

        serde_json::from_slice(&bytes).map_err(|e| LlmError::Decode {
            provider: PROVIDER.to_string(),
            message: e.to_string(),
        })
    }

    async fn ensure_success_status(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, LlmError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
        Err(Self::status_error(status.as_u16(), &body))
    }

    fn status_error(status: u16, body: &str) -> LlmError {
        let (code, message) = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => (envelope.error.status, envelope.error.message),
            Err(_) => (None, body.trim().to_string()),
        };

        LlmError::Status {
            provider: PROVIDER.to_string(),
            status,
            code,
            message: sanitize_api_error(&message),
        }
    }

    fn parse_text_response(result: GenerateContentResponse) -> Result<TextResponse, LlmError> {
        let block_reason = result.prompt_feedback.and_then(|f| f.block_reason);

        let Some(candidate) = result.candidates.into_iter().next() else {
            return match block_reason {
                Some(reason) => Err(LlmError::ContentFiltered {
                    provider: PROVIDER.to_string(),
                    reason,
                }),
                None => Ok(TextResponse::default()),
            };
        };

        let grounding_sources = candidate
            .grounding_metadata
            .map(|metadata| metadata.grounding_chunks)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|chunk| chunk.web)
            .map(|web| {
                GroundingSource::web(
                    web.uri.unwrap_or_default(),
                    web.title.unwrap_or_default(),
                )
            })
            .collect();

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        // Blank text is only an error when the provider signalled a block.
        if text.trim().is_empty() {
            let blocked = block_reason.or_else(|| match candidate.finish_reason.as_deref() {
                Some(reason @ ("SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST")) => {
                    Some(reason.to_string())
                }
                _ => None,
            });
            if let Some(reason) = blocked {
                return Err(LlmError::ContentFiltered {
                    provider: PROVIDER.to_string(),
                    reason,
                });
            }
        }

        Ok(TextResponse {
            text,
            grounding_sources,
        })
    }

    fn parse_image_response(result: PredictResponse) -> ImageResponse {
        let mut response = ImageResponse::default();

        for prediction in result.predictions {
            match prediction.bytes_base64_encoded {
                Some(bytes) if !bytes.is_empty() => {
                    response.generated_images.push(GeneratedImage {
                        image_bytes: bytes,
                        mime_type: prediction.mime_type,
                    });
                }
                _ => {
                    if let Some(reason) = prediction.rai_filtered_reason {
                        response.filtered_reason.get_or_insert(reason);
                    }
                }
            }
        }

        response
    }
}

fn transport_error(err: reqwest::Error) -> LlmError {
    LlmError::Transport {
        provider: PROVIDER.to_string(),
        message: sanitize_api_error(&err.without_url().to_string()),
    }
}

impl ModelClient for GeminiClient {
    fn name(&self) -> &str {
        PROVIDER
    }

    fn generate_content<'a>(&'a self, request: &'a TextRequest) -> ModelFuture<'a, TextResponse> {
        Box::pin(async move {
            tracing::debug!(
                model = request.model.as_str(),
                search = request.uses_search(),
                temperature = request.temperature,
                "Gemini generateContent"
            );
            let body = Self::build_content_request(request);
            let result: GenerateContentResponse = self
                .post_json(self.endpoint(&request.model, "generateContent"), &body)
                .await?;
            Self::parse_text_response(result)
        })
    }

    fn generate_images<'a>(&'a self, request: &'a ImageRequest) -> ModelFuture<'a, ImageResponse> {
        Box::pin(async move {
            tracing::debug!(
                model = request.model.as_str(),
                count = request.number_of_images,
                aspect_ratio = request.aspect_ratio.as_str(),
                "Imagen predict"
            );
            let body = Self::build_predict_request(request);
            let result: PredictResponse = self
                .post_json(self.endpoint(&request.model, "predict"), &body)
                .await?;
            Ok(Self::parse_image_response(result))
        })
    }
}
