pub mod gemini;
pub mod http_client;
#[cfg(test)]
pub(crate) mod mock;
pub mod scrub;
pub mod traits;
pub mod types;

pub use gemini::GeminiClient;
pub use http_client::{build_provider_client, build_provider_client_with_timeout};
pub use scrub::{sanitize_api_error, scrub_secret_patterns};
pub use traits::{ModelClient, ModelFuture};
pub use types::{
    GeneratedImage, GroundingSource, ImageRequest, ImageResponse, ModelTool, TextRequest,
    TextResponse, WebSource,
};
