use super::types::{ImageRequest, ImageResponse, TextRequest, TextResponse};
use crate::error::LlmError;
use std::future::Future;
use std::pin::Pin;

pub type ModelFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, LlmError>> + Send + 'a>>;

/// Model-invocation capability handed to the auditor and visualizer.
///
/// Implementations make exactly one network call per method invocation;
/// retries are layered on top by [`crate::audit::retry::RetryPolicy`].
pub trait ModelClient: Send + Sync {
    /// Provider identifier (e.g. "gemini").
    fn name(&self) -> &str;

    fn generate_content<'a>(&'a self, request: &'a TextRequest) -> ModelFuture<'a, TextResponse>;

    fn generate_images<'a>(&'a self, request: &'a ImageRequest) -> ModelFuture<'a, ImageResponse>;
}
