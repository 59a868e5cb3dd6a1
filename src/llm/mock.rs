//! Scripted `ModelClient` for unit tests.

use super::traits::{ModelClient, ModelFuture};
use super::types::{ImageRequest, ImageResponse, TextRequest, TextResponse};
use crate::error::LlmError;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

type TextResponder = Box<dyn Fn(usize, &TextRequest) -> Result<TextResponse, LlmError> + Send + Sync>;
type ImageResponder =
    Box<dyn Fn(usize, &ImageRequest) -> Result<ImageResponse, LlmError> + Send + Sync>;

/// Responders receive the 1-based call number and the request.
pub(crate) struct MockModelClient {
    text: TextResponder,
    image: ImageResponder,
    text_calls: AtomicUsize,
    image_calls: AtomicUsize,
    pub(crate) text_requests: Mutex<Vec<TextRequest>>,
    pub(crate) image_requests: Mutex<Vec<ImageRequest>>,
}

impl MockModelClient {
    pub(crate) fn new() -> Self {
        Self {
            text: Box::new(|_, _| Ok(TextResponse::text_only("ok"))),
            image: Box::new(|_, _| Ok(ImageResponse::default())),
            text_calls: AtomicUsize::new(0),
            image_calls: AtomicUsize::new(0),
            text_requests: Mutex::new(Vec::new()),
            image_requests: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_text(
        mut self,
        responder: impl Fn(usize, &TextRequest) -> Result<TextResponse, LlmError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.text = Box::new(responder);
        self
    }

    pub(crate) fn with_image(
        mut self,
        responder: impl Fn(usize, &ImageRequest) -> Result<ImageResponse, LlmError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.image = Box::new(responder);
        self
    }

    pub(crate) fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn image_calls(&self) -> usize {
        self.image_calls.load(Ordering::SeqCst)
    }
}

pub(crate) fn status_error(status: u16, message: &str) -> LlmError {
    LlmError::Status {
        provider: "mock".into(),
        status,
        code: None,
        message: message.into(),
    }
}

impl ModelClient for MockModelClient {
    fn name(&self) -> &str {
        "mock"
    }

    fn generate_content<'a>(&'a self, request: &'a TextRequest) -> ModelFuture<'a, TextResponse> {
        Box::pin(async move {
            let call = self.text_calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.text_requests.lock().unwrap().push(request.clone());
            tokio::task::yield_now().await;
            (self.text)(call, request)
        })
    }

    fn generate_images<'a>(&'a self, request: &'a ImageRequest) -> ModelFuture<'a, ImageResponse> {
        Box::pin(async move {
            let call = self.image_calls.fetch_add(1, Ordering::SeqCst) + 1;
            self.image_requests.lock().unwrap().push(request.clone());
            tokio::task::yield_now().await;
            (self.image)(call, request)
        })
    }
}
