use thiserror::Error;

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Classified failure of an audit or visualization request.
///
/// Each variant is one error class callers can act on. Only
/// [`AuditError::Request`] carrying a server-side status is ever retried;
/// see [`crate::audit::retry::Retryable`].
#[derive(Debug, Error)]
pub enum AuditError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── Transport / provider ─────────────────────────────────────────────
    #[error("request failed: {0}")]
    Request(LlmError),

    // ── Response shape ───────────────────────────────────────────────────
    #[error("failed to parse response: {0}")]
    MalformedResponse(#[from] ExtractError),

    // ── Image generation ─────────────────────────────────────────────────
    #[error("generation failed: {0}")]
    GenerationFailed(String),

    #[error("generation blocked by content policy: {0}")]
    ContentBlocked(String),
}

impl From<LlmError> for AuditError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingApiKey { provider } => Self::Config(ConfigError::MissingApiKey {
                provider,
            }),
            LlmError::ContentFiltered { reason, .. } => Self::ContentBlocked(reason),
            other => Self::Request(other),
        }
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "{provider} API key not found; set GEMINI_API_KEY (or API_KEY) or add api_key to config.toml"
    )]
    MissingApiKey { provider: String },

    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API key not configured")]
    MissingApiKey { provider: String },

    /// Non-success HTTP status. `code` is the provider's symbolic status
    /// (e.g. `UNAVAILABLE`) when the error body carried one.
    #[error("{provider} API error ({status}): {message}")]
    Status {
        provider: String,
        status: u16,
        code: Option<String>,
        message: String,
    },

    #[error("{provider} transport error: {message}")]
    Transport { provider: String, message: String },

    #[error("{provider} returned an unreadable body: {message}")]
    Decode { provider: String, message: String },

    #[error("{provider} filtered the output: {reason}")]
    ContentFiltered { provider: String, reason: String },
}

impl LlmError {
    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-side failure class (status ≥ 500).
    pub fn is_server_error(&self) -> bool {
        self.status().is_some_and(|status| status >= 500)
    }
}

// ─── Extraction errors ──────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON object found in the response")]
    NoJsonObject,

    #[error("malformed JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("invalid report: {0}")]
    InvalidReport(String),
}
