use super::extract::parse_audit_report;
use super::prompt::audit_prompt;
use super::retry::RetryPolicy;
use super::types::AuditData;
use crate::config::Config;
use crate::error::AuditError;
use crate::llm::{ModelClient, TextRequest};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_AUDIT_TEMPERATURE: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct AuditSettings {
    pub model: String,
    pub temperature: f64,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_TEXT_MODEL.to_string(),
            temperature: DEFAULT_AUDIT_TEMPERATURE,
        }
    }
}

impl AuditSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            model: config.models.text_model.clone(),
            temperature: config.models.audit_temperature,
        }
    }
}

/// Runs full UX/UI audits against an injected [`ModelClient`].
///
/// Holds no per-audit state; concurrent calls share only the client.
#[derive(Clone)]
pub struct Auditor {
    client: Arc<dyn ModelClient>,
    settings: AuditSettings,
    retry: RetryPolicy,
}

impl Auditor {
    pub fn new(client: Arc<dyn ModelClient>, settings: AuditSettings, retry: RetryPolicy) -> Self {
        Self {
            client,
            settings,
            retry,
        }
    }

    pub fn settings(&self) -> &AuditSettings {
        &self.settings
    }

    /// Audit `url` with search grounding.
    ///
    /// The whole request/extract cycle is retried on server errors. A reply
    /// that cannot be parsed into a valid report fails with
    /// [`AuditError::MalformedResponse`] and is not retried.
    pub async fn perform_ui_audit(&self, url: &str) -> Result<AuditData, AuditError> {
        let audit_id = Uuid::new_v4().simple().to_string();
        let span = tracing::info_span!("ui_audit", audit_id = %audit_id, url);

        async {
            tracing::info!(model = self.settings.model.as_str(), "Starting audit");
            let result = self.retry.run("ui_audit", || self.audit_once(url)).await;
            match &result {
                Ok(data) => tracing::info!(
                    overall_score = data.audit.overall_score,
                    sections = data.audit.sections.len(),
                    sources = data.sources.len(),
                    "Audit completed"
                ),
                Err(err) => tracing::error!(error = %err, "Audit failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn audit_once(&self, url: &str) -> Result<AuditData, AuditError> {
        let request = TextRequest::grounded(
            self.settings.model.as_str(),
            audit_prompt(url),
            self.settings.temperature,
        );

        let response = self.client.generate_content(&request).await?;

        let audit = parse_audit_report(&response.text).inspect_err(|err| {
            tracing::debug!(
                error = %err,
                response_chars = response.text.chars().count(),
                "Model reply did not contain a valid report"
            );
        })?;

        Ok(AuditData {
            audit,
            sources: response.grounding_sources,
        })
    }
}
