use crate::audit::orchestrator::{DEFAULT_AUDIT_TEMPERATURE, DEFAULT_TEXT_MODEL};
use crate::audit::visualize::{DEFAULT_IMAGE_MODEL, DEFAULT_STYLE_TEMPERATURE};
use crate::error::ConfigError;
use crate::llm::gemini::{API_KEY_ENV_VARS, DEFAULT_BASE_URL};
use crate::llm::http_client::DEFAULT_REQUEST_TIMEOUT_SECS;
use anyhow::{Context, Result};
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".uxaudit";
const CONFIG_FILE: &str = "config.toml";
const MAX_TEMPERATURE: f64 = 2.0;

// ── Top-level config ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path the config was read from (or would be); not serialized.
    #[serde(skip)]
    pub config_path: PathBuf,
    /// Falls back to the `GEMINI_API_KEY` family of env vars when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub models: ModelConfig,

    #[serde(default)]
    pub reliability: ReliabilityConfig,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_path: default_config_path().unwrap_or_else(|| PathBuf::from(CONFIG_FILE)),
            api_key: None,
            base_url: default_base_url(),
            models: ModelConfig::default(),
            reliability: ReliabilityConfig::default(),
        }
    }
}

// ── Models ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Model used for the audit and style analysis.
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_audit_temperature")]
    pub audit_temperature: f64,
    #[serde(default = "default_style_temperature")]
    pub style_temperature: f64,
    /// Per-request HTTP timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_text_model() -> String {
    DEFAULT_TEXT_MODEL.into()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.into()
}

fn default_audit_temperature() -> f64 {
    DEFAULT_AUDIT_TEMPERATURE
}

fn default_style_temperature() -> f64 {
    DEFAULT_STYLE_TEMPERATURE
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            text_model: default_text_model(),
            image_model: default_image_model(),
            audit_temperature: default_audit_temperature(),
            style_temperature: default_style_temperature(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// ── Reliability ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReliabilityConfig {
    /// Retries after the first attempt, server errors only.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// First backoff delay; doubles on each retry.
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

impl Default for ReliabilityConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
        }
    }
}

// ── Loading ──────────────────────────────────────────────────────

fn default_config_path() -> Option<PathBuf> {
    UserDirs::new().map(|u| u.home_dir().join(CONFIG_DIR).join(CONFIG_FILE))
}

impl Config {
    /// Load from `path` (tilde-expanded) or `~/.uxaudit/config.toml`.
    ///
    /// A missing file yields defaults. The file is never created or
    /// rewritten.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = match path {
            Some(raw) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
            None => default_config_path().context("Could not find home directory")?,
        };

        if config_path.exists() {
            Self::load_from_path(&config_path)
        } else {
            if path.is_some() {
                anyhow::bail!("Config file not found: {}", config_path.display());
            }
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            Ok(Self {
                config_path,
                ..Self::default()
            })
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.config_path = path.to_path_buf();
        Ok(config)
    }

    /// Apply environment variable overrides to config.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    /// Same as [`Config::apply_env_overrides`] with an injectable lookup.
    /// Empty values are ignored.
    pub fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        // API key: GEMINI_API_KEY, then API_KEY, then GOOGLE_API_KEY
        if let Some(key) = API_KEY_ENV_VARS.iter().find_map(|name| var(name)) {
            self.api_key = Some(key);
        }

        if let Some(base_url) = var("UXAUDIT_BASE_URL") {
            self.base_url = base_url;
        }

        if let Some(model) = var("UXAUDIT_TEXT_MODEL") {
            self.models.text_model = model;
        }

        if let Some(model) = var("UXAUDIT_IMAGE_MODEL") {
            self.models.image_model = model;
        }

        if let Some(raw) = var("UXAUDIT_MAX_RETRIES") {
            match raw.trim().parse::<u32>() {
                Ok(retries) => self.reliability.max_retries = retries,
                Err(_) => tracing::warn!(value = raw.as_str(), "Ignoring invalid UXAUDIT_MAX_RETRIES"),
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("models.audit_temperature", self.models.audit_temperature),
            ("models.style_temperature", self.models.style_temperature),
        ] {
            if !(0.0..=MAX_TEMPERATURE).contains(&value) {
                return Err(ConfigError::Validation(format!(
                    "{name} must be between 0.0 and {MAX_TEMPERATURE}, got {value}"
                )));
            }
        }

        for (name, value) in [
            ("models.text_model", &self.models.text_model),
            ("models.image_model", &self.models.image_model),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{name} must not be empty")));
            }
        }

        let base = url::Url::parse(&self.base_url).map_err(|e| {
            ConfigError::Validation(format!("base_url {:?} is not a valid URL: {e}", self.base_url))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(ConfigError::Validation(format!(
                "base_url must use http or https, got {}",
                base.scheme()
            )));
        }

        if self.models.request_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "models.request_timeout_secs must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}
