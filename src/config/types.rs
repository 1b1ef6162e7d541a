use serde::{Deserialize, Serialize};

/// Prompt sent alongside the image when `[analysis].prompt` is not set.
pub const DEFAULT_PROMPT: &str = r#"Analyze this image.

If it is a menu, translate it literally and reply with JSON:
{"kind": "menu", "title": string, "sections": [{"category": string, "items": [{"name": string, "price": string}]}]}

If it is a product, reply with JSON:
{"kind": "product", "brand": string, "name": string, "priceRange": string, "marketReview": string, "userFeedback": {"pros": [string], "cons": [string]}}

Reply with JSON only."#;

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Inference provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL up to and including the API version segment.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier used in the `generateContent` path.
    #[serde(default = "default_model")]
    pub model: String,
    /// Direct API key. Falls back to `GEMINI_API_KEY` when unset.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Total timeout for a single attempt in seconds (default: 60).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds (default: 10).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
}

/// Retry settings for the inference call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Retries allowed after the first attempt (default: 5).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds (default: 1000).
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Factor applied to the delay after every retry (default: 2.0).
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

/// Analysis request settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Replaces the built-in prompt when set.
    #[serde(default)]
    pub prompt: Option<String>,
}

impl AnalysisConfig {
    /// The prompt to send, falling back to [`DEFAULT_PROMPT`].
    pub fn prompt(&self) -> &str {
        self.prompt
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_PROMPT)
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-2.5-flash-preview-09-2025".to_string()
}

fn default_timeout() -> u32 {
    60
}

fn default_connect_timeout() -> u32 {
    10
}

fn default_max_retries() -> u32 {
    5
}

fn default_initial_delay_ms() -> u64 {
    1000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}
