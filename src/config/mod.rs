//! Configuration for the inference backend, retry policy and analysis prompt.

mod credentials;
mod loader;
mod types;

pub use credentials::{CredentialStatus, SecureString, API_KEY_ENV_VAR};
pub use loader::ConfigError;
pub use types::{AnalysisConfig, ApiConfig, Config, RetryConfig, DEFAULT_PROMPT};
