//! Credential resolution from configuration.
//!
//! The API key comes from `[api].api_key` or, when that is unset, from the
//! `GEMINI_API_KEY` environment variable supplied by the hosting environment.

use super::types::ApiConfig;

/// Environment variable consulted when the config carries no key.
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// The Gemini API key, masked whenever it is formatted.
///
/// Both `Debug` and `Display` print bullets, so the key can sit in structs
/// that end up in tracing fields or error messages.
#[derive(Clone)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    /// Raw key, for the `x-goog-api-key` request header.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Status of credential resolution.
#[derive(Debug, Clone)]
pub enum CredentialStatus {
    /// API key resolved successfully.
    Configured(SecureString),
    /// API key is missing or empty.
    Unconfigured {
        /// Reason for missing configuration.
        reason: String,
    },
}

impl ApiConfig {
    /// Resolve the API key, preferring the config value over the environment.
    ///
    /// Called on demand and not cached.
    pub fn resolve_credential(&self) -> CredentialStatus {
        let env_key = std::env::var(API_KEY_ENV_VAR).ok();
        resolve_from(self.api_key.as_deref(), env_key.as_deref())
    }

    /// Check if a usable credential is available.
    pub fn is_configured(&self) -> bool {
        matches!(self.resolve_credential(), CredentialStatus::Configured(_))
    }
}

fn resolve_from(config_key: Option<&str>, env_key: Option<&str>) -> CredentialStatus {
    [config_key, env_key]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(|key| CredentialStatus::Configured(SecureString::new(key.to_string())))
        .unwrap_or_else(|| CredentialStatus::Unconfigured {
            reason: format!("api.api_key is not set and {} is empty", API_KEY_ENV_VAR),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_does_not_leak() {
        let secret = SecureString::new("my-secret-key".to_string());

        let debug_output = format!("{:?}", secret);
        assert!(!debug_output.contains("my-secret-key"));
        assert!(debug_output.contains("••••••••"));

        let display_output = format!("{}", secret);
        assert!(!display_output.contains("my-secret-key"));

        assert_eq!(secret.expose(), "my-secret-key");
    }

    #[test]
    fn test_config_key_wins_over_env() {
        match resolve_from(Some("from-config"), Some("from-env")) {
            CredentialStatus::Configured(key) => assert_eq!(key.expose(), "from-config"),
            other => panic!("Expected Configured, got {:?}", other),
        }
    }

    #[test]
    fn test_env_key_used_when_config_blank() {
        match resolve_from(Some("  "), Some("from-env")) {
            CredentialStatus::Configured(key) => assert_eq!(key.expose(), "from-env"),
            other => panic!("Expected Configured, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_key_is_unconfigured() {
        match resolve_from(None, Some("")) {
            CredentialStatus::Unconfigured { reason } => {
                assert!(reason.contains(API_KEY_ENV_VAR));
            }
            other => panic!("Expected Unconfigured, got {:?}", other),
        }
    }
}
