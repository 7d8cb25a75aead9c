//! Configuration for the registration wizard.
//!
//! Loads configuration from environment variables with sensible defaults.

use crate::error::ConfigError;
use crate::submitter::PLACEHOLDER_ENDPOINT;
use pd_registration_anthropic::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Registration collection endpoint
    pub registration: RegistrationConfig,
    /// AI itinerary writer
    pub itinerary: ItineraryConfig,
    /// Optional live enrollment source
    pub enrollment_url: Option<String>,
    /// Timeout applied to every outbound HTTP request, in seconds
    pub request_timeout_secs: u64,
}

/// Registration endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationConfig {
    /// Endpoint URL; the shipped placeholder means "not configured"
    pub endpoint_url: String,
    /// How long an unconfigured submit waits before failing, in milliseconds
    pub unconfigured_delay_ms: u64,
}

/// Itinerary writer configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ItineraryConfig {
    /// API key; without it every itinerary is the fallback
    pub api_key: Option<String>,
    /// Model name
    pub model: String,
    /// Output token cap
    pub max_tokens: u32,
    /// Organization the coordinator speaks for
    pub organization: String,
}

impl std::fmt::Debug for ItineraryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItineraryConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("organization", &self.organization)
            .finish()
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("registration", &self.registration)
            .field("itinerary", &self.itinerary)
            .field("enrollment_url", &self.enrollment_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unparseable numbers fall back to their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            registration: RegistrationConfig {
                endpoint_url: lookup("REGISTRATION_ENDPOINT_URL")
                    .unwrap_or_else(|| PLACEHOLDER_ENDPOINT.to_string()),
                unconfigured_delay_ms: lookup("UNCONFIGURED_SUBMIT_DELAY_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1000),
            },
            itinerary: ItineraryConfig {
                api_key: non_blank("ANTHROPIC_API_KEY"),
                model: non_blank("ITINERARY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                max_tokens: lookup("ITINERARY_MAX_TOKENS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(1024),
                organization: non_blank("EVENT_ORGANIZATION")
                    .unwrap_or_else(|| "Barrington 220".to_string()),
            },
            enrollment_url: non_blank("ENROLLMENT_URL"),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }

    /// Reject values that would make the wizard unusable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero request timeout or a zero
    /// token cap.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "REQUEST_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }
        if self.itinerary.max_tokens == 0 {
            return Err(ConfigError::Invalid(
                "ITINERARY_MAX_TOKENS must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Outbound request timeout
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Wait before an unconfigured submit fails
    #[must_use]
    pub const fn unconfigured_delay(&self) -> Duration {
        Duration::from_millis(self.registration.unconfigured_delay_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.registration.endpoint_url, PLACEHOLDER_ENDPOINT);
        assert_eq!(config.unconfigured_delay(), Duration::from_secs(1));
        assert_eq!(config.itinerary.api_key, None);
        assert_eq!(config.itinerary.model, DEFAULT_MODEL);
        assert_eq!(config.itinerary.organization, "Barrington 220");
        assert_eq!(config.enrollment_url, None);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("REGISTRATION_ENDPOINT_URL", "https://example.org/exec"),
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("ITINERARY_MAX_TOKENS", "512"),
            ("ENROLLMENT_URL", "https://example.org/counts"),
            ("UNCONFIGURED_SUBMIT_DELAY_MS", "10"),
        ]);

        assert_eq!(config.registration.endpoint_url, "https://example.org/exec");
        assert_eq!(config.itinerary.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.itinerary.max_tokens, 512);
        assert_eq!(config.enrollment_url.as_deref(), Some("https://example.org/counts"));
        assert_eq!(config.unconfigured_delay(), Duration::from_millis(10));
    }

    #[test]
    fn test_garbage_numbers_fall_back_and_blank_key_is_absent() {
        let config = config_from(&[
            ("REQUEST_TIMEOUT_SECS", "soon"),
            ("ITINERARY_MAX_TOKENS", "-1"),
            ("ANTHROPIC_API_KEY", "   "),
        ]);

        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.itinerary.max_tokens, 1024);
        assert_eq!(config.itinerary.api_key, None);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = config_from(&[("REQUEST_TIMEOUT_SECS", "0")]);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = config_from(&[("ANTHROPIC_API_KEY", "sk-secret")]);
        let debug = format!("{config:?}");

        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
