//! Mailer configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default API base URL. Accounts in the EU region use
/// `https://api.eu.mailgun.net/v3` instead.
pub const DEFAULT_BASE_URL: &str = "https://api.mailgun.net/v3";

/// Default address validation endpoint.
pub const DEFAULT_VALIDATION_URL: &str = "https://api.mailgun.net/v3/address/validate";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for [`Mailer`](crate::Mailer).
///
/// `api_key` and `domain` are required before the first send; the
/// validation fields only matter when the validation endpoint is used.
/// Values are fixed once the mailer starts issuing requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailgunConfig {
    /// Private API key used for sending.
    pub api_key: String,
    /// Sending domain registered with the provider.
    pub domain: String,
    /// Key for the address validation endpoint.
    pub validation_key: Option<String>,
    /// Address validation endpoint URL.
    pub validation_url: String,
    /// API base URL. Override for the EU region or for tests.
    pub base_url: String,
    /// Request timeout applied to every API call.
    pub timeout: Duration,
}

impl MailgunConfig {
    /// Create a configuration for the given sending credentials, with
    /// default endpoints and timeout.
    pub fn new(api_key: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            domain: domain.into(),
            ..Self::default()
        }
    }

    /// Read the configuration from environment variables.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `MAILGUN_API_KEY` | `api_key` |
    /// | `MAILGUN_DOMAIN` | `domain` |
    /// | `MAILGUN_VALIDATION_KEY` | `validation_key` |
    /// | `MAILGUN_VALIDATION_URL` | `validation_url` |
    /// | `MAILGUN_BASE_URL` | `base_url` |
    ///
    /// Missing required variables are not an error here; the mailer
    /// raises a configuration error on first use instead.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("MAILGUN_API_KEY").unwrap_or_default(),
            domain: std::env::var("MAILGUN_DOMAIN").unwrap_or_default(),
            validation_key: std::env::var("MAILGUN_VALIDATION_KEY").ok(),
            validation_url: std::env::var("MAILGUN_VALIDATION_URL")
                .unwrap_or_else(|_| DEFAULT_VALIDATION_URL.to_string()),
            base_url: std::env::var("MAILGUN_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the validation key.
    pub fn with_validation_key(mut self, key: impl Into<String>) -> Self {
        self.validation_key = Some(key.into());
        self
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the validation endpoint URL.
    pub fn with_validation_url(mut self, url: impl Into<String>) -> Self {
        self.validation_url = url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for MailgunConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            domain: String::new(),
            validation_key: None,
            validation_url: DEFAULT_VALIDATION_URL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MailgunConfig::default();
        assert!(config.api_key.is_empty());
        assert!(config.domain.is_empty());
        assert!(config.validation_key.is_none());
        assert_eq!(config.validation_url, DEFAULT_VALIDATION_URL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_new_config() {
        let config = MailgunConfig::new("key-test", "mg.example.com");
        assert_eq!(config.api_key, "key-test");
        assert_eq!(config.domain, "mg.example.com");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_builder_overrides() {
        let config = MailgunConfig::new("key-test", "mg.example.com")
            .with_validation_key("pubkey-test")
            .with_base_url("https://api.eu.mailgun.net/v3")
            .with_validation_url("https://api.eu.mailgun.net/v3/address/validate")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.validation_key.as_deref(), Some("pubkey-test"));
        assert_eq!(config.base_url, "https://api.eu.mailgun.net/v3");
        assert_eq!(
            config.validation_url,
            "https://api.eu.mailgun.net/v3/address/validate"
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    // Single test for both phases: parallel tests must not race on the
    // process environment.
    #[test]
    fn test_from_env() {
        std::env::remove_var("MAILGUN_API_KEY");
        std::env::remove_var("MAILGUN_DOMAIN");
        std::env::remove_var("MAILGUN_VALIDATION_KEY");
        std::env::remove_var("MAILGUN_VALIDATION_URL");
        std::env::remove_var("MAILGUN_BASE_URL");

        let config = MailgunConfig::from_env();
        assert!(config.api_key.is_empty());
        assert!(config.domain.is_empty());
        assert!(config.validation_key.is_none());
        assert_eq!(config.validation_url, DEFAULT_VALIDATION_URL);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);

        std::env::set_var("MAILGUN_API_KEY", "key-from-env");
        std::env::set_var("MAILGUN_DOMAIN", "mg.env.example.com");
        std::env::set_var("MAILGUN_VALIDATION_KEY", "pubkey-from-env");
        std::env::set_var("MAILGUN_BASE_URL", "https://api.eu.mailgun.net/v3");

        let config = MailgunConfig::from_env();
        assert_eq!(config.api_key, "key-from-env");
        assert_eq!(config.domain, "mg.env.example.com");
        assert_eq!(config.validation_key.as_deref(), Some("pubkey-from-env"));
        assert_eq!(config.base_url, "https://api.eu.mailgun.net/v3");

        std::env::remove_var("MAILGUN_API_KEY");
        std::env::remove_var("MAILGUN_DOMAIN");
        std::env::remove_var("MAILGUN_VALIDATION_KEY");
        std::env::remove_var("MAILGUN_BASE_URL");
    }
}
