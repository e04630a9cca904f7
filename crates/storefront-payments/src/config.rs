//! Payments Configuration
//!
//! All processor settings live in one struct, read from the environment once
//! at startup and passed by reference afterwards. The secret key is the only
//! value that gates outbound calls; its absence is reported per request, not
//! by refusing to boot.

use serde::{Deserialize, Serialize};

use crate::error::{PaymentError, Result};

/// Processor environment the widget and API calls run against
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Sandbox,
    Production,
}

impl Environment {
    /// Base URL of the processor's REST API for this environment
    pub fn api_base(self) -> &'static str {
        match self {
            Environment::Sandbox => "https://api.sandbox.checkout.com",
            Environment::Production => "https://api.checkout.com",
        }
    }

    /// String form the vendor widget expects
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Sandbox => "sandbox",
            Environment::Production => "production",
        }
    }

    fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" | "live" => Environment::Production,
            _ => Environment::Sandbox,
        }
    }
}

/// Wire shape used for the customer phone number.
///
/// Observed deployments disagree: some send the raw string the customer
/// typed, others send `{country_code, number}`. Both are supported; `Flat`
/// is the default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PhoneFormat {
    #[default]
    Flat,
    Structured,
}

impl PhoneFormat {
    fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "structured" => PhoneFormat::Structured,
            _ => PhoneFormat::Flat,
        }
    }
}

/// Process-wide payments configuration
#[derive(Clone, Debug)]
pub struct PaymentsConfig {
    /// Secret API key, server-only. `None` means session creation fails
    /// with a configuration error.
    pub secret_key: Option<String>,

    /// Public API key, safe to hand to browser code
    pub public_key: Option<String>,

    /// Base URL the success/failure redirect targets are derived from
    pub base_url: String,

    /// Processing channel identifier, forwarded verbatim when set
    pub processing_channel_id: Option<String>,

    /// Sandbox or production
    pub environment: Environment,

    /// Currency applied when the request does not name one
    pub default_currency: String,

    /// Phone wire-shape policy
    pub phone_format: PhoneFormat,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            public_key: None,
            base_url: "http://localhost:3000".into(),
            processing_channel_id: None,
            environment: Environment::Sandbox,
            default_currency: "SGD".into(),
            phone_format: PhoneFormat::Flat,
        }
    }
}

impl PaymentsConfig {
    /// Read configuration from environment variables.
    ///
    /// Never fails: missing values fall back to defaults or `None` so the
    /// server can boot and report misconfiguration per request.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            secret_key: non_empty_var("CHECKOUT_SECRET_KEY"),
            public_key: non_empty_var("CHECKOUT_PUBLIC_KEY"),
            base_url: non_empty_var("BASE_URL").unwrap_or(defaults.base_url),
            processing_channel_id: non_empty_var("PROCESSING_CHANNEL_ID"),
            environment: non_empty_var("CHECKOUT_ENVIRONMENT")
                .map_or(defaults.environment, |v| Environment::parse(&v)),
            default_currency: non_empty_var("DEFAULT_CURRENCY")
                .unwrap_or(defaults.default_currency),
            phone_format: non_empty_var("PHONE_FORMAT")
                .map_or(defaults.phone_format, |v| PhoneFormat::parse(&v)),
        }
    }

    /// Validate the configuration before first use.
    ///
    /// A missing secret key is not an error here (it is surfaced per
    /// request); structurally broken values are.
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(PaymentError::Config("BASE_URL must not be empty".into()));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(PaymentError::Config(format!(
                "BASE_URL must be an absolute http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.default_currency.len() != 3 {
            return Err(PaymentError::Config(format!(
                "DEFAULT_CURRENCY must be a 3-letter code, got {:?}",
                self.default_currency
            )));
        }
        Ok(())
    }

    /// The secret key, or a configuration error if it was never set
    pub fn require_secret_key(&self) -> Result<&str> {
        self.secret_key
            .as_deref()
            .ok_or_else(|| PaymentError::Config("CHECKOUT_SECRET_KEY is not configured".into()))
    }

    /// Redirect target for completed payments
    pub fn success_url(&self) -> String {
        format!("{}/success", self.base_url.trim_end_matches('/'))
    }

    /// Redirect target for failed payments
    pub fn failure_url(&self) -> String {
        format!("{}/failure", self.base_url.trim_end_matches('/'))
    }
}

/// Redacted key prefix for diagnostics. Never log a key any other way.
pub fn key_prefix(key: &str) -> String {
    let prefix: String = key.chars().take(10).collect();
    format!("{prefix}...")
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_secret_key_is_config_error() {
        let config = PaymentsConfig::default();
        let err = config.require_secret_key().unwrap_err();
        assert!(matches!(err, PaymentError::Config(_)));
    }

    #[test]
    fn test_redirect_urls_from_base() {
        let config = PaymentsConfig {
            base_url: "https://shop.example.com/".into(),
            ..Default::default()
        };
        assert_eq!(config.success_url(), "https://shop.example.com/success");
        assert_eq!(config.failure_url(), "https://shop.example.com/failure");
    }

    #[test]
    fn test_key_prefix_redacts() {
        let prefix = key_prefix("sk_sbox_abcdefghijklmnop");
        assert_eq!(prefix, "sk_sbox_ab...");
        assert!(!prefix.contains("cdefghijklmnop"));
    }

    #[test]
    fn test_validate_rejects_relative_base_url() {
        let config = PaymentsConfig {
            base_url: "shop.example.com".into(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_environment_api_base() {
        assert_eq!(
            Environment::Sandbox.api_base(),
            "https://api.sandbox.checkout.com"
        );
        assert_eq!(Environment::parse("LIVE"), Environment::Production);
        assert_eq!(Environment::parse("anything-else"), Environment::Sandbox);
    }
}
