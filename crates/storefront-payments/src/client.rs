//! Processor Client
//!
//! One synchronous round trip to Checkout.com's `/payment-sessions`
//! endpoint per checkout attempt. No retries, no idempotency keys, no
//! cancellation: a failed call is reported and the user decides what to do.

use serde_json::Value;

use crate::config::{key_prefix, PaymentsConfig};
use crate::error::{PaymentError, Result};
use crate::session::{build_session_payload, SessionRequest};

/// Client for the processor's session-creation endpoint
pub struct ProcessorClient {
    http: reqwest::Client,
    config: PaymentsConfig,
}

impl ProcessorClient {
    /// Create a client around an already-loaded configuration
    pub fn new(config: PaymentsConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let config = PaymentsConfig::from_env();
        config.validate()?;
        Ok(Self::new(config))
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &PaymentsConfig {
        &self.config
    }

    /// Create a payment session with the processor.
    ///
    /// Returns the processor's session object untouched; the caller feeds it
    /// to the vendor widget without interpreting it. Fails with a
    /// configuration error before any outbound call when the secret key is
    /// missing.
    pub async fn create_payment_session(&self, request: &SessionRequest) -> Result<Value> {
        let secret_key = self.config.require_secret_key()?;
        let payload = build_session_payload(&self.config, request);

        tracing::info!(
            amount = payload.amount,
            currency = %payload.currency,
            reference = %payload.reference,
            key = %key_prefix(secret_key),
            "Creating payment session"
        );
        if let Ok(body) = serde_json::to_string(&payload) {
            tracing::debug!(body = %body, "Outbound session request");
        }

        let url = format!("{}/payment-sessions", self.config.environment.api_base());
        let response = self
            .http
            .post(&url)
            .bearer_auth(secret_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| PaymentError::Transport(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| PaymentError::Transport(format!("unreadable processor response: {e}")))?;

        tracing::info!(status = status.as_u16(), "Processor responded");
        tracing::debug!(body = %body, "Processor response body");

        if !status.is_success() {
            let message = error_message(&body);
            tracing::warn!(
                status = status.as_u16(),
                message = %message,
                "Payment session creation failed"
            );
            return Err(PaymentError::Session {
                status: status.as_u16(),
                message,
                details: Some(body),
            });
        }

        Ok(body)
    }
}

/// Extract the most specific error message the processor offered.
///
/// Preference order: `error_description`, then `error`, then `message`,
/// then the raw body.
fn error_message(body: &Value) -> String {
    body.get("error_description")
        .and_then(Value::as_str)
        .or_else(|| body.get("error").and_then(Value::as_str))
        .or_else(|| body.get("message").and_then(Value::as_str))
        .map_or_else(|| body.to_string(), str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_message_prefers_description() {
        let body = json!({
            "error_description": "card_declined",
            "error": "request_invalid",
            "message": "something else",
        });
        assert_eq!(error_message(&body), "card_declined");
    }

    #[test]
    fn test_error_message_fallback_order() {
        let body = json!({"error": "request_invalid", "message": "nope"});
        assert_eq!(error_message(&body), "request_invalid");

        let body = json!({"message": "processing_channel_id_required"});
        assert_eq!(error_message(&body), "processing_channel_id_required");
    }

    #[test]
    fn test_error_message_raw_body_fallback() {
        let body = json!({"error_codes": ["amount_invalid"]});
        assert_eq!(error_message(&body), r#"{"error_codes":["amount_invalid"]}"#);
    }

    #[tokio::test]
    async fn test_missing_secret_key_fails_before_any_call() {
        let client = ProcessorClient::new(PaymentsConfig::default());
        let request = SessionRequest {
            amount: 10_000,
            currency: None,
            billing_info: None,
        };

        let err = client.create_payment_session(&request).await.unwrap_err();
        assert!(matches!(err, PaymentError::Config(_)));
    }
}
