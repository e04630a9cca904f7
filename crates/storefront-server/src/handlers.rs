//! HTTP Handlers

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;

use storefront_payments::{key_prefix, PaymentError, SessionRequest};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub payments_configured: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Serialize)]
pub struct TestKeysResponse {
    pub secret_key: &'static str,
    pub public_key: &'static str,
    pub secret_key_prefix: String,
    pub public_key_prefix: String,
}

/// Public values the browser needs to initialize the vendor widget.
/// The secret key must never appear here.
#[derive(Serialize)]
pub struct CheckoutConfigResponse {
    pub public_key: Option<String>,
    pub environment: &'static str,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        payments_configured: state.payments.is_some(),
    })
}

/// Create a payment session with the processor
pub async fn create_payment_session(
    State(state): State<AppState>,
    Json(payload): Json<SessionRequest>,
) -> Result<Json<Value>, (StatusCode, Json<ErrorResponse>)> {
    let payments = state.payments.as_ref().ok_or_else(|| {
        error_response(&PaymentError::Config(
            "CHECKOUT_SECRET_KEY is not configured".into(),
        ))
    })?;

    let session = payments
        .create_payment_session(&payload)
        .await
        .map_err(|e| {
            tracing::error!("Payment session error: {}", e);
            error_response(&e)
        })?;

    Ok(Json(session))
}

/// Diagnostic endpoint: which credentials are configured.
/// Reports presence and a short prefix only, never full values.
pub async fn test_keys(State(state): State<AppState>) -> Json<TestKeysResponse> {
    let secret = state.config.secret_key.as_deref();
    let public = state.config.public_key.as_deref();

    Json(TestKeysResponse {
        secret_key: if secret.is_some() { "Present" } else { "Missing" },
        public_key: if public.is_some() { "Present" } else { "Missing" },
        secret_key_prefix: secret.map_or_else(|| "N/A".into(), key_prefix),
        public_key_prefix: public.map_or_else(|| "N/A".into(), key_prefix),
    })
}

/// Widget bootstrap values for the browser
pub async fn checkout_config(State(state): State<AppState>) -> Json<CheckoutConfigResponse> {
    Json(CheckoutConfigResponse {
        public_key: state.config.public_key.clone(),
        environment: state.config.environment.as_str(),
    })
}

/// Map a payment error onto the inbound API's error shape.
///
/// Processor rejections keep the processor's status code and message;
/// everything else maps to a generic 5xx with no internals leaked.
fn error_response(err: &PaymentError) -> (StatusCode, Json<ErrorResponse>) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let details = match err {
        PaymentError::Session { details, .. } => details.clone(),
        _ => None,
    };

    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
            details,
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_processor_rejection_passes_through() {
        let err = PaymentError::Session {
            status: 402,
            message: "card_declined".into(),
            details: Some(json!({"error_description": "card_declined"})),
        };

        let (status, Json(body)) = error_response(&err);
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(body.error, "card_declined");
        assert!(body.details.is_some());
    }

    #[test]
    fn test_config_error_is_500_without_details() {
        let err = PaymentError::Config("CHECKOUT_SECRET_KEY is not configured".into());

        let (status, Json(body)) = error_response(&err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.details.is_none());
    }

    #[test]
    fn test_transport_error_is_generic() {
        let err = PaymentError::Transport("connection reset".into());

        let (status, Json(body)) = error_response(&err);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(!body.error.contains("connection reset"));
    }
}
