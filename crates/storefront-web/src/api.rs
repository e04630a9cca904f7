//! API Client

use serde::Deserialize;

use crate::flow::BillingForm;

/// Public widget configuration served by the backend
#[derive(Clone, Debug, Deserialize)]
pub struct CheckoutConfig {
    pub public_key: Option<String>,
    pub environment: String,
}

/// Fetch the public key and environment for widget initialization
pub async fn fetch_checkout_config() -> Result<CheckoutConfig, String> {
    let client = reqwest::Client::new();

    let response = client
        .get("/api/checkout-config")
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err("Failed to load checkout configuration".into())
    }
}

/// Create a payment session for the given amount and billing details.
///
/// Returns the processor's opaque session object, passed through untouched
/// for the vendor widget.
pub async fn create_payment_session(
    amount: i64,
    currency: &str,
    billing: &BillingForm,
) -> Result<serde_json::Value, String> {
    let client = reqwest::Client::new();

    let body = serde_json::json!({
        "amount": amount,
        "currency": currency,
        "billingInfo": billing,
    });

    let response = client
        .post("/api/payment-session")
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        Err(data["error"]
            .as_str()
            .unwrap_or("Failed to create payment session")
            .to_string())
    }
}
