//! Payment Session Request Assembly
//!
//! Projects the billing form onto Checkout.com's `/payment-sessions` schema.
//! The projection is pure: defaults, blank-field omission, and reference
//! generation all happen here, so the whole mapping is unit-testable without
//! touching the network.
//!
//! Omission semantics: optional payload fields are `Option` and carry
//! `skip_serializing_if`, so an absent field is absent from the JSON rather
//! than present as an empty string.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{PaymentsConfig, PhoneFormat};

/// Placeholder values used in quick-checkout mode, when billing capture is
/// skipped or a required field arrives blank.
const DEFAULT_ADDRESS_LINE1: &str = "123 Main Street";
const DEFAULT_CITY: &str = "Singapore";
const DEFAULT_ZIP: &str = "123456";
const DEFAULT_COUNTRY: &str = "SG";
const DEFAULT_EMAIL: &str = "customer@example.com";
const DEFAULT_NAME: &str = "Customer";

/// Billing details as the browser form submits them.
///
/// Every field is a plain string; blank means "not provided". The form sends
/// camelCase keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BillingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address_line1: String,
    pub address_line2: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

/// Inbound request for one checkout attempt
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRequest {
    /// Amount in minor currency units (cents)
    pub amount: i64,

    /// Currency code; falls back to the configured default
    #[serde(default)]
    pub currency: Option<String>,

    /// Billing details; `None` selects quick-checkout placeholders
    #[serde(default)]
    pub billing_info: Option<BillingInfo>,
}

/// Billing address in the processor's shape
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Address {
    pub address_line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line2: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub zip: String,
    pub country: String,
}

/// Billing block wrapping the address
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Billing {
    pub address: Address,
}

/// Customer phone, in one of the two wire shapes the processor accepts
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Phone {
    Flat(String),
    Structured { country_code: String, number: String },
}

/// Customer block
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Customer {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Phone>,
}

/// Complete outbound body for `POST /payment-sessions`.
///
/// Write-only: constructed fresh per checkout attempt, serialized, sent,
/// and dropped. Never stored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SessionPayload {
    pub amount: i64,
    pub currency: String,
    pub reference: String,
    pub billing: Billing,
    pub customer: Customer,
    pub success_url: String,
    pub failure_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processing_channel_id: Option<String>,
}

static REFERENCE_SEQ: AtomicU64 = AtomicU64::new(0);

/// Generate a merchant reference, unique within this process.
///
/// Timestamp plus an atomic counter; two calls in the same millisecond still
/// differ. Not cryptographic, and does not need to be.
pub fn next_reference() -> String {
    let millis = Utc::now().timestamp_millis();
    let seq = REFERENCE_SEQ.fetch_add(1, Ordering::Relaxed);
    format!("order-{millis}-{seq}")
}

/// Build the outbound session payload for one checkout attempt.
pub fn build_session_payload(config: &PaymentsConfig, request: &SessionRequest) -> SessionPayload {
    let billing_info = request.billing_info.clone().unwrap_or_default();

    let currency = request
        .currency
        .as_deref()
        .and_then(non_blank)
        .unwrap_or(&config.default_currency)
        .to_string();

    SessionPayload {
        amount: request.amount,
        currency,
        reference: next_reference(),
        billing: Billing {
            address: build_address(&billing_info),
        },
        customer: build_customer(&billing_info, config.phone_format),
        success_url: config.success_url(),
        failure_url: config.failure_url(),
        processing_channel_id: config.processing_channel_id.clone(),
    }
}

fn build_address(info: &BillingInfo) -> Address {
    Address {
        address_line1: non_blank(&info.address_line1)
            .unwrap_or(DEFAULT_ADDRESS_LINE1)
            .to_string(),
        address_line2: non_blank(&info.address_line2).map(str::to_string),
        city: non_blank(&info.city).unwrap_or(DEFAULT_CITY).to_string(),
        state: non_blank(&info.state).map(str::to_string),
        zip: non_blank(&info.zip).unwrap_or(DEFAULT_ZIP).to_string(),
        country: non_blank(&info.country)
            .unwrap_or(DEFAULT_COUNTRY)
            .to_string(),
    }
}

fn build_customer(info: &BillingInfo, phone_format: PhoneFormat) -> Customer {
    let name = match (non_blank(&info.first_name), non_blank(&info.last_name)) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        _ => DEFAULT_NAME.to_string(),
    };

    Customer {
        email: non_blank(&info.email).unwrap_or(DEFAULT_EMAIL).to_string(),
        name,
        phone: non_blank(&info.phone).map(|raw| shape_phone(raw, phone_format)),
    }
}

/// Shape a non-blank phone value per the configured policy.
///
/// Structured mode splits a leading `+NNN` calling code; a number without
/// one cannot be split reliably, so it falls back to the flat shape.
fn shape_phone(raw: &str, format: PhoneFormat) -> Phone {
    if format == PhoneFormat::Structured {
        if let Some((country_code, number)) = split_calling_code(raw) {
            return Phone::Structured {
                country_code,
                number,
            };
        }
    }
    Phone::Flat(raw.to_string())
}

fn split_calling_code(raw: &str) -> Option<(String, String)> {
    let rest = raw.trim().strip_prefix('+')?;
    let digits: String = rest.chars().take_while(char::is_ascii_digit).take(3).collect();
    if digits.is_empty() {
        return None;
    }
    let number: String = rest[digits.len()..]
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect();
    if number.is_empty() {
        return None;
    }
    Some((format!("+{digits}"), number))
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaymentsConfig;

    fn test_config() -> PaymentsConfig {
        PaymentsConfig {
            secret_key: Some("sk_sbox_test".into()),
            public_key: Some("pk_sbox_test".into()),
            base_url: "https://shop.example.com".into(),
            processing_channel_id: Some("pc_test_channel".into()),
            ..Default::default()
        }
    }

    fn jane() -> BillingInfo {
        BillingInfo {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: "jane@x.com".into(),
            address_line1: "1 Main St".into(),
            city: "Singapore".into(),
            zip: "123456".into(),
            country: "SG".into(),
            ..Default::default()
        }
    }

    fn request(billing: Option<BillingInfo>) -> SessionRequest {
        SessionRequest {
            amount: 10_000,
            currency: Some("SGD".into()),
            billing_info: billing,
        }
    }

    #[test]
    fn test_full_billing_mapping() {
        let payload = build_session_payload(&test_config(), &request(Some(jane())));

        assert_eq!(payload.amount, 10_000);
        assert_eq!(payload.currency, "SGD");
        assert_eq!(payload.billing.address.country, "SG");
        assert_eq!(payload.billing.address.address_line1, "1 Main St");
        assert_eq!(payload.customer.name, "Jane Doe");
        assert_eq!(payload.customer.email, "jane@x.com");
        assert_eq!(payload.success_url, "https://shop.example.com/success");
        assert_eq!(payload.failure_url, "https://shop.example.com/failure");
        assert_eq!(
            payload.processing_channel_id.as_deref(),
            Some("pc_test_channel")
        );
    }

    #[test]
    fn test_blank_optional_fields_are_absent_from_json() {
        let payload = build_session_payload(&test_config(), &request(Some(jane())));
        let json = serde_json::to_value(&payload).unwrap();

        let address = &json["billing"]["address"];
        assert!(address.get("address_line2").is_none());
        assert!(address.get("state").is_none());
        assert!(json["customer"].get("phone").is_none());
    }

    #[test]
    fn test_present_optional_fields_are_included() {
        let mut billing = jane();
        billing.address_line2 = "#05-01".into();
        billing.state = "Central".into();
        billing.phone = "+65 1234 5678".into();

        let payload = build_session_payload(&test_config(), &request(Some(billing)));
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["billing"]["address"]["address_line2"], "#05-01");
        assert_eq!(json["billing"]["address"]["state"], "Central");
        assert_eq!(json["customer"]["phone"], "+65 1234 5678");
    }

    #[test]
    fn test_quick_checkout_placeholders() {
        let payload = build_session_payload(&test_config(), &request(None));

        assert_eq!(payload.billing.address.address_line1, "123 Main Street");
        assert_eq!(payload.billing.address.city, "Singapore");
        assert_eq!(payload.billing.address.zip, "123456");
        assert_eq!(payload.billing.address.country, "SG");
        assert_eq!(payload.customer.name, "Customer");
        assert_eq!(payload.customer.email, "customer@example.com");
    }

    #[test]
    fn test_one_missing_name_half_uses_placeholder() {
        let mut billing = jane();
        billing.last_name = "  ".into();

        let payload = build_session_payload(&test_config(), &request(Some(billing)));
        assert_eq!(payload.customer.name, "Customer");
    }

    #[test]
    fn test_currency_defaults_when_omitted() {
        let req = SessionRequest {
            amount: 2_500,
            currency: None,
            billing_info: None,
        };
        let payload = build_session_payload(&test_config(), &req);
        assert_eq!(payload.currency, "SGD");
    }

    #[test]
    fn test_references_unique_across_requests() {
        let config = test_config();
        let first = build_session_payload(&config, &request(Some(jane())));
        let second = build_session_payload(&config, &request(Some(jane())));
        assert_ne!(first.reference, second.reference);
    }

    #[test]
    fn test_structured_phone_shape() {
        let config = PaymentsConfig {
            phone_format: PhoneFormat::Structured,
            ..test_config()
        };
        let mut billing = jane();
        billing.phone = "+65 1234 5678".into();

        let payload = build_session_payload(&config, &request(Some(billing)));
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["customer"]["phone"]["country_code"], "+65");
        assert_eq!(json["customer"]["phone"]["number"], "12345678");
    }

    #[test]
    fn test_structured_phone_without_calling_code_falls_back_flat() {
        let config = PaymentsConfig {
            phone_format: PhoneFormat::Structured,
            ..test_config()
        };
        let mut billing = jane();
        billing.phone = "1234 5678".into();

        let payload = build_session_payload(&config, &request(Some(billing)));
        assert_eq!(
            payload.customer.phone,
            Some(Phone::Flat("1234 5678".into()))
        );
    }

    #[test]
    fn test_camel_case_request_deserialization() {
        let req: SessionRequest = serde_json::from_str(
            r#"{"amount":10000,"currency":"SGD","billingInfo":{"firstName":"Jane","lastName":"Doe","email":"jane@x.com","addressLine1":"1 Main St","city":"Singapore","zip":"123456","country":"SG"}}"#,
        )
        .unwrap();

        assert_eq!(req.amount, 10_000);
        let billing = req.billing_info.unwrap();
        assert_eq!(billing.first_name, "Jane");
        assert_eq!(billing.address_line1, "1 Main St");
        assert!(billing.phone.is_empty());
    }
}
