//! # storefront-payments
//!
//! Payment-session construction and processor client for the storefront
//! checkout demo.
//!
//! ## Checkout.com Flow Integration
//!
//! This crate implements the server half of Checkout.com's "Flow" (embedded
//! web component) integration:
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │   Browser   │────▶│  This crate      │────▶│  Checkout.com    │
//! │  (billing)  │     │  (session build) │     │  /payment-sessions│
//! └─────────────┘     └──────────────────┘     └──────────────────┘
//!        ▲                                               │
//!        └──────────── opaque payment session ◀──────────┘
//! ```
//!
//! The browser collects billing details, this crate projects them onto the
//! processor's session schema (filling placeholders, omitting blank optional
//! fields) and creates a payment session with the server-held secret key.
//! The returned session object is opaque: it is handed straight to the
//! vendor's web component, which owns card entry, 3DS, and submission.
//!
//! Card data never touches this crate, and the secret key never leaves it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_payments::{PaymentsConfig, ProcessorClient, SessionRequest};
//!
//! let config = PaymentsConfig::from_env();
//! config.validate()?;
//!
//! let client = ProcessorClient::new(config);
//! let session = client.create_payment_session(&SessionRequest {
//!     amount: 10_000,
//!     currency: Some("SGD".into()),
//!     billing_info: None, // quick-checkout mode, placeholders are used
//! }).await?;
//!
//! // Hand `session` to the Flow web component in the browser.
//! ```

mod client;
mod config;
mod error;
mod session;

pub use client::ProcessorClient;
pub use config::{key_prefix, Environment, PaymentsConfig, PhoneFormat};
pub use error::{PaymentError, Result};
pub use session::{
    build_session_payload, next_reference, Address, Billing, BillingInfo, Customer, Phone,
    SessionPayload, SessionRequest,
};
