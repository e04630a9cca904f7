//! storefront-checkout HTTP Server
//!
//! Axum-based server fronting the payment-session builder and serving the
//! WASM checkout frontend. Card handling itself lives entirely in the
//! processor's widget; this server only builds sessions and redacts keys.

mod handlers;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use storefront_payments::{key_prefix, PaymentsConfig};

use crate::handlers::{
    checkout_config, create_payment_session, health_check, test_keys,
};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Load and validate payments configuration
    let config = PaymentsConfig::from_env();
    config.validate()?;

    match config.secret_key.as_deref() {
        Some(key) => {
            tracing::info!("✓ Processor credentials configured ({})", key_prefix(key));
        }
        None => {
            tracing::warn!("⚠ CHECKOUT_SECRET_KEY not set - session creation will fail");
            tracing::warn!("  Set CHECKOUT_SECRET_KEY and CHECKOUT_PUBLIC_KEY in .env");
        }
    }
    if config.public_key.is_none() {
        tracing::warn!("⚠ CHECKOUT_PUBLIC_KEY not set - the widget cannot initialize");
    }
    tracing::info!(
        environment = config.environment.as_str(),
        base_url = %config.base_url,
        currency = %config.default_currency,
        "Payments configuration loaded"
    );

    // Build application state
    let state = AppState::new(config);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        // Health & diagnostics
        .route("/health", get(health_check))
        .route("/api/test-keys", get(test_keys))

        // Checkout API
        .route("/api/payment-session", post(create_payment_session))
        .route("/api/checkout-config", get(checkout_config))

        // Static files (WASM frontend)
        .nest_service("/", tower_http::services::ServeDir::new("static"))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🛒 storefront-checkout running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health               - Health check");
    tracing::info!("  GET  /api/test-keys        - Credential presence (redacted)");
    tracing::info!("  GET  /api/checkout-config  - Public widget config");
    tracing::info!("  POST /api/payment-session  - Create a payment session");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
