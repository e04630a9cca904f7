//! Application State

use std::sync::Arc;

use storefront_payments::{PaymentsConfig, ProcessorClient};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Payments configuration, loaded once at startup
    pub config: Arc<PaymentsConfig>,

    /// Processor client (optional - None if the secret key is not configured)
    pub payments: Option<Arc<ProcessorClient>>,
}

impl AppState {
    /// Build state from a loaded configuration.
    ///
    /// A missing secret key leaves `payments` as `None`; the handler reports
    /// that per request instead of the process refusing to boot.
    pub fn new(config: PaymentsConfig) -> Self {
        let payments = config
            .secret_key
            .is_some()
            .then(|| Arc::new(ProcessorClient::new(config.clone())));

        Self {
            config: Arc::new(config),
            payments,
        }
    }
}
