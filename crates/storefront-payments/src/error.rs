//! Payment Error Types

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Payment-related errors
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Missing or invalid credentials/configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The processor rejected the session request
    #[error("Payment session rejected ({status}): {message}")]
    Session {
        /// HTTP status returned by the processor
        status: u16,
        /// Processor-supplied error message
        message: String,
        /// Raw processor response body, if one was readable
        details: Option<serde_json::Value>,
    },

    /// Network failure or unreadable processor response
    #[error("Transport error: {0}")]
    Transport(String),

    /// Anything else
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Check if this error is worth a user-initiated retry
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PaymentError::Session { .. } | PaymentError::Transport(_)
        )
    }

    /// HTTP status to report to our own caller.
    ///
    /// Processor rejections pass the processor's status through so the
    /// browser sees the same code the gateway produced.
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Config(_) | PaymentError::Internal(_) => 500,
            PaymentError::Session { status, .. } => *status,
            PaymentError::Transport(_) => 502,
        }
    }

    /// Get user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            PaymentError::Config(_) => "Payment service is not configured.".into(),
            PaymentError::Session { message, .. } => message.clone(),
            PaymentError::Transport(_) => {
                "Could not reach the payment service. Please try again.".into()
            }
            PaymentError::Internal(_) => "Internal server error".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_error_passes_status_through() {
        let err = PaymentError::Session {
            status: 402,
            message: "card_declined".into(),
            details: None,
        };
        assert_eq!(err.status_code(), 402);
        assert_eq!(err.user_message(), "card_declined");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_config_error_is_internal_and_final() {
        let err = PaymentError::Config("CHECKOUT_SECRET_KEY is not configured".into());
        assert_eq!(err.status_code(), 500);
        assert!(!err.is_retryable());
    }
}
