//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Structured API error (code from the response envelope)
    #[error("API error {code}: {message}")]
    Api { code: u16, message: String },

    /// A checkout for this empresa is already in flight
    #[error("Checkout already in progress for {0}")]
    CheckoutInProgress(String),

    /// The cart holds nothing for this empresa
    #[error("No cart items for {0}")]
    EmptyCheckout(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
