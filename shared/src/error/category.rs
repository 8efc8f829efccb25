//! Error category classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// High-level classification of an error code, derived from its numeric range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    General,
    Auth,
    Permission,
    Pedido,
    Producto,
    Account,
    System,
}

impl ErrorCode {
    /// Category of this error code
    pub fn category(&self) -> ErrorCategory {
        match self.code() {
            0..=999 => ErrorCategory::General,
            1000..=1999 => ErrorCategory::Auth,
            2000..=2999 => ErrorCategory::Permission,
            4000..=4999 => ErrorCategory::Pedido,
            6000..=6999 => ErrorCategory::Producto,
            8000..=8999 => ErrorCategory::Account,
            _ => ErrorCategory::System,
        }
    }

    /// Transient errors may succeed on manual retry (network, timeout)
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkError | Self::TimeoutError)
    }
}
