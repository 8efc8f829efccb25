//! Unified error codes for the Mercado marketplace
//!
//! Error codes are shared between the server and the client SDK so both
//! sides agree on failure semantics. Codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication / verification errors
//! - 2xxx: Permission errors
//! - 4xxx: Order (pedido) errors
//! - 6xxx: Product errors
//! - 8xxx: Account errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Account is disabled
    AccountDisabled = 1005,
    /// Account email is not verified yet
    AccountNotVerified = 1006,
    /// Verification code does not match or was already used
    VerificationCodeInvalid = 1007,
    /// Verification code has expired
    VerificationCodeExpired = 1008,
    /// Email is already registered
    EmailAlreadyRegistered = 1009,
    /// Account is already verified
    AccountAlreadyVerified = 1010,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Endpoint requires an empresa (seller) account
    EmpresaRequired = 2002,
    /// Endpoint requires a cliente (buyer) account
    ClienteRequired = 2003,
    /// Caller does not own the resource
    NotResourceOwner = 2004,

    // ==================== 4xxx: Pedido ====================
    /// Order not found
    PedidoNotFound = 4001,
    /// Order has no items
    PedidoEmpty = 4002,
    /// Requested status change is not a legal transition
    InvalidStatusTransition = 4003,
    /// Order already reached a terminal state
    PedidoTerminal = 4004,
    /// A checkout for this empresa is already in flight
    CheckoutInProgress = 4005,

    // ==================== 6xxx: Producto ====================
    /// Product not found
    ProductoNotFound = 6001,
    /// Product is inactive
    ProductoInactive = 6002,
    /// Product belongs to a different empresa
    ProductoWrongEmpresa = 6003,
    /// Price must be positive
    InvalidPrice = 6004,
    /// Uploaded image could not be decoded
    ImageInvalid = 6005,
    /// Uploaded image exceeds the size cap
    ImageTooLarge = 6006,

    // ==================== 8xxx: Account ====================
    /// Cliente account not found
    ClienteNotFound = 8001,
    /// Empresa account not found
    EmpresaNotFound = 8002,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Configuration error
    ConfigError = 9003,
    /// Network error (transient)
    NetworkError = 9004,
    /// Timeout (transient)
    TimeoutError = 9005,
}

impl ErrorCode {
    /// Numeric value of this code
    pub fn code(&self) -> u16 {
        *self as u16
    }

    /// Default human-readable message for this code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::AlreadyExists => "Resource already exists",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::ValueOutOfRange => "Value out of range",

            Self::NotAuthenticated => "Authentication required",
            Self::InvalidCredentials => "Invalid email or password",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::AccountDisabled => "Account has been disabled",
            Self::AccountNotVerified => "Account email is not verified",
            Self::VerificationCodeInvalid => "Invalid verification code",
            Self::VerificationCodeExpired => "Verification code expired",
            Self::EmailAlreadyRegistered => "Email is already registered",
            Self::AccountAlreadyVerified => "Account is already verified",

            Self::PermissionDenied => "Permission denied",
            Self::EmpresaRequired => "Empresa account required",
            Self::ClienteRequired => "Cliente account required",
            Self::NotResourceOwner => "Not the owner of this resource",

            Self::PedidoNotFound => "Pedido not found",
            Self::PedidoEmpty => "Pedido has no items",
            Self::InvalidStatusTransition => "Illegal order status transition",
            Self::PedidoTerminal => "Pedido is already in a terminal state",
            Self::CheckoutInProgress => "Checkout already in progress for this empresa",

            Self::ProductoNotFound => "Producto not found",
            Self::ProductoInactive => "Producto is inactive",
            Self::ProductoWrongEmpresa => "Producto belongs to a different empresa",
            Self::InvalidPrice => "Price must be positive",
            Self::ImageInvalid => "Image could not be decoded",
            Self::ImageTooLarge => "Image exceeds the size limit",

            Self::ClienteNotFound => "Cliente not found",
            Self::EmpresaNotFound => "Empresa not found",

            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::ConfigError => "Configuration error",
            Self::NetworkError => "Network error",
            Self::TimeoutError => "Operation timed out",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when deserializing an unknown numeric error code
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid error code: {0}")]
pub struct InvalidErrorCode(pub u16);

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::AlreadyExists,
            5 => Self::InvalidRequest,
            6 => Self::InvalidFormat,
            7 => Self::RequiredField,
            8 => Self::ValueOutOfRange,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::AccountDisabled,
            1006 => Self::AccountNotVerified,
            1007 => Self::VerificationCodeInvalid,
            1008 => Self::VerificationCodeExpired,
            1009 => Self::EmailAlreadyRegistered,
            1010 => Self::AccountAlreadyVerified,

            2001 => Self::PermissionDenied,
            2002 => Self::EmpresaRequired,
            2003 => Self::ClienteRequired,
            2004 => Self::NotResourceOwner,

            4001 => Self::PedidoNotFound,
            4002 => Self::PedidoEmpty,
            4003 => Self::InvalidStatusTransition,
            4004 => Self::PedidoTerminal,
            4005 => Self::CheckoutInProgress,

            6001 => Self::ProductoNotFound,
            6002 => Self::ProductoInactive,
            6003 => Self::ProductoWrongEmpresa,
            6004 => Self::InvalidPrice,
            6005 => Self::ImageInvalid,
            6006 => Self::ImageTooLarge,

            8001 => Self::ClienteNotFound,
            8002 => Self::EmpresaNotFound,

            9001 => Self::InternalError,
            9002 => Self::DatabaseError,
            9003 => Self::ConfigError,
            9004 => Self::NetworkError,
            9005 => Self::TimeoutError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
