//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::PedidoNotFound
            | Self::ProductoNotFound
            | Self::ClienteNotFound
            | Self::EmpresaNotFound => StatusCode::NOT_FOUND,

            // 409 Conflict
            Self::AlreadyExists
            | Self::EmailAlreadyRegistered
            | Self::AccountAlreadyVerified
            | Self::CheckoutInProgress
            | Self::PedidoTerminal => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated
            | Self::InvalidCredentials
            | Self::TokenExpired
            | Self::TokenInvalid
            | Self::AccountDisabled
            | Self::AccountNotVerified => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::PermissionDenied
            | Self::EmpresaRequired
            | Self::ClienteRequired
            | Self::NotResourceOwner => StatusCode::FORBIDDEN,

            // 413 Payload Too Large
            Self::ImageTooLarge => StatusCode::PAYLOAD_TOO_LARGE,

            // 422 Unprocessable Entity (business rule violations)
            Self::InvalidStatusTransition | Self::PedidoEmpty => {
                StatusCode::UNPROCESSABLE_ENTITY
            }

            // 503 Service Unavailable (transient errors, client can retry)
            Self::NetworkError | Self::TimeoutError => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::InternalError | Self::DatabaseError | Self::ConfigError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }

            // 400 Bad Request (default for validation/input errors)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_codes_map_to_401() {
        assert_eq!(
            ErrorCode::TokenExpired.http_status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ErrorCode::AccountNotVerified.http_status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn transition_violation_maps_to_422() {
        assert_eq!(
            ErrorCode::InvalidStatusTransition.http_status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
