//! API request/response DTOs shared by server handlers and the client SDK

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::TipoCuenta;

/// Register a cliente (buyer) account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterClienteRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Register an empresa (seller) account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterEmpresaRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(max = 1000))]
    pub descripcion: Option<String>,
}

/// Registration acknowledgment: a verification code was issued
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: String,
    pub email: String,
    /// Unix millis when the issued verification code expires
    pub code_expires_at: i64,
}

/// Confirm an email with the 6-digit code
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyEmailRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(equal = 6))]
    pub code: String,
    pub tipo: TipoCuenta,
}

/// Request a fresh verification code
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ResendCodeRequest {
    #[validate(email)]
    pub email: String,
    pub tipo: TipoCuenta,
}

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub tipo: TipoCuenta,
}

/// Account info returned on login and from `/api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    pub nombre: String,
    pub email: String,
    pub tipo: TipoCuenta,
    pub verificado: bool,
    pub created_at: i64,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserInfo,
}

/// Unread notification count, also carried by the WebSocket welcome frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreadCount {
    pub no_leidas: u64,
}
