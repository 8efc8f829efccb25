//! Cliente (buyer) model

use serde::{Deserialize, Serialize};

/// Cliente entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cliente {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub nombre: String,
    /// Normalized (lowercase) email, unique
    pub email: String,
    /// Argon2 password hash
    pub password: String,
    /// Set once the email verification code is confirmed
    pub verificado: bool,
    pub created_at: i64,
}
