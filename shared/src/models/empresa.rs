//! Empresa (seller) model

use serde::{Deserialize, Serialize};

/// Empresa entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Empresa {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub nombre: String,
    /// Normalized (lowercase) email, unique
    pub email: String,
    /// Argon2 password hash
    pub password: String,
    pub descripcion: Option<String>,
    /// Logo image path under the uploads dir
    pub logo: Option<String>,
    /// Set once the email verification code is confirmed
    pub verificado: bool,
    pub created_at: i64,
}

/// Public projection of an empresa for the buyer-facing listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmpresaPublic {
    pub id: String,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub logo: Option<String>,
}

impl From<Empresa> for EmpresaPublic {
    fn from(e: Empresa) -> Self {
        Self {
            id: e.id.unwrap_or_default(),
            nombre: e.nombre,
            descripcion: e.descripcion,
            logo: e.logo,
        }
    }
}
