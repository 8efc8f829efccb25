//! Authentication: JWT tokens, argon2 passwords, middleware and extractor

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use middleware::require_auth;
pub use password::{hash_password, verify_password};

use shared::models::TipoCuenta;
use shared::{AppError, AppResult, ErrorCode};

/// Authenticated account, extracted from a validated JWT
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Record id ("cliente:..." or "empresa:...")
    pub id: String,
    pub email: String,
    pub nombre: String,
    pub tipo: TipoCuenta,
}

impl CurrentUser {
    /// The empresa record id, or a 403 when the caller is not an empresa
    pub fn require_empresa(&self) -> AppResult<&str> {
        match self.tipo {
            TipoCuenta::Empresa => Ok(&self.id),
            TipoCuenta::Cliente => Err(AppError::new(ErrorCode::EmpresaRequired)),
        }
    }

    /// The cliente record id, or a 403 when the caller is not a cliente
    pub fn require_cliente(&self) -> AppResult<&str> {
        match self.tipo {
            TipoCuenta::Cliente => Ok(&self.id),
            TipoCuenta::Empresa => Err(AppError::new(ErrorCode::ClienteRequired)),
        }
    }
}

impl TryFrom<Claims> for CurrentUser {
    type Error = String;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let tipo: TipoCuenta = claims.tipo.parse()?;
        Ok(Self {
            id: claims.sub,
            email: claims.email,
            nombre: claims.nombre,
            tipo,
        })
    }
}
