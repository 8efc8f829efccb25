//! Domain models for the marketplace
//!
//! Each entity follows the same shape: the stored record plus its create and
//! update payloads. Record ids are `Option<String>` (absent before insert).

pub mod cliente;
pub mod empresa;
pub mod notificacion;
pub mod pedido;
pub mod producto;
pub mod verification_code;

pub use cliente::Cliente;
pub use empresa::{Empresa, EmpresaPublic};
pub use notificacion::{Notificacion, NotificacionTipo};
pub use pedido::{
    EstadoPedido, Pedido, PedidoCreate, PedidoEstadoUpdate, PedidoItem, PedidoItemCreate,
    PedidoStats,
};
pub use producto::{Producto, ProductoCreate, ProductoUpdate};
pub use verification_code::VerificationCode;

use serde::{Deserialize, Serialize};

/// Account type: buyers are clientes, sellers are empresas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TipoCuenta {
    Cliente,
    Empresa,
}

impl TipoCuenta {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cliente => "cliente",
            Self::Empresa => "empresa",
        }
    }
}

impl std::str::FromStr for TipoCuenta {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cliente" => Ok(Self::Cliente),
            "empresa" => Ok(Self::Empresa),
            other => Err(format!("unknown account type: {other}")),
        }
    }
}

impl std::fmt::Display for TipoCuenta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
