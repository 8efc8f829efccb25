//! Notificacion model

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Notification kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificacionTipo {
    /// A new order arrived for the empresa
    NuevoPedido,
    /// An order changed status
    EstadoPedido,
    /// System-originated message
    Sistema,
}

/// Notification delivered to an empresa dashboard
///
/// Wire format: `{ id, titulo, mensaje, tipo, leida, createdAt, metadata }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notificacion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Receiving empresa reference (String ID), not exposed on the wire
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empresa: Option<String>,
    pub titulo: String,
    pub mensaje: String,
    pub tipo: NotificacionTipo,
    pub leida: bool,
    pub created_at: i64,
    /// Free-form payload (pedido id, estado, total, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_format_uses_camel_case_created_at() {
        let n = Notificacion {
            id: Some("notificacion:1".into()),
            empresa: None,
            titulo: "Nuevo pedido".into(),
            mensaje: "Tienes un nuevo pedido".into(),
            tipo: NotificacionTipo::NuevoPedido,
            leida: false,
            created_at: 42,
            metadata: None,
        };
        let json = serde_json::to_value(&n).unwrap();
        assert_eq!(json["createdAt"], 42);
        assert_eq!(json["tipo"], "nuevo_pedido");
    }
}
