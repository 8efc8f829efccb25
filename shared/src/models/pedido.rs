//! Pedido (order) model and status lifecycle

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status lifecycle
///
/// Forward-only: `pendiente → en_proceso → finalizado`. `cancelado` is a
/// terminal state reachable from any non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EstadoPedido {
    #[default]
    Pendiente,
    EnProceso,
    Finalizado,
    Cancelado,
}

impl EstadoPedido {
    /// The next forward state, if any
    pub fn next(&self) -> Option<EstadoPedido> {
        match self {
            Self::Pendiente => Some(Self::EnProceso),
            Self::EnProceso => Some(Self::Finalizado),
            Self::Finalizado | Self::Cancelado => None,
        }
    }

    /// Terminal states accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finalizado | Self::Cancelado)
    }

    /// Whether `target` is a legal transition from this state
    ///
    /// Legal moves are the single forward step and cancellation from any
    /// non-terminal state. No jumps, no reversals.
    pub fn can_transition_to(&self, target: EstadoPedido) -> bool {
        if self.is_terminal() {
            return false;
        }
        if target == Self::Cancelado {
            return true;
        }
        self.next() == Some(target)
    }

    /// Action label the dashboard offers for the next transition
    pub fn accion_siguiente(&self) -> Option<&'static str> {
        match self {
            Self::Pendiente => Some("Comenzar preparación"),
            Self::EnProceso => Some("Marcar finalizado"),
            Self::Finalizado | Self::Cancelado => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pendiente => "pendiente",
            Self::EnProceso => "en_proceso",
            Self::Finalizado => "finalizado",
            Self::Cancelado => "cancelado",
        }
    }
}

impl std::fmt::Display for EstadoPedido {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line item (denormalized at submission time)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PedidoItem {
    /// Producto reference (String ID)
    pub producto: String,
    pub nombre: String,
    pub cantidad: u32,
    /// Unit price at submission time
    pub precio: Decimal,
}

impl PedidoItem {
    pub fn subtotal(&self) -> Decimal {
        self.precio * Decimal::from(self.cantidad)
    }
}

/// Pedido entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pedido {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Buying cliente reference (String ID)
    pub cliente: String,
    pub cliente_nombre: String,
    /// Selling empresa reference (String ID)
    pub empresa: String,
    pub items: Vec<PedidoItem>,
    /// Authoritative total, recomputed server-side from stored prices
    pub total: Decimal,
    pub estado: EstadoPedido,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Order submission payload, one per empresa slice of the cart
///
/// Wire format: `{ empresaId, items: [{ productoId, cantidad, precio }] }`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoCreate {
    pub empresa_id: String,
    pub items: Vec<PedidoItemCreate>,
}

/// One line of an order submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PedidoItemCreate {
    pub producto_id: String,
    pub cantidad: u32,
    /// Price the buyer saw; the server recomputes the total from storage
    pub precio: Decimal,
}

/// Status update payload: `{ estado }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PedidoEstadoUpdate {
    pub estado: EstadoPedido,
}

/// Per-empresa order statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PedidoStats {
    pub pendientes: u64,
    pub en_proceso: u64,
    pub finalizados: u64,
    pub cancelados: u64,
    pub total_pedidos: u64,
    /// Revenue over finished orders
    pub ingresos: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions() {
        assert_eq!(EstadoPedido::Pendiente.next(), Some(EstadoPedido::EnProceso));
        assert_eq!(EstadoPedido::EnProceso.next(), Some(EstadoPedido::Finalizado));
        assert_eq!(EstadoPedido::Finalizado.next(), None);
        assert_eq!(EstadoPedido::Cancelado.next(), None);
    }

    #[test]
    fn no_action_offered_from_terminal_states() {
        assert!(EstadoPedido::Pendiente.accion_siguiente().is_some());
        assert!(EstadoPedido::EnProceso.accion_siguiente().is_some());
        assert_eq!(EstadoPedido::Finalizado.accion_siguiente(), None);
        assert_eq!(EstadoPedido::Cancelado.accion_siguiente(), None);
    }

    #[test]
    fn no_jumps_or_reversals() {
        assert!(!EstadoPedido::Pendiente.can_transition_to(EstadoPedido::Finalizado));
        assert!(!EstadoPedido::EnProceso.can_transition_to(EstadoPedido::Pendiente));
        assert!(!EstadoPedido::Finalizado.can_transition_to(EstadoPedido::Cancelado));
        assert!(EstadoPedido::Pendiente.can_transition_to(EstadoPedido::EnProceso));
        assert!(EstadoPedido::EnProceso.can_transition_to(EstadoPedido::Finalizado));
    }

    #[test]
    fn cancel_is_allowed_from_any_non_terminal_state() {
        assert!(EstadoPedido::Pendiente.can_transition_to(EstadoPedido::Cancelado));
        assert!(EstadoPedido::EnProceso.can_transition_to(EstadoPedido::Cancelado));
        assert!(!EstadoPedido::Cancelado.can_transition_to(EstadoPedido::Cancelado));
    }

    #[test]
    fn estado_serializes_to_spanish_snake_case() {
        assert_eq!(
            serde_json::to_string(&EstadoPedido::EnProceso).unwrap(),
            "\"en_proceso\""
        );
        let back: EstadoPedido = serde_json::from_str("\"pendiente\"").unwrap();
        assert_eq!(back, EstadoPedido::Pendiente);
    }

    #[test]
    fn pedido_create_uses_camel_case_wire_format() {
        let payload = PedidoCreate {
            empresa_id: "empresa:abc".into(),
            items: vec![PedidoItemCreate {
                producto_id: "producto:xyz".into(),
                cantidad: 2,
                precio: Decimal::from(100),
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json.get("empresaId").is_some());
        assert!(json["items"][0].get("productoId").is_some());
        assert!(json["items"][0].get("cantidad").is_some());
        assert!(json["items"][0].get("precio").is_some());
    }

    #[test]
    fn item_subtotal() {
        let item = PedidoItem {
            producto: "producto:a".into(),
            nombre: "A".into(),
            cantidad: 3,
            precio: Decimal::from(50),
        };
        assert_eq!(item.subtotal(), Decimal::from(150));
    }
}
