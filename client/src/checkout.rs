//! Per-empresa checkout on top of the cart
//!
//! Submission runs one empresa at a time. While an empresa's order is in
//! flight its ID sits in `processing`, so a second submit for the same
//! empresa is rejected instead of creating a duplicate order. Cart lines
//! are removed only after the server confirms the order; a failed submit
//! leaves the cart exactly as it was.

use std::collections::HashSet;

use tracing::{info, warn};

use crate::cart::Cart;
use crate::client::ApiClient;
use crate::error::{ClientError, ClientResult};
use shared::models::{Pedido, PedidoCreate};

/// A buying session: the cart plus in-flight checkout tracking
#[derive(Debug, Default)]
pub struct CartSession {
    cart: Cart,
    processing: HashSet<String>,
}

impl CartSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Whether a checkout for this empresa is currently in flight
    pub fn is_processing(&self, empresa_id: &str) -> bool {
        self.processing.contains(empresa_id)
    }

    /// Reserve this empresa for submission and build its order payload.
    ///
    /// Fails without side effects when a checkout for the empresa is
    /// already in flight or the cart holds nothing for it. On success the
    /// empresa is marked processing until [`complete_checkout`] is called.
    ///
    /// [`complete_checkout`]: Self::complete_checkout
    pub fn begin_checkout(&mut self, empresa_id: &str) -> ClientResult<PedidoCreate> {
        if self.processing.contains(empresa_id) {
            return Err(ClientError::CheckoutInProgress(empresa_id.to_string()));
        }
        let slice = self
            .cart
            .empresa_cart(empresa_id)
            .ok_or_else(|| ClientError::EmptyCheckout(empresa_id.to_string()))?;

        self.processing.insert(empresa_id.to_string());
        Ok(slice.to_pedido())
    }

    /// Release the in-flight mark; on success the empresa's cart lines go too
    pub fn complete_checkout(&mut self, empresa_id: &str, success: bool) {
        self.processing.remove(empresa_id);
        if success {
            self.cart.remove_empresa(empresa_id);
        }
    }

    /// Submit this empresa's slice of the cart as an order
    ///
    /// Requires a logged-in client; the cart is untouched when the
    /// session has no token.
    pub async fn checkout(
        &mut self,
        client: &ApiClient,
        empresa_id: &str,
    ) -> ClientResult<Pedido> {
        if client.token().is_none() {
            return Err(ClientError::Unauthorized);
        }
        let payload = self.begin_checkout(empresa_id)?;

        match client.crear_pedido(&payload).await {
            Ok(pedido) => {
                self.complete_checkout(empresa_id, true);
                info!(empresa = empresa_id, pedido = ?pedido.id, "Order submitted");
                Ok(pedido)
            }
            Err(e) => {
                self.complete_checkout(empresa_id, false);
                warn!(empresa = empresa_id, error = %e, "Order submission failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::Producto;
    use shared::util::now_millis;

    fn producto(id: &str, empresa: &str, precio: i64) -> Producto {
        let now = now_millis();
        Producto {
            id: Some(id.to_string()),
            nombre: format!("Producto {id}"),
            descripcion: None,
            precio: Decimal::from(precio),
            imagen: None,
            activo: true,
            empresa: empresa.to_string(),
            empresa_nombre: format!("Empresa {empresa}"),
            created_at: now,
            updated_at: now,
        }
    }

    fn session_with_two_empresas() -> CartSession {
        let mut session = CartSession::new();
        session.cart_mut().add(&producto("producto:a", "empresa:x", 100), 2);
        session.cart_mut().add(&producto("producto:b", "empresa:y", 50), 1);
        session
    }

    #[test]
    fn begin_builds_the_payload_for_one_empresa() {
        let mut session = session_with_two_empresas();

        let payload = session.begin_checkout("empresa:x").expect("begin");
        assert_eq!(payload.empresa_id, "empresa:x");
        assert_eq!(payload.items.len(), 1);
        assert_eq!(payload.items[0].producto_id, "producto:a");
        assert!(session.is_processing("empresa:x"));
        assert!(!session.is_processing("empresa:y"));
    }

    #[test]
    fn concurrent_begin_for_the_same_empresa_is_rejected() {
        let mut session = session_with_two_empresas();

        session.begin_checkout("empresa:x").expect("first");
        let err = session.begin_checkout("empresa:x").unwrap_err();
        assert!(matches!(err, ClientError::CheckoutInProgress(_)));

        // A different empresa is unaffected
        session.begin_checkout("empresa:y").expect("other empresa");
    }

    #[test]
    fn empty_slice_is_rejected_without_marking_processing() {
        let mut session = CartSession::new();
        let err = session.begin_checkout("empresa:x").unwrap_err();
        assert!(matches!(err, ClientError::EmptyCheckout(_)));
        assert!(!session.is_processing("empresa:x"));
    }

    #[test]
    fn failure_releases_the_guard_and_keeps_the_cart() {
        let mut session = session_with_two_empresas();
        let total_before = session.cart().total();

        session.begin_checkout("empresa:x").expect("begin");
        session.complete_checkout("empresa:x", false);

        assert!(!session.is_processing("empresa:x"));
        assert_eq!(session.cart().total(), total_before);
        // The same empresa can retry immediately
        session.begin_checkout("empresa:x").expect("retry");
    }

    #[test]
    fn success_removes_only_that_empresas_lines() {
        let mut session = session_with_two_empresas();

        session.begin_checkout("empresa:x").expect("begin");
        session.complete_checkout("empresa:x", true);

        assert!(session.cart().empresa_cart("empresa:x").is_none());
        let rest = session.cart().empresa_cart("empresa:y").expect("kept");
        assert_eq!(rest.total, Decimal::from(50));
        assert_eq!(session.cart().total_items(), 1);
    }
}
