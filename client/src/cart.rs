//! In-memory shopping cart
//!
//! The cart is client-side state only; nothing here touches the network.
//! Lines from several empresas coexist in one cart and are split per
//! empresa at submission time, since each order goes to a single seller.
//!
//! `total_items` and `total` are cached and recomputed after every
//! mutation, so they always equal the sum over the current lines.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use shared::models::{PedidoCreate, PedidoItemCreate, Producto};

/// One cart line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItem {
    /// Producto ID
    pub producto: String,
    pub nombre: String,
    /// Unit price as shown when the buyer added the line
    pub precio: Decimal,
    pub cantidad: u32,
    /// Selling empresa ID
    pub empresa: String,
    pub empresa_nombre: String,
}

impl CartItem {
    pub fn subtotal(&self) -> Decimal {
        self.precio * Decimal::from(self.cantidad)
    }
}

/// The cart lines of a single empresa, ready for submission
#[derive(Debug, Clone)]
pub struct EmpresaCart {
    pub empresa: String,
    pub empresa_nombre: String,
    pub items: Vec<CartItem>,
    pub total: Decimal,
}

impl EmpresaCart {
    /// Order payload for this empresa's slice of the cart
    pub fn to_pedido(&self) -> PedidoCreate {
        PedidoCreate {
            empresa_id: self.empresa.clone(),
            items: self
                .items
                .iter()
                .map(|item| PedidoItemCreate {
                    producto_id: item.producto.clone(),
                    cantidad: item.cantidad,
                    precio: item.precio,
                })
                .collect(),
        }
    }
}

/// Shopping cart with cached aggregates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
    total_items: u32,
    total: Decimal,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Sum of quantities over all lines
    pub fn total_items(&self) -> u32 {
        self.total_items
    }

    /// Sum of `precio * cantidad` over all lines
    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct empresas represented in the cart
    pub fn empresas_count(&self) -> usize {
        let mut seen: Vec<&str> = Vec::new();
        for item in &self.items {
            if !seen.contains(&item.empresa.as_str()) {
                seen.push(&item.empresa);
            }
        }
        seen.len()
    }

    /// Add a product; a line for the same product merges quantities.
    ///
    /// Returns `false` without touching the cart when the product has no
    /// ID yet or the quantity is zero.
    pub fn add(&mut self, producto: &Producto, cantidad: u32) -> bool {
        let Some(id) = producto.id.as_deref() else {
            return false;
        };
        if cantidad == 0 {
            return false;
        }

        match self.items.iter_mut().find(|item| item.producto == id) {
            Some(line) => line.cantidad += cantidad,
            None => self.items.push(CartItem {
                producto: id.to_string(),
                nombre: producto.nombre.clone(),
                precio: producto.precio,
                cantidad,
                empresa: producto.empresa.clone(),
                empresa_nombre: producto.empresa_nombre.clone(),
            }),
        }
        self.recompute();
        true
    }

    /// Set a line's quantity; zero removes the line
    pub fn update_quantity(&mut self, producto_id: &str, cantidad: u32) {
        if cantidad == 0 {
            self.remove(producto_id);
            return;
        }
        if let Some(line) = self.items.iter_mut().find(|i| i.producto == producto_id) {
            line.cantidad = cantidad;
            self.recompute();
        }
    }

    pub fn remove(&mut self, producto_id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.producto != producto_id);
        if self.items.len() != before {
            self.recompute();
        }
    }

    pub fn get(&self, producto_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.producto == producto_id)
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    /// Group the cart per empresa, preserving line insertion order
    pub fn por_empresa(&self) -> Vec<EmpresaCart> {
        let mut groups: Vec<EmpresaCart> = Vec::new();
        for item in &self.items {
            match groups.iter_mut().find(|g| g.empresa == item.empresa) {
                Some(group) => {
                    group.total += item.subtotal();
                    group.items.push(item.clone());
                }
                None => groups.push(EmpresaCart {
                    empresa: item.empresa.clone(),
                    empresa_nombre: item.empresa_nombre.clone(),
                    total: item.subtotal(),
                    items: vec![item.clone()],
                }),
            }
        }
        groups
    }

    /// This empresa's slice of the cart, if it has any lines
    pub fn empresa_cart(&self, empresa_id: &str) -> Option<EmpresaCart> {
        self.por_empresa().into_iter().find(|g| g.empresa == empresa_id)
    }

    /// Drop all lines of one empresa, leaving the rest of the cart intact
    pub fn remove_empresa(&mut self, empresa_id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.empresa != empresa_id);
        if self.items.len() != before {
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        self.total_items = self.items.iter().map(|i| i.cantidad).sum();
        self.total = self.items.iter().map(|i| i.subtotal()).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn assert_totals_consistent(cart: &Cart) {
        let items: u32 = cart.items().iter().map(|i| i.cantidad).sum();
        let total: Decimal = cart.items().iter().map(|i| i.subtotal()).sum();
        assert_eq!(cart.total_items(), items);
        assert_eq!(cart.total(), total);
    }

    #[test]
    fn aggregates_match_the_line_sums() {
        let mut cart = Cart::new();
        assert!(cart.add(&producto("producto:a", "empresa:x", 100), 2));
        assert!(cart.add(&producto("producto:b", "empresa:x", 50), 1));

        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total(), Decimal::from(250));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn adding_the_same_product_merges_quantities() {
        let mut cart = Cart::new();
        let pan = producto("producto:pan", "empresa:sol", 2);
        cart.add(&pan, 2);
        cart.add(&pan, 3);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get("producto:pan").unwrap().cantidad, 5);
        assert_totals_consistent(&cart);
    }

    #[test]
    fn zero_quantity_update_removes_the_line() {
        let mut cart = Cart::new();
        cart.add(&producto("producto:a", "empresa:x", 10), 2);
        cart.add(&producto("producto:b", "empresa:x", 5), 1);

        cart.update_quantity("producto:a", 0);
        assert!(cart.get("producto:a").is_none());
        assert_eq!(cart.total_items(), 1);

        cart.update_quantity("producto:b", 4);
        assert_eq!(cart.get("producto:b").unwrap().cantidad, 4);
        assert_eq!(cart.total(), Decimal::from(20));
        assert_totals_consistent(&cart);
    }

    #[test]
    fn add_rejects_zero_quantity_and_unsaved_products() {
        let mut cart = Cart::new();
        assert!(!cart.add(&producto("producto:a", "empresa:x", 10), 0));

        let mut sin_id = producto("producto:a", "empresa:x", 10);
        sin_id.id = None;
        assert!(!cart.add(&sin_id, 1));

        assert!(cart.is_empty());
    }

    #[test]
    fn totals_stay_consistent_under_mixed_mutations() {
        let mut cart = Cart::new();
        cart.add(&producto("producto:a", "empresa:x", 3), 4);
        cart.add(&producto("producto:b", "empresa:y", 7), 1);
        cart.update_quantity("producto:a", 2);
        cart.add(&producto("producto:c", "empresa:x", 1), 10);
        cart.remove("producto:b");
        cart.add(&producto("producto:a", "empresa:x", 3), 1);

        assert_totals_consistent(&cart);
        assert_eq!(cart.total_items(), 13);
        assert_eq!(cart.total(), Decimal::from(19));
    }

    #[test]
    fn grouping_splits_lines_per_empresa() {
        let mut cart = Cart::new();
        cart.add(&producto("producto:a", "empresa:x", 100), 2);
        cart.add(&producto("producto:b", "empresa:y", 50), 1);
        cart.add(&producto("producto:c", "empresa:x", 10), 3);

        let groups = cart.por_empresa();
        assert_eq!(groups.len(), 2);
        assert_eq!(cart.empresas_count(), 2);

        let x = groups.iter().find(|g| g.empresa == "empresa:x").unwrap();
        assert_eq!(x.items.len(), 2);
        assert_eq!(x.total, Decimal::from(230));

        let pedido = x.to_pedido();
        assert_eq!(pedido.empresa_id, "empresa:x");
        assert_eq!(pedido.items.len(), 2);
        assert_eq!(pedido.items[0].producto_id, "producto:a");
        assert_eq!(pedido.items[0].cantidad, 2);
    }

    #[test]
    fn removing_one_empresa_leaves_the_others_alone() {
        let mut cart = Cart::new();
        cart.add(&producto("producto:a", "empresa:x", 100), 2);
        cart.add(&producto("producto:b", "empresa:y", 50), 1);

        cart.remove_empresa("empresa:x");
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total(), Decimal::from(50));
        assert!(cart.empresa_cart("empresa:x").is_none());
        assert_totals_consistent(&cart);
    }
}
