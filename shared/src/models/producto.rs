//! Producto model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Producto entity
///
/// Immutable once fetched into a cart except for quantity bookkeeping, which
/// happens entirely at the cart layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Producto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub nombre: String,
    pub descripcion: Option<String>,
    /// Unit price
    pub precio: Decimal,
    /// Image path under the uploads dir
    pub imagen: Option<String>,
    /// Soft-delete flag; inactive products are hidden from listings
    pub activo: bool,
    /// Owning empresa reference (String ID)
    pub empresa: String,
    /// Denormalized empresa name for cart grouping
    pub empresa_nombre: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create producto payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductoCreate {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: Decimal,
}

/// Update producto payload
///
/// Absent fields are left untouched (merge semantics), so every field skips
/// serialization when `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductoUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
}
