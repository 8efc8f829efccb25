//! Mercado client SDK
//!
//! HTTP access to the marketplace API plus the local cart/checkout
//! state a buying session keeps in memory.

pub mod cart;
pub mod checkout;
pub mod client;
pub mod error;

pub use cart::{Cart, CartItem, EmpresaCart};
pub use checkout::CartSession;
pub use client::ApiClient;
pub use error::{ClientError, ClientResult};

// Re-export shared types for convenience
pub use shared::client::{LoginResponse, RegisterResponse, UserInfo};
pub use shared::models::{EstadoPedido, Pedido, PedidoCreate, Producto};
