//! Shared types for the Mercado marketplace
//!
//! Common types used by both the server and the client SDK: domain models,
//! error types, API DTOs, the WebSocket notification protocol, and small
//! utilities.

pub mod client;
pub mod error;
pub mod models;
pub mod util;
pub mod ws;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode};
pub use models::{EstadoPedido, Pedido, PedidoCreate, Producto};
