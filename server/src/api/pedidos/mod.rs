//! Pedido API module
//!
//! | Path | Method | Caller |
//! |------|--------|--------|
//! | /api/pedidos | POST | cliente |
//! | /api/pedidos | GET | empresa |
//! | /api/pedidos/mios | GET | cliente |
//! | /api/pedidos/stats | GET | empresa |
//! | /api/pedidos/{id} | GET | owner |
//! | /api/pedidos/{id}/estado | PUT | empresa owner |

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pedidos", pedido_routes())
}

fn pedido_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_for_empresa).post(handler::create))
        .route("/mios", get(handler::list_for_cliente))
        .route("/stats", get(handler::stats))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/estado", put(handler::update_estado))
}
