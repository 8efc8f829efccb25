//! Notificacion API module
//!
//! REST access to the notification history plus the WebSocket stream
//! the dashboard keeps open.
//!
//! | Path | Method | Caller |
//! |------|--------|--------|
//! | /api/notificaciones | GET | empresa |
//! | /api/notificaciones/no-leidas | GET | empresa |
//! | /api/notificaciones/{id}/leida | PUT | empresa |
//! | /api/notificaciones/leidas | PUT | empresa |
//! | /api/notificaciones/ws | GET | empresa (token query param) |

mod handler;
mod ws;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/notificaciones", notificacion_routes())
}

fn notificacion_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/no-leidas", get(handler::count_no_leidas))
        .route("/{id}/leida", put(handler::mark_leida))
        .route("/leidas", put(handler::mark_all_leidas))
        .route("/ws", get(ws::notificaciones_ws))
}
