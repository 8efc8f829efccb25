//! Producto API module
//!
//! Catalog reads are public; mutations require the owning empresa.

mod handler;
mod upload;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/productos", producto_routes())
}

fn producto_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/imagen", post(upload::upload_imagen))
}
