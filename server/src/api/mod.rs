//! API route modules
//!
//! # Structure
//!
//! - [`health`] - liveness probe
//! - [`auth`] - registration, email verification, login
//! - [`empresas`] - public storefront directory
//! - [`productos`] - catalog CRUD and image upload
//! - [`pedidos`] - order submission, listing and status lifecycle
//! - [`notificaciones`] - dashboard notifications (REST + WebSocket)

pub mod auth;
pub mod empresas;
pub mod health;
pub mod notificaciones;
pub mod pedidos;
pub mod productos;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(empresas::router())
        .merge(productos::router())
        .merge(pedidos::router())
        .merge(notificaciones::router())
}

/// Build the fully configured application with middleware and state
pub fn router(state: ServerState) -> Router {
    let uploads = ServeDir::new(state.config.uploads_dir());

    build_router()
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
        .with_state(state)
}
