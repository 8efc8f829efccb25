//! Health check routes
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/health | GET | none |

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(handler::health))
}
