//! Auth API module
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/auth/register/cliente | POST | none |
//! | /api/auth/register/empresa | POST | none |
//! | /api/auth/verify | POST | none |
//! | /api/auth/resend-code | POST | none |
//! | /api/auth/login | POST | none |
//! | /api/auth/me | GET | bearer |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", auth_routes())
}

fn auth_routes() -> Router<ServerState> {
    Router::new()
        .route("/register/cliente", post(handler::register_cliente))
        .route("/register/empresa", post(handler::register_empresa))
        .route("/verify", post(handler::verify_email))
        .route("/resend-code", post(handler::resend_code))
        .route("/login", post(handler::login))
        .route("/me", get(handler::me))
}
