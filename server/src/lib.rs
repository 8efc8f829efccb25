//! Mercado API server
//!
//! Backend for the marketplace connecting empresa sellers with cliente
//! buyers.
//!
//! # Module structure
//!
//! ```text
//! server/src/
//! ├── core/       # config, state, server, errors
//! ├── auth/       # JWT, argon2 passwords, middleware, extractor
//! ├── api/        # HTTP routes and handlers
//! ├── db/         # embedded SurrealDB + repositories
//! ├── notify/     # WebSocket notification hub
//! └── utils/      # logging, validation helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod notify;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use notify::NotifyHub;
pub use utils::logger::{init_logger, init_logger_with_file};

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
   __  ___                     __
  /  |/  /__ ___________ _____/ /__
 / /|_/ / -_) __/ __/ _ `/ _  / _ \
/_/  /_/\__/_/  \__/\_,_/\_,_/\___/
    "#
    );
}

/// Load .env, then initialize logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional
    let _ = dotenv::dotenv();

    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(
        std::env::var("LOG_LEVEL").ok().as_deref(),
        log_dir.as_deref(),
    );

    Ok(())
}
