//! Repository module
//!
//! CRUD over the SurrealDB tables. Record ids cross the repository boundary
//! as `"table:key"` strings; every read projects `type::string(id) AS id` so
//! the shared models (`id: Option<String>`) deserialize directly.

pub mod cliente;
pub mod empresa;
pub mod notificacion;
pub mod pedido;
pub mod producto;
pub mod verification_code;

pub use cliente::ClienteRepository;
pub use empresa::EmpresaRepository;
pub use notificacion::NotificacionRepository;
pub use pedido::PedidoRepository;
pub use producto::ProductoRepository;
pub use verification_code::VerificationCodeRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations surface as duplicates, not opaque DB errors
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl From<RepoError> for shared::AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => shared::AppError::not_found(msg),
            RepoError::Duplicate(msg) => shared::AppError::conflict(msg),
            RepoError::Validation(msg) => shared::AppError::validation(msg),
            RepoError::Database(msg) => shared::AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

/// Strip the `"table:"` prefix from an id if present, returning the bare key
pub(crate) fn record_key(table: &str, id: &str) -> String {
    id.strip_prefix(&format!("{table}:"))
        .unwrap_or(id)
        .to_string()
}

/// Surface statement-level errors from a multi-statement response.
///
/// An error raised inside a `LET` statement (a unique index violation on
/// CREATE, most notably) is attached to that statement, and a positional
/// `take` on a later statement skips right past it. Drain the errors first
/// so index violations reach the `Duplicate` mapping.
pub(crate) fn take_first_error(response: &mut surrealdb::Response) -> RepoResult<()> {
    if let Some((_, err)) = response.take_errors().into_iter().next() {
        return Err(err.into());
    }
    Ok(())
}
