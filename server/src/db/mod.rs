//! Database module
//!
//! Embedded SurrealDB (RocksDB engine) plus the repository layer.

pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

use shared::AppError;

/// Statements applied at every startup; all are idempotent
const SCHEMA: &str = "
    DEFINE TABLE IF NOT EXISTS cliente SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS cliente_email ON cliente FIELDS email UNIQUE;

    DEFINE TABLE IF NOT EXISTS empresa SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS empresa_email ON empresa FIELDS email UNIQUE;

    DEFINE TABLE IF NOT EXISTS producto SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS producto_empresa ON producto FIELDS empresa;

    DEFINE TABLE IF NOT EXISTS pedido SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS pedido_empresa ON pedido FIELDS empresa;
    DEFINE INDEX IF NOT EXISTS pedido_cliente ON pedido FIELDS cliente;

    DEFINE TABLE IF NOT EXISTS verification_code SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS verification_code_email ON verification_code FIELDS email;

    DEFINE TABLE IF NOT EXISTS notificacion SCHEMALESS;
    DEFINE INDEX IF NOT EXISTS notificacion_empresa ON notificacion FIELDS empresa;
";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the database at `db_path` and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns("mercado")
            .use_db("mercado")
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!(path = %db_path, "Database opened (embedded SurrealDB)");

        Ok(Self { db })
    }
}
