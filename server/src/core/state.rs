use std::path::PathBuf;
use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::{Config, ServerError};
use crate::db::DbService;
use crate::db::repository::{
    ClienteRepository, EmpresaRepository, NotificacionRepository, PedidoRepository,
    ProductoRepository, VerificationCodeRepository,
};
use crate::notify::NotifyHub;

/// Shared application state
///
/// Holds the embedded database, the JWT service and the notification
/// hub. `Clone` is a shallow copy; every handler gets its own handle.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// Embedded database (SurrealDB, RocksDB engine)
    pub db: Surreal<Db>,
    pub jwt_service: Arc<JwtService>,
    /// Per-empresa notification broadcast channels
    pub notify: NotifyHub,
}

impl ServerState {
    /// Initialize the full state: work directory, database, services
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("mercado.db");
        let db_service = DbService::new(&db_path.to_string_lossy())
            .await
            .map_err(|e| ServerError::Database(e.to_string()))?;

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            notify: NotifyHub::new(),
        })
    }

    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    // Repositories are thin wrappers over the shared handle

    pub fn clientes(&self) -> ClienteRepository {
        ClienteRepository::new(self.db.clone())
    }

    pub fn empresas(&self) -> EmpresaRepository {
        EmpresaRepository::new(self.db.clone())
    }

    pub fn productos(&self) -> ProductoRepository {
        ProductoRepository::new(self.db.clone())
    }

    pub fn pedidos(&self) -> PedidoRepository {
        PedidoRepository::new(self.db.clone())
    }

    pub fn verification_codes(&self) -> VerificationCodeRepository {
        VerificationCodeRepository::new(self.db.clone())
    }

    pub fn notificaciones(&self) -> NotificacionRepository {
        NotificacionRepository::new(self.db.clone())
    }
}
