//! Notificacion repository

use super::{BaseRepository, RepoError, RepoResult, record_key, take_first_error};
use serde::Deserialize;
use shared::models::Notificacion;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const NOTIFICACION_TABLE: &str = "notificacion";

/// Listings are capped; the dashboard only ever shows recent history
const LIST_LIMIT: usize = 100;

#[derive(Clone)]
pub struct NotificacionRepository {
    base: BaseRepository,
}

impl NotificacionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, notificacion: Notificacion) -> RepoResult<Notificacion> {
        let mut response = self
            .base
            .db()
            .query("LET $n = (CREATE notificacion CONTENT $data); SELECT *, type::string(id) AS id FROM $n;")
            .bind(("data", notificacion))
            .await?;
        take_first_error(&mut response)?;
        let created: Option<Notificacion> = response.take(1)?;
        created.ok_or_else(|| RepoError::Database("Failed to create notificacion".into()))
    }

    /// Recent notifications for one empresa, newest first
    pub async fn find_by_empresa(&self, empresa_id: &str) -> RepoResult<Vec<Notificacion>> {
        let notificaciones: Vec<Notificacion> = self
            .base
            .db()
            .query(
                "SELECT *, type::string(id) AS id FROM notificacion \
                 WHERE empresa = $empresa ORDER BY createdAt DESC LIMIT $limit",
            )
            .bind(("empresa", empresa_id.to_string()))
            .bind(("limit", LIST_LIMIT))
            .await?
            .take(0)?;
        Ok(notificaciones)
    }

    /// Unread count, sent in the WebSocket welcome frame
    pub async fn count_no_leidas(&self, empresa_id: &str) -> RepoResult<u64> {
        #[derive(Debug, Deserialize)]
        struct Count {
            n: u64,
        }

        let count: Option<Count> = self
            .base
            .db()
            .query(
                "SELECT count() AS n FROM notificacion \
                 WHERE empresa = $empresa AND leida = false GROUP ALL",
            )
            .bind(("empresa", empresa_id.to_string()))
            .await?
            .take(0)?;
        Ok(count.map(|c| c.n).unwrap_or(0))
    }

    /// Mark one notification read; ownership is part of the WHERE clause
    pub async fn mark_leida(&self, id: &str, empresa_id: &str) -> RepoResult<bool> {
        let key = record_key(NOTIFICACION_TABLE, id);
        let mut response = self
            .base
            .db()
            .query(
                "LET $n = (UPDATE type::thing($tb, $key) SET leida = true \
                 WHERE empresa = $empresa); \
                 SELECT *, type::string(id) AS id FROM $n;",
            )
            .bind(("tb", NOTIFICACION_TABLE))
            .bind(("key", key))
            .bind(("empresa", empresa_id.to_string()))
            .await?;
        take_first_error(&mut response)?;
        let updated: Option<Notificacion> = response.take(1)?;
        Ok(updated.is_some())
    }

    /// Mark everything read for one empresa
    pub async fn mark_all_leidas(&self, empresa_id: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE notificacion SET leida = true WHERE empresa = $empresa AND leida = false")
            .bind(("empresa", empresa_id.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}
