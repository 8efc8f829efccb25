//! Pedido repository

use super::{BaseRepository, RepoError, RepoResult, record_key, take_first_error};
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{EstadoPedido, Pedido, PedidoStats};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PEDIDO_TABLE: &str = "pedido";

#[derive(Clone)]
pub struct PedidoRepository {
    base: BaseRepository,
}

impl PedidoRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, pedido: Pedido) -> RepoResult<Pedido> {
        let mut response = self
            .base
            .db()
            .query("LET $p = (CREATE pedido CONTENT $data); SELECT *, type::string(id) AS id FROM $p;")
            .bind(("data", pedido))
            .await?;
        take_first_error(&mut response)?;
        let created: Option<Pedido> = response.take(1)?;
        created.ok_or_else(|| RepoError::Database("Failed to create pedido".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Pedido>> {
        let key = record_key(PEDIDO_TABLE, id);
        let pedido: Option<Pedido> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", PEDIDO_TABLE))
            .bind(("key", key))
            .await?
            .take(0)?;
        Ok(pedido)
    }

    /// Orders for one empresa, newest first, optionally filtered by estado
    pub async fn find_by_empresa(
        &self,
        empresa_id: &str,
        estado: Option<EstadoPedido>,
    ) -> RepoResult<Vec<Pedido>> {
        let pedidos: Vec<Pedido> = if let Some(estado) = estado {
            self.base
                .db()
                .query(
                    "SELECT *, type::string(id) AS id FROM pedido \
                     WHERE empresa = $empresa AND estado = $estado \
                     ORDER BY created_at DESC",
                )
                .bind(("empresa", empresa_id.to_string()))
                .bind(("estado", estado.as_str()))
                .await?
                .take(0)?
        } else {
            self.base
                .db()
                .query(
                    "SELECT *, type::string(id) AS id FROM pedido \
                     WHERE empresa = $empresa ORDER BY created_at DESC",
                )
                .bind(("empresa", empresa_id.to_string()))
                .await?
                .take(0)?
        };
        Ok(pedidos)
    }

    /// Orders placed by one cliente, newest first
    pub async fn find_by_cliente(&self, cliente_id: &str) -> RepoResult<Vec<Pedido>> {
        let pedidos: Vec<Pedido> = self
            .base
            .db()
            .query(
                "SELECT *, type::string(id) AS id FROM pedido \
                 WHERE cliente = $cliente ORDER BY created_at DESC",
            )
            .bind(("cliente", cliente_id.to_string()))
            .await?
            .take(0)?;
        Ok(pedidos)
    }

    /// Persist a status change (legality already checked by the handler)
    pub async fn update_estado(&self, id: &str, estado: EstadoPedido) -> RepoResult<Pedido> {
        let key = record_key(PEDIDO_TABLE, id);
        let mut response = self
            .base
            .db()
            .query(
                "LET $p = (UPDATE type::thing($tb, $key) SET estado = $estado, updated_at = $now); \
                 SELECT *, type::string(id) AS id FROM $p;",
            )
            .bind(("tb", PEDIDO_TABLE))
            .bind(("key", key))
            .bind(("estado", estado.as_str()))
            .bind(("now", now_millis()))
            .await?;
        take_first_error(&mut response)?;
        let updated: Option<Pedido> = response.take(1)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("pedido {id}")))
    }

    /// Per-estado counts plus revenue over finished orders
    ///
    /// Decimal totals are stored as strings, which SurrealQL aggregates
    /// skip over, so the folding happens here.
    pub async fn stats(&self, empresa_id: &str) -> RepoResult<PedidoStats> {
        #[derive(Debug, Deserialize)]
        struct Row {
            estado: EstadoPedido,
            total: Decimal,
        }

        let rows: Vec<Row> = self
            .base
            .db()
            .query("SELECT estado, total FROM pedido WHERE empresa = $empresa")
            .bind(("empresa", empresa_id.to_string()))
            .await?
            .take(0)?;

        let mut stats = PedidoStats::default();
        for row in rows {
            match row.estado {
                EstadoPedido::Pendiente => stats.pendientes += 1,
                EstadoPedido::EnProceso => stats.en_proceso += 1,
                EstadoPedido::Finalizado => {
                    stats.finalizados += 1;
                    stats.ingresos += row.total;
                }
                EstadoPedido::Cancelado => stats.cancelados += 1,
            }
            stats.total_pedidos += 1;
        }

        Ok(stats)
    }
}
