//! Producto repository

use super::{BaseRepository, RepoError, RepoResult, record_key, take_first_error};
use shared::models::{Producto, ProductoUpdate};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCTO_TABLE: &str = "producto";

#[derive(Clone)]
pub struct ProductoRepository {
    base: BaseRepository,
}

impl ProductoRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All active products, optionally restricted to one empresa
    pub async fn find_all_active(&self, empresa_id: Option<&str>) -> RepoResult<Vec<Producto>> {
        let productos: Vec<Producto> = if let Some(empresa_id) = empresa_id {
            self.base
                .db()
                .query(
                    "SELECT *, type::string(id) AS id FROM producto \
                     WHERE activo = true AND empresa = $empresa ORDER BY nombre",
                )
                .bind(("empresa", empresa_id.to_string()))
                .await?
                .take(0)?
        } else {
            self.base
                .db()
                .query(
                    "SELECT *, type::string(id) AS id FROM producto \
                     WHERE activo = true ORDER BY nombre",
                )
                .await?
                .take(0)?
        };
        Ok(productos)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Producto>> {
        let key = record_key(PRODUCTO_TABLE, id);
        let producto: Option<Producto> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", PRODUCTO_TABLE))
            .bind(("key", key))
            .await?
            .take(0)?;
        Ok(producto)
    }

    /// Fetch a batch of products by id (order submission validation)
    pub async fn find_by_ids(&self, ids: &[String]) -> RepoResult<Vec<Producto>> {
        let keys: Vec<String> = ids
            .iter()
            .map(|id| record_key(PRODUCTO_TABLE, id))
            .collect();
        let productos: Vec<Producto> = self
            .base
            .db()
            .query(
                "SELECT *, type::string(id) AS id FROM producto \
                 WHERE record::id(id) IN $keys",
            )
            .bind(("keys", keys))
            .await?
            .take(0)?;
        Ok(productos)
    }

    pub async fn create(&self, producto: Producto) -> RepoResult<Producto> {
        if producto.precio <= rust_decimal::Decimal::ZERO {
            return Err(RepoError::Validation("precio must be positive".into()));
        }

        let mut response = self
            .base
            .db()
            .query("LET $p = (CREATE producto CONTENT $data); SELECT *, type::string(id) AS id FROM $p;")
            .bind(("data", producto))
            .await?;
        take_first_error(&mut response)?;
        let created: Option<Producto> = response.take(1)?;
        created.ok_or_else(|| RepoError::Database("Failed to create producto".to_string()))
    }

    /// Merge-update a product; absent fields stay untouched
    pub async fn update(&self, id: &str, data: ProductoUpdate) -> RepoResult<Producto> {
        if let Some(precio) = data.precio
            && precio <= rust_decimal::Decimal::ZERO
        {
            return Err(RepoError::Validation("precio must be positive".into()));
        }

        // Fold the timestamp into the merge object; MERGE and SET cannot mix
        let mut merge = serde_json::to_value(&data)
            .map_err(|e| RepoError::Database(format!("Failed to encode update: {e}")))?;
        merge["updated_at"] = now_millis().into();

        let key = record_key(PRODUCTO_TABLE, id);
        let mut response = self
            .base
            .db()
            .query(
                "LET $p = (UPDATE type::thing($tb, $key) MERGE $data); \
                 SELECT *, type::string(id) AS id FROM $p;",
            )
            .bind(("tb", PRODUCTO_TABLE))
            .bind(("key", key))
            .bind(("data", merge))
            .await?;
        take_first_error(&mut response)?;
        let updated: Option<Producto> = response.take(1)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("producto {id}")))
    }

    /// Soft delete: the product disappears from listings but stays referenced
    /// by historical pedidos
    pub async fn soft_delete(&self, id: &str) -> RepoResult<bool> {
        let key = record_key(PRODUCTO_TABLE, id);
        let mut response = self
            .base
            .db()
            .query(
                "LET $p = (UPDATE type::thing($tb, $key) SET activo = false, updated_at = $now); \
                 SELECT *, type::string(id) AS id FROM $p;",
            )
            .bind(("tb", PRODUCTO_TABLE))
            .bind(("key", key))
            .bind(("now", now_millis()))
            .await?;
        take_first_error(&mut response)?;
        let updated: Option<Producto> = response.take(1)?;
        Ok(updated.is_some())
    }

    /// Record the stored image path after a successful upload
    pub async fn set_imagen(&self, id: &str, imagen: &str) -> RepoResult<Producto> {
        let key = record_key(PRODUCTO_TABLE, id);
        let mut response = self
            .base
            .db()
            .query(
                "LET $p = (UPDATE type::thing($tb, $key) SET imagen = $imagen, updated_at = $now); \
                 SELECT *, type::string(id) AS id FROM $p;",
            )
            .bind(("tb", PRODUCTO_TABLE))
            .bind(("key", key))
            .bind(("imagen", imagen.to_string()))
            .bind(("now", now_millis()))
            .await?;
        take_first_error(&mut response)?;
        let updated: Option<Producto> = response.take(1)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("producto {id}")))
    }
}
