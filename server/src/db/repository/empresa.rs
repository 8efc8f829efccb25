//! Empresa repository

use super::{BaseRepository, RepoError, RepoResult, record_key, take_first_error};
use shared::models::Empresa;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const EMPRESA_TABLE: &str = "empresa";

#[derive(Clone)]
pub struct EmpresaRepository {
    base: BaseRepository,
}

impl EmpresaRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find an empresa by normalized email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Empresa>> {
        let empresa: Option<Empresa> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM empresa WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(empresa)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Empresa>> {
        let key = record_key(EMPRESA_TABLE, id);
        let empresa: Option<Empresa> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", EMPRESA_TABLE))
            .bind(("key", key))
            .await?
            .take(0)?;
        Ok(empresa)
    }

    /// Verified empresas, for the buyer-facing listing
    pub async fn find_all_verified(&self) -> RepoResult<Vec<Empresa>> {
        let empresas: Vec<Empresa> = self
            .base
            .db()
            .query(
                "SELECT *, type::string(id) AS id FROM empresa \
                 WHERE verificado = true ORDER BY nombre",
            )
            .await?
            .take(0)?;
        Ok(empresas)
    }

    /// Insert a new empresa (password already hashed by the caller)
    pub async fn create(&self, empresa: Empresa) -> RepoResult<Empresa> {
        let mut response = self
            .base
            .db()
            .query("LET $e = (CREATE empresa CONTENT $data); SELECT *, type::string(id) AS id FROM $e;")
            .bind(("data", empresa))
            .await?;
        take_first_error(&mut response)?;
        let created: Option<Empresa> = response.take(1)?;
        created.ok_or_else(|| RepoError::Database("Failed to create empresa".to_string()))
    }

    /// Flip the verificado flag after a successful code confirmation
    pub async fn mark_verificado(&self, email: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE empresa SET verificado = true WHERE email = $email")
            .bind(("email", email.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}
