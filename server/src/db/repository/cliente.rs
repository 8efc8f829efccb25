//! Cliente repository

use super::{BaseRepository, RepoError, RepoResult, record_key, take_first_error};
use shared::models::Cliente;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CLIENTE_TABLE: &str = "cliente";

#[derive(Clone)]
pub struct ClienteRepository {
    base: BaseRepository,
}

impl ClienteRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a cliente by normalized email
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Cliente>> {
        let cliente: Option<Cliente> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM cliente WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(cliente)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Cliente>> {
        let key = record_key(CLIENTE_TABLE, id);
        let cliente: Option<Cliente> = self
            .base
            .db()
            .query("SELECT *, type::string(id) AS id FROM type::thing($tb, $key)")
            .bind(("tb", CLIENTE_TABLE))
            .bind(("key", key))
            .await?
            .take(0)?;
        Ok(cliente)
    }

    /// Insert a new cliente (password already hashed by the caller)
    pub async fn create(&self, cliente: Cliente) -> RepoResult<Cliente> {
        let mut response = self
            .base
            .db()
            .query("LET $c = (CREATE cliente CONTENT $data); SELECT *, type::string(id) AS id FROM $c;")
            .bind(("data", cliente))
            .await?;
        take_first_error(&mut response)?;
        let created: Option<Cliente> = response.take(1)?;
        created.ok_or_else(|| RepoError::Database("Failed to create cliente".to_string()))
    }

    /// Flip the verificado flag after a successful code confirmation
    pub async fn mark_verificado(&self, email: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE cliente SET verificado = true WHERE email = $email")
            .bind(("email", email.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}
