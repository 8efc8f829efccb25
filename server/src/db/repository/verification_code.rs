//! Verification code repository

use super::{BaseRepository, RepoError, RepoResult, record_key, take_first_error};
use shared::models::VerificationCode;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CODE_TABLE: &str = "verification_code";

#[derive(Clone)]
pub struct VerificationCodeRepository {
    base: BaseRepository,
}

impl VerificationCodeRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, code: VerificationCode) -> RepoResult<VerificationCode> {
        let mut response = self
            .base
            .db()
            .query("LET $c = (CREATE verification_code CONTENT $data); SELECT *, type::string(id) AS id FROM $c;")
            .bind(("data", code))
            .await?;
        take_first_error(&mut response)?;
        let created: Option<VerificationCode> = response.take(1)?;
        created.ok_or_else(|| RepoError::Database("Failed to create verification code".into()))
    }

    /// The most recent unused code for an email, if any
    pub async fn find_latest_active(&self, email: &str) -> RepoResult<Option<VerificationCode>> {
        let code: Option<VerificationCode> = self
            .base
            .db()
            .query(
                "SELECT *, type::string(id) AS id FROM verification_code \
                 WHERE email = $email AND used = false \
                 ORDER BY created_at DESC LIMIT 1",
            )
            .bind(("email", email.to_string()))
            .await?
            .take(0)?;
        Ok(code)
    }

    /// Consume a code so it cannot be replayed
    pub async fn mark_used(&self, id: &str) -> RepoResult<()> {
        let key = record_key(CODE_TABLE, id);
        self.base
            .db()
            .query("UPDATE type::thing($tb, $key) SET used = true")
            .bind(("tb", CODE_TABLE))
            .bind(("key", key))
            .await?
            .check()?;
        Ok(())
    }

    /// Invalidate every outstanding code for an email (resend supersedes)
    pub async fn invalidate_all(&self, email: &str) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE verification_code SET used = true WHERE email = $email AND used = false")
            .bind(("email", email.to_string()))
            .await?
            .check()?;
        Ok(())
    }
}
