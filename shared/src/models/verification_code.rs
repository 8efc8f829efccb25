//! Email verification code model

use serde::{Deserialize, Serialize};

/// Verification code issued at registration (and on resend)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationCode {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Normalized email the code was issued for
    pub email: String,
    /// 6-digit code
    pub code: String,
    /// Unix millis after which the code is rejected
    pub expires_at: i64,
    /// Set once consumed or superseded by a resend
    pub used: bool,
    pub created_at: i64,
}

impl VerificationCode {
    pub fn is_expired(&self, now_millis: i64) -> bool {
        now_millis >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(expires_at: i64) -> VerificationCode {
        VerificationCode {
            id: None,
            email: "a@b.com".into(),
            code: "123456".into(),
            expires_at,
            used: false,
            created_at: 0,
        }
    }

    #[test]
    fn expiry_is_inclusive_at_the_boundary() {
        let c = code(1_000);
        assert!(!c.is_expired(999));
        assert!(c.is_expired(1_000));
        assert!(c.is_expired(1_001));
    }
}
