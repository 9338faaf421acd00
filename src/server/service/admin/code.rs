//! One-time bootstrap code for creating the first platform super admin.
//!
//! When the server starts without any super admin, a random code is generated, logged, and
//! kept in memory. Redeeming it through `POST /api/auth/bootstrap` creates the super admin.
//! The code is single use and expires after `ADMIN_CODE_TTL_SECONDS`.

use rand::Rng;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Time-to-live for bootstrap codes in seconds.
pub const ADMIN_CODE_TTL_SECONDS: u64 = 60;

const CODE_LENGTH: usize = 32;

#[derive(Clone)]
struct AdminCode {
    code: String,
    expires_at: Instant,
}

impl AdminCode {
    fn new(code: String, ttl: Duration) -> Self {
        Self {
            code,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Holds the current bootstrap code, if any. Cloning shares the same code.
#[derive(Clone)]
pub struct AdminCodeService {
    code: Arc<RwLock<Option<AdminCode>>>,
    ttl: Duration,
}

impl AdminCodeService {
    pub fn new() -> Self {
        Self::with_ttl(Duration::from_secs(ADMIN_CODE_TTL_SECONDS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            code: Arc::new(RwLock::new(None)),
            ttl,
        }
    }

    /// Generates a 32 character alphanumeric code, replacing any previous one.
    pub async fn generate(&self) -> String {
        let code = Self::generate_random_code();
        *self.code.write().await = Some(AdminCode::new(code.clone(), self.ttl));
        code
    }

    /// Checks the input against the stored code and consumes it on success.
    ///
    /// An expired code is dropped and never validates. A wrong code leaves the stored code
    /// in place.
    ///
    /// # Returns
    /// - `true` - Code matched and has been consumed
    /// - `false` - No code, expired code, or mismatch
    pub async fn validate_and_consume(&self, input_code: &str) -> bool {
        let mut code = self.code.write().await;

        let Some(stored) = code.as_ref() else {
            return false;
        };

        if stored.is_expired() {
            *code = None;
            return false;
        }

        if stored.code == input_code {
            *code = None;
            return true;
        }

        false
    }

    /// Whether an unexpired code is waiting to be redeemed.
    pub async fn has_valid_code(&self) -> bool {
        self.code
            .read()
            .await
            .as_ref()
            .is_some_and(|code| !code.is_expired())
    }

    fn generate_random_code() -> String {
        const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                                 abcdefghijklmnopqrstuvwxyz\
                                 0123456789";

        let mut rng = rand::rng();

        (0..CODE_LENGTH)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect()
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    /// Expected: a 32 character code that is immediately valid
    #[tokio::test]
    async fn test_generate_code() {
        let service = AdminCodeService::new();
        assert!(!service.has_valid_code().await);

        let code = service.generate().await;
        assert_eq!(code.len(), 32);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        assert!(service.has_valid_code().await);
    }

    /// Expected: the correct code validates once and is then consumed
    #[tokio::test]
    async fn test_code_is_single_use() {
        let service = AdminCodeService::new();
        let code = service.generate().await;

        assert!(service.validate_and_consume(&code).await);
        assert!(!service.has_valid_code().await);
        assert!(!service.validate_and_consume(&code).await);
    }

    /// Expected: a wrong code fails and keeps the stored code usable
    #[tokio::test]
    async fn test_wrong_code_keeps_stored_code() {
        let service = AdminCodeService::new();
        let code = service.generate().await;

        assert!(!service.validate_and_consume("wrong_code").await);
        assert!(service.validate_and_consume(&code).await);
    }

    /// Expected: validation fails when nothing was generated
    #[tokio::test]
    async fn test_validate_without_code() {
        let service = AdminCodeService::new();
        assert!(!service.validate_and_consume("any_code").await);
    }

    /// Expected: regenerating replaces the previous code
    #[tokio::test]
    async fn test_regenerate_replaces_code() {
        let service = AdminCodeService::new();
        let first = service.generate().await;
        let second = service.generate().await;

        assert_ne!(first, second);
        assert!(!service.validate_and_consume(&first).await);
        assert!(service.validate_and_consume(&second).await);
    }

    /// Expected: an expired code never validates
    #[tokio::test]
    async fn test_code_expires_after_ttl() {
        let service = AdminCodeService::with_ttl(Duration::from_millis(50));
        let code = service.generate().await;
        assert!(service.has_valid_code().await);

        sleep(Duration::from_millis(80)).await;

        assert!(!service.has_valid_code().await);
        assert!(!service.validate_and_consume(&code).await);
    }
}
