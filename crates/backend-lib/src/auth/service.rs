// ============================
// crates/backend-lib/src/auth/service.rs
// ============================
//! The authentication service seam.
use async_trait::async_trait;

use crate::error::AppError;

/// Proof of a successful password verification.
///
/// This is the only value the session gate accepts when establishing a
/// session, and only `login` produces it: a session token therefore always
/// implies a prior successful verification for the bound username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    username: String,
}

impl VerifiedIdentity {
    pub(crate) fn new(username: String) -> Self {
        Self { username }
    }

    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Registration and login, independent of the storage backend.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create a new account. The plaintext password is consumed and wiped
    /// after hashing.
    async fn register(&self, username: &str, password: String) -> Result<(), AppError>;

    /// Verify a login attempt. Unknown usernames and wrong passwords both
    /// surface `AppError::AuthFailed`.
    async fn login(&self, username: &str, password: &str)
        -> Result<VerifiedIdentity, AppError>;
}
