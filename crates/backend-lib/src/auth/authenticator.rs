// ============================
// crates/backend-lib/src/auth/authenticator.rs
// ============================
//! Default `AuthService` implementation over a credential store.
use async_trait::async_trait;
use metrics::counter;

use super::password::{hash_password_secure, verify_password};
use super::service::{AuthService, VerifiedIdentity};
use crate::error::AppError;
use crate::metrics::{ACCOUNT_CREATED, LOGIN_FAILURE, LOGIN_SUCCESS};
use crate::store::{Account, CredentialStore, StoreError};
use crate::validation::validate_credentials;

/// Authenticator backed by an injected credential store.
///
/// Holds no state of its own; uniqueness and persistence live in the store,
/// so concurrent calls need no coordination here.
pub struct Authenticator<S> {
    store: S,
}

impl<S: CredentialStore> Authenticator<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: CredentialStore> AuthService for Authenticator<S> {
    async fn register(&self, username: &str, mut password: String) -> Result<(), AppError> {
        validate_credentials(username, &password)?;

        // Hash before touching the store; the plaintext is wiped here and
        // never persisted or logged.
        let password_hash =
            hash_password_secure(&mut password).map_err(|e| AppError::Internal(e.to_string()))?;

        // No existence pre-check: the store's uniqueness constraint is the
        // only authority, which closes the check-then-insert race.
        match self.store.create(Account::new(username.to_string(), password_hash)).await {
            Ok(()) => {
                counter!(ACCOUNT_CREATED).increment(1);
                tracing::info!(username, "account registered");
                Ok(())
            },
            Err(StoreError::Conflict) => Err(AppError::UsernameTaken),
            Err(e) => Err(e.into()),
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<VerifiedIdentity, AppError> {
        if username.is_empty() {
            return Err(AppError::EmptyField("username"));
        }
        if password.is_empty() {
            return Err(AppError::EmptyField("password"));
        }

        // Unknown username and wrong password fall through to the same
        // outward signal; the distinction exists only in the log.
        let account = match self.store.find_by_username(username).await? {
            Some(account) => account,
            None => {
                counter!(LOGIN_FAILURE).increment(1);
                tracing::debug!(username, "login failed: unknown username");
                return Err(AppError::AuthFailed);
            },
        };

        if !verify_password(&account.password_hash, password) {
            counter!(LOGIN_FAILURE).increment(1);
            tracing::debug!(username, "login failed: password mismatch");
            return Err(AppError::AuthFailed);
        }

        counter!(LOGIN_SUCCESS).increment(1);
        tracing::info!(username, "login succeeded");
        Ok(VerifiedIdentity::new(account.username))
    }
}
