// ============================
// crates/backend-lib/src/store.rs
// ============================
//! Credential storage abstraction with flat-file and in-memory
//! implementations.
//!
//! Uniqueness is enforced by the store itself, never by a check-then-insert
//! in the caller: `create` is atomic with the existence check, so two
//! concurrent registrations of the same username resolve to exactly one
//! success and one `Conflict`.
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{fs as tokio_fs, io::AsyncWriteExt};

/// A persisted account record.
///
/// `username` is the natural key. `password_hash` is a scrypt PHC string;
/// the plaintext password never reaches this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            username,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Errors surfaced by a credential store
#[derive(Error, Debug)]
pub enum StoreError {
    /// An account with the same username already exists
    #[error("account already exists")]
    Conflict,

    #[error("store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt account record: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Trait for credential store backends
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Exact-match lookup by username. No side effects.
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError>;

    /// Persist a new account. Atomic with the existence check: fails with
    /// `StoreError::Conflict` when the username is already taken, and never
    /// leaves a half-written record behind.
    async fn create(&self, account: Account) -> Result<(), StoreError>;
}

/// Flat-file implementation of the `CredentialStore` trait.
///
/// One JSON file per account under `<root>/accounts/`. The filename is the
/// URL-safe base64 of the username, which keeps arbitrary (case-sensitive)
/// usernames filesystem-safe without collisions.
#[derive(Clone)]
pub struct FlatFileStore {
    root: PathBuf,
}

impl FlatFileStore {
    pub fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(root.join("accounts"))?;
        Ok(Self { root })
    }

    fn account_path(&self, username: &str) -> PathBuf {
        let encoded = URL_SAFE_NO_PAD.encode(username.as_bytes());
        self.root.join("accounts").join(format!("{encoded}.json"))
    }
}

#[async_trait]
impl CredentialStore for FlatFileStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        let path = self.account_path(username);

        let content = match tokio_fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let account: Account = serde_json::from_str(&content)?;
        Ok(Some(account))
    }

    async fn create(&self, account: Account) -> Result<(), StoreError> {
        let path = self.account_path(&account.username);
        let json = serde_json::to_string_pretty(&account)?;

        // create_new makes the existence check and the insert a single
        // filesystem operation; losing the race maps to Conflict.
        let mut file = match tokio_fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StoreError::Conflict);
            },
            Err(e) => return Err(e.into()),
        };

        // No partial state: a failed write or flush drops the half-written
        // file before surfacing, so the username is not wedged. tokio's fs
        // hands writes to a blocking task, so an IO error may only show up
        // at flush.
        if let Err(e) = file.write_all(json.as_bytes()).await {
            let _ = tokio_fs::remove_file(&path).await;
            return Err(e.into());
        }

        if let Err(e) = file.flush().await {
            let _ = tokio_fs::remove_file(&path).await;
            return Err(e.into());
        }

        Ok(())
    }
}

/// In-memory implementation backed by a concurrent map. Used by tests and
/// available as a dev backend.
#[derive(Clone, Default)]
pub struct MemoryStore {
    accounts: std::sync::Arc<DashMap<String, Account>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.get(username).map(|entry| entry.value().clone()))
    }

    async fn create(&self, account: Account) -> Result<(), StoreError> {
        // The entry API holds the shard lock across check and insert
        match self.accounts.entry(account.username.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => Err(StoreError::Conflict),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(account);
                Ok(())
            },
        }
    }
}
