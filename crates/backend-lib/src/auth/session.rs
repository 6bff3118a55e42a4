// ============================
// crates/backend-lib/src/auth/session.rs
// ============================
//! Session token handling and management.
use std::{collections::HashMap, sync::Arc, time::{Duration, SystemTime}};

use metrics::{counter, gauge};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::service::VerifiedIdentity;
use crate::metrics::{SESSION_ACTIVE, SESSION_EXPIRED, SESSION_ISSUED, SESSION_REVOKED};

/// Default session TTL (time to live)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 7); // 7 days

/// Server-side session record, bound to one username at creation
#[derive(Clone)]
pub struct Session {
    pub username: String,
    pub created_at: SystemTime,
    pub expires_at: SystemTime,
}

impl Session {
    fn is_live(&self, now: SystemTime) -> bool {
        now < self.expires_at
    }
}

/// Session manager for handling authentication tokens
#[derive(Clone)]
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a new session manager and spawn its cleanup task.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(ttl: Duration) -> Self {
        let manager = SessionManager {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        };

        let manager_clone = manager.clone();
        tokio::spawn(async move {
            manager_clone.cleanup_task().await;
        });

        manager
    }

    /// Issue a fresh token for a verified identity
    pub async fn issue(&self, identity: &VerifiedIdentity) -> String {
        let token = Uuid::new_v4().to_string();
        let now = SystemTime::now();
        let session = Session {
            username: identity.username().to_string(),
            created_at: now,
            expires_at: now + self.ttl,
        };

        let mut sessions = self.sessions.write().await;
        sessions.insert(token.clone(), session);

        counter!(SESSION_ISSUED).increment(1);
        gauge!(SESSION_ACTIVE).set(sessions.len() as f64);

        token
    }

    /// Get the live session for a token, if any. Expired sessions are
    /// indistinguishable from absent ones.
    pub async fn get(&self, token: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions
            .get(token)
            .filter(|session| session.is_live(SystemTime::now()))
            .cloned()
    }

    /// Destroy a session. Succeeds whether or not the token was known.
    pub async fn revoke(&self, token: &str) {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(token).is_some() {
            counter!(SESSION_REVOKED).increment(1);
        }
        gauge!(SESSION_ACTIVE).set(sessions.len() as f64);
    }

    /// Cleanup task that runs periodically to remove expired sessions
    async fn cleanup_task(&self) {
        let cleanup_interval = Duration::from_secs(60 * 60); // 1 hour

        loop {
            tokio::time::sleep(cleanup_interval).await;

            let mut sessions = self.sessions.write().await;
            let now = SystemTime::now();
            let before_count = sessions.len();

            sessions.retain(|_, session| session.is_live(now));

            let removed = before_count - sessions.len();
            if removed > 0 {
                counter!(SESSION_EXPIRED).increment(removed as u64);
                gauge!(SESSION_ACTIVE).set(sessions.len() as f64);
            }
        }
    }
}
