// ============================
// crates/backend-lib/src/auth/gate.rs
// ============================
//! Session gate: admission decisions for protected resources.
use std::sync::Arc;

use super::service::VerifiedIdentity;
use super::session::SessionManager;

/// Outcome of an admission check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Session is live; the bound username is exposed to the resource
    Granted { username: String },
    /// No token, unknown token, or expired session
    Denied,
}

/// Gates protected operations behind a live session.
///
/// The gate trusts the binding established at login and never re-verifies
/// the password on admitted requests. That trust boundary is deliberate:
/// a session outliving a (hypothetical) credential change is accepted.
#[derive(Clone)]
pub struct SessionGate {
    sessions: Arc<SessionManager>,
}

impl SessionGate {
    pub fn new(sessions: Arc<SessionManager>) -> Self {
        Self { sessions }
    }

    /// Stamp a session for a verified identity and return its token.
    ///
    /// `VerifiedIdentity` is only produced by a successful login, so every
    /// token handed out here implies a prior password verification.
    pub async fn establish(&self, identity: &VerifiedIdentity) -> String {
        self.sessions.issue(identity).await
    }

    /// Decide admission for a request presenting `token`
    pub async fn admit(&self, token: Option<&str>) -> Admission {
        let Some(token) = token else {
            return Admission::Denied;
        };

        match self.sessions.get(token).await {
            Some(session) => Admission::Granted {
                username: session.username,
            },
            None => Admission::Denied,
        }
    }

    /// Explicit logout. Always succeeds, even for unknown tokens.
    pub async fn logout(&self, token: &str) {
        self.sessions.revoke(token).await;
    }
}
