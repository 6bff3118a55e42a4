// ============================
// crates/backend-lib/src/lib.rs
// ============================
//! Core library for the Gatekeeper credential-management service.

pub mod auth;
pub mod config;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod store;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::{AuthService, Authenticator, SessionGate, SessionManager};
use crate::config::Settings;
use crate::store::CredentialStore;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Authentication service
    pub auth: Arc<dyn AuthService>,
    /// Session gate for protected resources
    pub gate: SessionGate,
    /// Settings
    pub settings: Arc<Settings>,
}

impl AppState {
    /// Create a new application state over an injected credential store.
    ///
    /// The store handle is passed in explicitly; there is no ambient
    /// connection or process-wide session object.
    pub fn new<S: CredentialStore + 'static>(store: S, settings: Settings) -> Self {
        let sessions = Arc::new(SessionManager::new(Duration::from_secs(
            settings.session_ttl_secs,
        )));
        let gate = SessionGate::new(sessions);
        let auth: Arc<dyn AuthService> = Arc::new(Authenticator::new(store));

        Self {
            auth,
            gate,
            settings: Arc::new(settings),
        }
    }
}
