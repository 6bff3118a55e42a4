// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod gate;
pub mod password;
pub mod session;
mod authenticator;
mod service;

pub use authenticator::Authenticator;
pub use gate::{Admission, SessionGate};
pub use password::{hash_password, hash_password_secure, verify_password};
pub use service::{AuthService, VerifiedIdentity};
pub use session::{Session, SessionManager, DEFAULT_SESSION_TTL};
