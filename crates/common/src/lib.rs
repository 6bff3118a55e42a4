// ================
// common/src/lib.rs
// ================
//! Request and response bodies shared between the Gatekeeper server
//! and its clients.

use serde::{Deserialize, Serialize};

/// Body of a registration request
/// # Fields
/// * `username` - Desired account name (case-sensitive, max 80 bytes)
/// * `password` - Plaintext password; hashed server-side, never stored
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Body of a login request
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response to a successful login
/// # Fields
/// * `username` - The authenticated account name
/// * `session_token` - Opaque token to present on subsequent requests
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SessionResponse {
    pub username: String,
    pub session_token: String,
}

/// Generic acknowledgement body for registration and logout
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MessageResponse {
    pub message: String,
}

/// Body returned by the protected dashboard resource
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DashboardResponse {
    /// Identity bound to the admitted session
    pub username: String,
    pub message: String,
}
