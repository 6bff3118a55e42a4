// ==============
// crates/backend-lib/src/metrics.rs

//! Central place for metric keys
pub const ACCOUNT_CREATED: &str = "account.created";
pub const LOGIN_SUCCESS: &str = "login.success";
pub const LOGIN_FAILURE: &str = "login.failure";
pub const SESSION_ISSUED: &str = "session.issued";
pub const SESSION_REVOKED: &str = "session.revoked";
pub const SESSION_EXPIRED: &str = "session.expired";
pub const SESSION_ACTIVE: &str = "session.active";
