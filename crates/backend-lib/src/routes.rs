// ============================
// crates/backend-lib/src/routes.rs
// ============================
//! HTTP router and handlers.
//!
//! A thin layer over the core: it parses requests, calls the authenticator
//! and session gate, and maps outcomes to JSON responses. No auth decision
//! is made here.
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use gatekeeper_common::{
    DashboardResponse, LoginRequest, MessageResponse, RegisterRequest, SessionResponse,
};
use tower_http::trace::TraceLayer;

use crate::auth::Admission;
use crate::error::AppError;
use crate::AppState;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/dashboard", get(dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Extract the bearer token from the Authorization header, if present
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// `POST /register` - create a new account
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.auth.register(&req.username, req.password).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Registration successful! Please log in.".to_string(),
        }),
    ))
}

/// `POST /login` - verify credentials and stamp a session
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let identity = state.auth.login(&req.username, &req.password).await?;
    let session_token = state.gate.establish(&identity).await;

    Ok(Json(SessionResponse {
        username: identity.username().to_string(),
        session_token,
    }))
}

/// `POST /logout` - destroy the presented session
async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    if let Some(token) = bearer_token(&headers) {
        state.gate.logout(token).await;
    }

    Ok(Json(MessageResponse {
        message: "You have been logged out.".to_string(),
    }))
}

/// `GET /dashboard` - the protected resource; admission via the session gate
async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    match state.gate.admit(bearer_token(&headers)).await {
        Admission::Granted { username } => Ok(Json(DashboardResponse {
            message: format!("Welcome, {username}!"),
            username,
        })),
        Admission::Denied => Err(AppError::SessionRequired),
    }
}
