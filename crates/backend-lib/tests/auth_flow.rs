// crates/backend-lib/tests/auth_flow.rs
//! End-to-end tests of the HTTP surface: register, login, admission to the
//! protected dashboard, logout.
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use backend_lib::{config::Settings, routes::create_router, store::MemoryStore, AppState};
use tower::ServiceExt;

fn test_app() -> Router {
    let state = Arc::new(AppState::new(MemoryStore::new(), Settings::default()));
    create_router(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

fn credentials(username: &str, password: &str) -> serde_json::Value {
    serde_json::json!({ "username": username, "password": password })
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let app = test_app();

    // register alice
    let (status, body) = send(
        &app,
        "POST",
        "/register",
        Some(credentials("alice", "Secret123")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Registration successful! Please log in.");

    // login
    let (status, body) = send(
        &app,
        "POST",
        "/login",
        Some(credentials("alice", "Secret123")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    let token = body["session_token"].as_str().unwrap().to_string();
    assert!(!token.is_empty());

    // protected resource admits with the session, exposing the identity
    let (status, body) = send(&app, "GET", "/dashboard", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");

    // logout clears the session
    let (status, _) = send(&app, "POST", "/logout", None, Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    // the same token is now denied
    let (status, body) = send(&app, "GET", "/dashboard", None, Some(&token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_002");
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = test_app();

    let (status, _) = send(
        &app,
        "POST",
        "/register",
        Some(credentials("alice", "Secret123")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/register",
        Some(credentials("alice", "Different456")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "VAL_003");

    // First credentials still log in
    let (status, _) = send(
        &app,
        "POST",
        "/login",
        Some(credentials("alice", "Secret123")),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_empty_fields_rejected() {
    let app = test_app();

    for (username, password) in [("", "Secret123"), ("alice", "")] {
        let (status, body) = send(
            &app,
            "POST",
            "/register",
            Some(credentials(username, password)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VAL_001");

        let (status, body) = send(
            &app,
            "POST",
            "/login",
            Some(credentials(username, password)),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VAL_001");
    }
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = test_app();

    send(
        &app,
        "POST",
        "/register",
        Some(credentials("alice", "Secret123")),
        None,
    )
    .await;

    let wrong_password = send(
        &app,
        "POST",
        "/login",
        Some(credentials("alice", "WrongPass1")),
        None,
    )
    .await;
    let unknown_user = send(
        &app,
        "POST",
        "/login",
        Some(credentials("mallory", "WrongPass1")),
        None,
    )
    .await;

    // Identical status and identical body: nothing to enumerate usernames by
    assert_eq!(wrong_password.0, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password, unknown_user);
}

#[tokio::test]
async fn test_dashboard_denied_without_session() {
    let app = test_app();

    let (status, _) = send(&app, "GET", "/dashboard", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/dashboard", None, Some("fabricated-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_without_session_still_succeeds() {
    let app = test_app();
    let (status, body) = send(&app, "POST", "/logout", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "You have been logged out.");
}

#[tokio::test]
async fn test_concurrent_registrations_single_winner() {
    let app = test_app();
    let n = 8;

    let handles: Vec<_> = (0..n)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move {
                let body = credentials("alice", &format!("Secret{i}"));
                let request = Request::builder()
                    .method("POST")
                    .uri("/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&body).unwrap()))
                    .unwrap();
                app.oneshot(request).await.unwrap().status()
            })
        })
        .collect();

    let mut created = 0;
    let mut conflicted = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => conflicted += 1,
            other => panic!("unexpected status: {other}"),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(conflicted, n - 1);
}
