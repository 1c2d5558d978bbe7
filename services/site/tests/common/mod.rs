#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Shared helpers for the integration tests.
//!
//! Every test builds the real router with the real adapters; only the
//! configuration is injected instead of read from the environment.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use chrono::Duration;
use healthbook_core::{Role, SessionService, User};
use http_body_util::BodyExt;
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

use site_lib::adapters::{JwtSessionService, MockCredentialStore};
use site_lib::config::Config;
use site_lib::gatekeeper::Gatekeeper;
use site_lib::web::{router, state::AppState};

pub const SECRET: &str = "integration-test-secret";

pub fn config(extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::new();
    vars.insert("AUTH_SECRET".to_string(), SECRET.to_string());
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(|key| vars.get(key).cloned()).expect("valid test config")
}

/// The full application with the given extra environment.
pub fn app_with(extra: &[(&str, &str)]) -> Router {
    let config = Arc::new(config(extra));
    let sessions: Arc<dyn SessionService> =
        Arc::new(JwtSessionService::new(&config.auth_secret, config.session_ttl));
    let gatekeeper =
        Arc::new(Gatekeeper::new(config.gatekeeper_settings(), sessions.clone()).unwrap());
    let state = Arc::new(AppState {
        config,
        gatekeeper,
        credentials: Arc::new(MockCredentialStore::new().unwrap()),
        sessions,
    });
    router(state)
}

/// Locale routing only (the default configuration).
pub fn app() -> Router {
    app_with(&[])
}

/// Locale routing plus the role gate.
pub fn gated_app() -> Router {
    app_with(&[("ENFORCE_ROLES", "true")])
}

/// A valid session token for a user with `role`.
pub fn token_for(role: Role) -> String {
    let sessions = JwtSessionService::new(SECRET, Duration::days(1));
    let user = User {
        id: 99,
        name: "Test User".to_string(),
        email: format!("{}@example.com", role),
        role,
    };
    sessions.issue(&user, "mock-jwt-token").unwrap()
}

pub fn get(path: &str) -> axum::http::request::Builder {
    Request::builder().method("GET").uri(path)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn header_str<'a>(response: &'a Response<Body>, name: &str) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}
