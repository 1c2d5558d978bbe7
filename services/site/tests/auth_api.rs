#![allow(clippy::unwrap_used, clippy::expect_used)]
//! The mock login/logout endpoints, and signing in through them.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};

use common::{app, body_string, gated_app, get, header_str, send, set_cookies};

fn login_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn valid_credentials_return_user_and_token() {
    let app = app();
    let body = json!({"email": "doctor@example.com", "password": "password123"}).to_string();
    let response = send(&app, login_request(&body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 1);
    assert!(cookies[0].starts_with("session-token="));
    assert!(cookies[0].contains("HttpOnly"));

    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        json,
        json!({
            "user": {"id": 2, "name": "Doctor User", "email": "doctor@example.com", "role": "doctor"},
            "token": "mock-jwt-token"
        })
    );
}

#[tokio::test]
async fn wrong_password_is_401() {
    let app = app();
    let body = json!({"email": "admin@example.com", "password": "nope"}).to_string();
    let response = send(&app, login_request(&body)).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookies(&response).is_empty());
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json, json!({"error": "Invalid credentials"}));
}

#[tokio::test]
async fn body_that_is_not_json_is_400() {
    let app = app();
    for body in ["not json", "", "null", r#"{"email": "admin@example.com""#] {
        let response = send(&app, login_request(body)).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json, json!({"error": "Invalid request"}));
    }
}

#[tokio::test]
async fn missing_or_mistyped_fields_are_invalid_credentials() {
    let app = app();
    for body in [
        r#"{"email": "admin@example.com"}"#,
        r#"{"email": "admin@example.com", "password": 123}"#,
        r#"{}"#,
        "[1, 2]",
        "42",
    ] {
        let response = send(&app, login_request(body)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{body}");
        assert!(set_cookies(&response).is_empty());
        let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json, json!({"error": "Invalid credentials"}));
    }
}

#[tokio::test]
async fn content_type_is_not_required() {
    let app = app();
    let body = json!({"email": "admin@example.com", "password": "password123"}).to_string();
    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/auth/login")
            .body(Body::from(body))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(json["user"]["role"], "admin");
}

#[tokio::test]
async fn api_routes_are_not_locale_redirected() {
    let app = app();
    let body = json!({"email": "guest@example.com", "password": "password123"}).to_string();
    let response = send(&app, login_request(&body)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, "x-pathname"), None);
}

#[tokio::test]
async fn logout_clears_the_session_cookie() {
    let app = app();
    let response = send(
        &app,
        Request::builder()
            .method("POST")
            .uri("/api/auth/logout")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        set_cookies(&response),
        vec!["session-token=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0".to_string()]
    );
}

#[tokio::test]
async fn session_from_login_opens_the_matching_dashboard() {
    let app = gated_app();
    let body = json!({"email": "client@example.com", "password": "password123"}).to_string();
    let login = send(&app, login_request(&body)).await;
    let session = set_cookies(&login)[0]
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let own = send(
        &app,
        get("/en/client")
            .header(header::COOKIE, session.clone())
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(own.status(), StatusCode::OK);

    let other = send(
        &app,
        get("/en/doctor")
            .header(header::COOKIE, session)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(header_str(&other, "location"), Some("/en/unauthorized"));
}
