pub mod auth;
pub mod middleware;
pub mod pages;
pub mod rest;
pub mod state;

use axum::{
    http::{HeaderName, HeaderValue},
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer};

pub use middleware::gatekeeper;
use state::AppState;

/// Headers sent with every response.
const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("x-dns-prefetch-control", "on"),
    ("x-xss-protection", "1; mode=block"),
    ("x-frame-options", "SAMEORIGIN"),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "origin-when-cross-origin"),
];

/// Extra headers on everything under `/fonts`.
const FONT_HEADERS: [(&str, &str); 2] = [
    ("cache-control", "public, max-age=31536000, immutable"),
    ("access-control-allow-origin", "*"),
];

/// Builds the full router: auth API, font files, placeholder pages, the
/// gatekeeper in front of everything and the static security headers on every
/// response.
pub fn router(app_state: Arc<AppState>) -> Router {
    // Public JSON endpoints (skipped by the gatekeeper's path matcher)
    let api_routes = Router::new()
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/logout", post(auth::logout_handler));

    // Static fonts; file extensions keep them out of the gatekeeper
    let mut font_routes: Router<Arc<AppState>> =
        Router::new().nest_service("/fonts", ServeDir::new(&app_state.config.fonts_dir));
    for (name, value) in FONT_HEADERS {
        font_routes = font_routes.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }

    // Locale-prefixed pages
    let page_routes = Router::new()
        .route("/{lang}", get(pages::home))
        .route("/{lang}/", get(pages::home))
        .route("/{lang}/auth/login", get(pages::login))
        .route("/{lang}/{section}", get(pages::section))
        .fallback(pages::not_found);

    let mut app = Router::new()
        .merge(api_routes)
        .merge(font_routes)
        .merge(page_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            gatekeeper,
        ))
        .with_state(app_state);

    for (name, value) in SECURITY_HEADERS {
        app = app.layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }
    app
}
