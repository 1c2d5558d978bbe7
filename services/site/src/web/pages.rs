//! services/site/src/web/pages.rs
//!
//! Placeholder page handlers. They answer with a short plain-text body naming
//! the page, its locale and text direction; real content lives elsewhere.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
};
use healthbook_core::{Locale, ProtectedArea};
use std::sync::Arc;

use crate::gatekeeper::negotiation::supported_locale;
use crate::web::middleware::X_PATHNAME;
use crate::web::state::AppState;

type PageResponse = (StatusCode, String);

fn render(status: StatusCode, title: &str, locale: Locale) -> PageResponse {
    (
        status,
        format!("{title}\nlang={locale} dir={}\n", locale.direction()),
    )
}

fn page_locale(state: &AppState, tag: &str) -> Option<Locale> {
    supported_locale(tag, &state.config.supported_locales)
}

/// GET /{lang}
pub async fn home(State(state): State<Arc<AppState>>, Path(lang): Path<String>) -> PageResponse {
    match page_locale(&state, &lang) {
        Some(locale) => render(StatusCode::OK, "Home", locale),
        None => render(StatusCode::NOT_FOUND, "Page not found", state.config.default_locale),
    }
}

/// GET /{lang}/auth/login
pub async fn login(State(state): State<Arc<AppState>>, Path(lang): Path<String>) -> PageResponse {
    match page_locale(&state, &lang) {
        Some(locale) => render(StatusCode::OK, "Sign in", locale),
        None => render(StatusCode::NOT_FOUND, "Page not found", state.config.default_locale),
    }
}

/// GET /{lang}/{section}: the role dashboards and the unauthorized page.
pub async fn section(
    State(state): State<Arc<AppState>>,
    Path((lang, section)): Path<(String, String)>,
) -> PageResponse {
    let Some(locale) = page_locale(&state, &lang) else {
        return render(StatusCode::NOT_FOUND, "Page not found", state.config.default_locale);
    };

    if section == "unauthorized" {
        return render(StatusCode::FORBIDDEN, "Access denied", locale);
    }
    match ProtectedArea::from_segment(&section) {
        Some(ProtectedArea::Admin) => render(StatusCode::OK, "Admin dashboard", locale),
        Some(ProtectedArea::Doctor) => render(StatusCode::OK, "Doctor dashboard", locale),
        Some(ProtectedArea::Client) => render(StatusCode::OK, "Client dashboard", locale),
        None => render(StatusCode::NOT_FOUND, "Page not found", locale),
    }
}

/// Fallback for every unmatched path.
///
/// Route parameters are not available here, so the locale is recovered from
/// the `x-pathname` header set by the gatekeeper, then from the raw URI.
pub async fn not_found(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    uri: Uri,
) -> impl IntoResponse {
    let path = headers
        .get(X_PATHNAME)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_else(|| uri.path());
    let locale = path
        .strip_prefix('/')
        .and_then(|rest| rest.split('/').next())
        .and_then(|tag| page_locale(&state, tag))
        .unwrap_or(state.config.default_locale);
    render(StatusCode::NOT_FOUND, "Page not found", locale)
}
