//! services/site/src/web/middleware.rs
//!
//! Runs the gatekeeper in front of every page handler.

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::gatekeeper::Decision;
use crate::web::state::AppState;

/// Carries the incoming request path to page handlers and to the client.
/// Not-found pages rely on it to recover the locale, so only the gatekeeper
/// may set it on a request.
pub const X_PATHNAME: HeaderName = HeaderName::from_static("x-pathname");

/// Middleware applying the gatekeeper's decision to a request.
///
/// Excluded paths (API, build assets, static files) go straight through.
/// A degraded decision forwards the request untouched. A client-supplied
/// `x-pathname` is dropped in every case.
pub async fn gatekeeper(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    req.headers_mut().remove(X_PATHNAME);

    let gate = &state.gatekeeper;
    if !gate.handles(req.uri().path()) {
        return next.run(req).await;
    }

    let ctx = gate.context_for(&req);
    match gate.decide(&ctx).await {
        Decision::Redirect {
            location,
            set_cookie,
        } => {
            let mut response = StatusCode::TEMPORARY_REDIRECT.into_response();
            let headers = response.headers_mut();
            headers.insert(header::LOCATION, location);
            if let Some(cookie) = set_cookie {
                headers.append(header::SET_COOKIE, cookie);
            }
            response
        }
        Decision::PassThrough {
            pathname,
            set_cookie,
        } => {
            req.headers_mut().insert(X_PATHNAME, pathname.clone());
            let mut response = next.run(req).await;
            let headers = response.headers_mut();
            headers.insert(X_PATHNAME, pathname);
            if let Some(cookie) = set_cookie {
                headers.append(header::SET_COOKIE, cookie);
            }
            response
        }
        Decision::Degraded => next.run(req).await,
    }
}
