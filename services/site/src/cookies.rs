//! services/site/src/cookies.rs
//!
//! Reading the `Cookie` request header and formatting `Set-Cookie` values for
//! the locale and session cookies.

use axum::http::{header, HeaderMap};
use chrono::Duration;
use healthbook_core::Locale;

/// Locale preference lifetime: one year, in seconds.
pub const LOCALE_COOKIE_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 365;

/// Finds the value of cookie `name` across every `Cookie` header.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|c| {
            let (key, value) = c.trim().split_once('=')?;
            (key == name).then(|| value.trim_matches('"').to_string())
        })
}

/// The locale cookie. Not `HttpOnly`: the client-side language switcher reads it.
pub fn locale_cookie(name: &str, locale: Locale, secure: bool) -> String {
    format!(
        "{}={}; Path=/; Max-Age={}; SameSite=Lax{}",
        name,
        locale,
        LOCALE_COOKIE_MAX_AGE_SECS,
        secure_attr(secure)
    )
}

pub fn session_cookie(name: &str, token: &str, max_age: Duration, secure: bool) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}{}",
        name,
        token,
        max_age.num_seconds(),
        secure_attr(secure)
    )
}

/// Overwrites the session cookie with an already-expired one.
pub fn cleared_session_cookie(name: &str, secure: bool) -> String {
    format!(
        "{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0{}",
        name,
        secure_attr(secure)
    )
}

fn secure_attr(secure: bool) -> &'static str {
    if secure {
        "; Secure"
    } else {
        ""
    }
}
