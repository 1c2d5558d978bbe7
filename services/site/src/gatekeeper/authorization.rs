//! services/site/src/gatekeeper/authorization.rs
//!
//! Role gate for locale-prefixed paths.

use healthbook_core::{Locale, ProtectedArea, Role, SessionClaims};

/// Outcome of the role gate for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    Allow,
    /// Signed-in visitor on the login page.
    AlreadySignedIn,
    /// No valid session on a page that requires one.
    SignInRequired,
    /// Signed in, but the area belongs to another role.
    WrongRole { required: Role, actual: Role },
}

impl Access {
    /// Where a denied request is sent, or `None` when it may proceed.
    pub fn redirect_target(&self, locale: Locale) -> Option<String> {
        match self {
            Access::Allow => None,
            Access::AlreadySignedIn => Some(format!("/{locale}")),
            Access::SignInRequired => Some(format!("/{locale}/auth/login")),
            Access::WrongRole { .. } => Some(format!("/{locale}/unauthorized")),
        }
    }
}

/// Checks a locale-prefixed `path` against the visitor's session.
pub fn authorize(path: &str, locale: Locale, claims: Option<&SessionClaims>) -> Access {
    if path.contains("/auth/login") {
        return match claims {
            Some(_) => Access::AlreadySignedIn,
            None => Access::Allow,
        };
    }

    if is_home_page(path, locale) {
        return Access::Allow;
    }

    let Some(claims) = claims else {
        return Access::SignInRequired;
    };

    // "/en/admin/..." splits into ["", "en", "admin", ...]
    let area = path.split('/').nth(2).and_then(ProtectedArea::from_segment);
    match area {
        Some(area) if area.required_role() != claims.role => Access::WrongRole {
            required: area.required_role(),
            actual: claims.role,
        },
        _ => Access::Allow,
    }
}

fn is_home_page(path: &str, locale: Locale) -> bool {
    path.strip_prefix('/')
        .and_then(|rest| rest.strip_prefix(locale.as_str()))
        .is_some_and(|rest| rest.is_empty() || rest == "/")
}
