//! services/site/src/gatekeeper/mod.rs
//!
//! The request gatekeeper: decides, before any page handler runs, which locale
//! a request is served in and whether it may proceed.
//!
//! Per request the order is fixed: locale resolution, then the locale-prefix
//! redirect, then (when enabled) the role gate. The gatekeeper never blocks
//! traffic because of its own failures: [`Gatekeeper::decide`] turns any
//! [`GateError`] into [`Decision::Degraded`].

pub mod authorization;
pub mod matcher;
pub mod negotiation;

use axum::http::{
    header::{self, InvalidHeaderValue},
    HeaderValue, Request,
};
use healthbook_core::{Locale, PortError, SessionService};
use std::sync::Arc;
use tracing::{debug, error};

use crate::cookies::{locale_cookie, read_cookie};
use authorization::authorize;
use matcher::PathMatcher;
use negotiation::{resolve_locale, supported_locale};

//=========================================================================================
// Settings, Context and Outcome Types
//=========================================================================================

/// Immutable settings the gatekeeper is constructed with.
#[derive(Debug, Clone)]
pub struct GatekeeperSettings {
    pub supported_locales: Vec<Locale>,
    pub default_locale: Locale,
    pub locale_cookie_name: String,
    pub session_cookie_name: String,
    pub secure_cookies: bool,
    /// Role gating is a separate layer on top of locale routing.
    pub enforce_roles: bool,
}

/// What the gatekeeper looks at for one request.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub path: String,
    pub query: Option<String>,
    pub locale_cookie: Option<String>,
    pub accept_language: Option<String>,
    pub session_token: Option<String>,
}

/// The gatekeeper's verdict for a request.
///
/// Header values are validated while deciding, so applying a decision to a
/// response cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Answer with a redirect instead of running the page handler.
    Redirect {
        location: HeaderValue,
        set_cookie: Option<HeaderValue>,
    },
    /// Run the page handler and annotate its response.
    PassThrough {
        pathname: HeaderValue,
        set_cookie: Option<HeaderValue>,
    },
    /// The gatekeeper failed; run the page handler and leave the response alone.
    Degraded,
}

impl Decision {
    pub fn location(&self) -> Option<&str> {
        match self {
            Decision::Redirect { location, .. } => location.to_str().ok(),
            _ => None,
        }
    }

    pub fn set_cookie(&self) -> Option<&str> {
        match self {
            Decision::Redirect { set_cookie, .. } | Decision::PassThrough { set_cookie, .. } => {
                set_cookie.as_ref().and_then(|v| v.to_str().ok())
            }
            Decision::Degraded => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("session verification failed: {0}")]
    Session(#[from] PortError),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] InvalidHeaderValue),
    #[error("invalid path matcher: {0}")]
    Matcher(#[from] regex::Error),
}

//=========================================================================================
// The Gatekeeper
//=========================================================================================

pub struct Gatekeeper {
    settings: GatekeeperSettings,
    matcher: PathMatcher,
    sessions: Arc<dyn SessionService>,
}

impl Gatekeeper {
    pub fn new(
        settings: GatekeeperSettings,
        sessions: Arc<dyn SessionService>,
    ) -> Result<Self, GateError> {
        Ok(Self {
            settings,
            matcher: PathMatcher::new()?,
            sessions,
        })
    }

    /// Whether the gatekeeper runs for `path` at all.
    pub fn handles(&self, path: &str) -> bool {
        self.matcher.matches(path)
    }

    /// Collects the parts of `request` the gatekeeper needs.
    pub fn context_for<B>(&self, request: &Request<B>) -> RequestContext {
        let headers = request.headers();
        RequestContext {
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            locale_cookie: read_cookie(headers, &self.settings.locale_cookie_name),
            accept_language: headers
                .get(header::ACCEPT_LANGUAGE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            session_token: read_cookie(headers, &self.settings.session_cookie_name)
                .filter(|t| !t.is_empty()),
        }
    }

    /// The locale a request without a locale prefix should be sent to.
    pub fn resolve_locale(&self, ctx: &RequestContext) -> Locale {
        resolve_locale(
            ctx.locale_cookie.as_deref(),
            ctx.accept_language.as_deref(),
            &self.settings.supported_locales,
            self.settings.default_locale,
        )
    }

    /// The locale named by the first path segment, if it is supported.
    ///
    /// `/fa` and `/fa/...` qualify; `/fashion` does not.
    pub fn path_locale(&self, path: &str) -> Option<Locale> {
        let rest = path.strip_prefix('/')?;
        let segment = rest.split('/').next().unwrap_or(rest);
        supported_locale(segment, &self.settings.supported_locales)
    }

    /// Evaluates a request, degrading to pass-through on any internal failure.
    pub async fn decide(&self, ctx: &RequestContext) -> Decision {
        match self.evaluate(ctx).await {
            Ok(decision) => decision,
            Err(e) => {
                error!(path = %ctx.path, error = %e, "gatekeeper failed, passing request through");
                Decision::Degraded
            }
        }
    }

    /// Evaluates a request. Errors are internal failures, not access denials.
    pub async fn evaluate(&self, ctx: &RequestContext) -> Result<Decision, GateError> {
        let Some(locale) = self.path_locale(&ctx.path) else {
            return self.ensure_locale_prefix(ctx);
        };

        let set_cookie = if ctx.locale_cookie.as_deref() != Some(locale.as_str()) {
            Some(self.locale_cookie(locale)?)
        } else {
            None
        };

        if self.settings.enforce_roles {
            let claims = match ctx.session_token.as_deref() {
                Some(token) => self.sessions.verify(token).await?,
                None => None,
            };
            let access = authorize(&ctx.path, locale, claims.as_ref());
            if let Some(target) = access.redirect_target(locale) {
                debug!(path = %ctx.path, ?access, target = %target, "access denied");
                return Ok(Decision::Redirect {
                    location: HeaderValue::try_from(target)?,
                    set_cookie,
                });
            }
        }

        Ok(Decision::PassThrough {
            pathname: HeaderValue::try_from(ctx.path.as_str())?,
            set_cookie,
        })
    }

    /// Redirects an unprefixed path to its locale-prefixed form.
    fn ensure_locale_prefix(&self, ctx: &RequestContext) -> Result<Decision, GateError> {
        let locale = self.resolve_locale(ctx);
        let mut target = format!("/{}{}", locale, ctx.path);
        if let Some(query) = &ctx.query {
            target.push('?');
            target.push_str(query);
        }
        debug!(path = %ctx.path, %locale, target = %target, "adding locale prefix");

        Ok(Decision::Redirect {
            location: HeaderValue::try_from(target)?,
            set_cookie: Some(self.locale_cookie(locale)?),
        })
    }

    fn locale_cookie(&self, locale: Locale) -> Result<HeaderValue, InvalidHeaderValue> {
        HeaderValue::try_from(locale_cookie(
            &self.settings.locale_cookie_name,
            locale,
            self.settings.secure_cookies,
        ))
    }
}
