//! services/site/src/gatekeeper/negotiation.rs
//!
//! Locale negotiation.
//!
//! Resolution order: locale cookie → Accept-Language → default.

use healthbook_core::Locale;

/// Picks the locale a request should be served in.
///
/// A cookie naming a supported locale always wins, so a visitor's explicit
/// choice sticks even when their browser asks for something else.
pub fn resolve_locale(
    cookie: Option<&str>,
    accept_language: Option<&str>,
    supported: &[Locale],
    default_locale: Locale,
) -> Locale {
    if let Some(locale) = cookie.and_then(|c| supported_locale(c, supported)) {
        return locale;
    }

    accept_language
        .and_then(|header| negotiate(header, supported))
        .unwrap_or(default_locale)
}

/// Parses `tag` and checks it against `supported`.
pub fn supported_locale(tag: &str, supported: &[Locale]) -> Option<Locale> {
    tag.parse::<Locale>()
        .ok()
        .filter(|locale| supported.contains(locale))
}

/// Returns the best supported match for an Accept-Language header, if any.
pub fn negotiate(header: &str, supported: &[Locale]) -> Option<Locale> {
    parse_accept_language(header)
        .iter()
        .find_map(|(tag, _quality)| match_tag(tag, supported))
}

/// Exact tag first, then the primary subtag (`fa-IR` → `fa`).
fn match_tag(tag: &str, supported: &[Locale]) -> Option<Locale> {
    let by_name = |name: &str| supported.iter().copied().find(|l| l.as_str() == name);
    by_name(tag).or_else(|| tag.split('-').next().and_then(by_name))
}

/// Parse an Accept-Language value into lowercase `(tag, quality)` pairs,
/// highest quality first. Ties keep header order. Entries with `q=0` are
/// refusals and are dropped.
fn parse_accept_language(header: &str) -> Vec<(String, f32)> {
    let mut langs: Vec<(String, f32)> = header
        .split(',')
        .filter_map(|part| {
            let mut segments = part.trim().split(';');
            let tag = segments.next()?.trim().to_lowercase();
            if tag.is_empty() {
                return None;
            }

            let quality = segments
                .find_map(|s| {
                    s.trim()
                        .strip_prefix("q=")
                        .and_then(|q| q.trim().parse::<f32>().ok())
                })
                .unwrap_or(1.0)
                .clamp(0.0, 1.0);

            (quality > 0.0).then_some((tag, quality))
        })
        .collect();

    langs.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    langs
}
