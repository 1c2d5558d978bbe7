//! crates/healthbook_core/src/domain.rs
//!
//! Defines the pure, core data structures for the site.
//! These types are independent of any HTTP framework or token format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

//=========================================================================================
// Locale
//=========================================================================================

/// A language the site can be served in.
///
/// The set is closed: anything that does not parse into one of these variants
/// is treated as "no preference" by callers and replaced with a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Fa,
}

/// Writing direction of a locale's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl Locale {
    /// The tag used in URLs and cookies.
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Fa => "fa",
        }
    }

    pub fn direction(&self) -> TextDirection {
        match self {
            Locale::En => TextDirection::Ltr,
            Locale::Fa => TextDirection::Rtl,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TextDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        })
    }
}

/// Returned when a string is not one of the known locale tags.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown locale tag '{0}'")]
pub struct UnknownLocale(pub String);

impl FromStr for Locale {
    type Err = UnknownLocale;

    /// Exact, case-sensitive match. Path segments and cookie values are
    /// compared verbatim, so `/EN/about` is not an `en` path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Locale::En),
            "fa" => Ok(Locale::Fa),
            other => Err(UnknownLocale(other.to_string())),
        }
    }
}

//=========================================================================================
// Roles and protected areas
//=========================================================================================

/// A coarse user category. Compared only by equality; there is no hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Client,
    Guest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Client => "client",
            Role::Guest => "guest",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A section of the site reserved for a single role.
///
/// The segment-to-area mapping lives in one `match`, so adding an area
/// forces the required role to be declared alongside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtectedArea {
    Admin,
    Doctor,
    Client,
}

impl ProtectedArea {
    /// Maps the path segment that follows the locale (`/en/<segment>/...`).
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "admin" => Some(ProtectedArea::Admin),
            "doctor" => Some(ProtectedArea::Doctor),
            "client" => Some(ProtectedArea::Client),
            _ => None,
        }
    }

    pub fn required_role(&self) -> Role {
        match self {
            ProtectedArea::Admin => Role::Admin,
            ProtectedArea::Doctor => Role::Doctor,
            ProtectedArea::Client => Role::Client,
        }
    }
}

//=========================================================================================
// Users and sessions
//=========================================================================================

/// A user as exposed by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// The claims carried inside a signed session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the user id.
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Access token handed out by the credential backend.
    pub access_token: String,
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp).
    pub exp: i64,
    /// Unique token id.
    pub jti: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_known_tags_only() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("fa".parse::<Locale>(), Ok(Locale::Fa));
        assert_eq!(
            "de".parse::<Locale>(),
            Err(UnknownLocale("de".to_string()))
        );
    }

    #[test]
    fn locale_parsing_is_case_sensitive() {
        assert!("EN".parse::<Locale>().is_err());
        assert!("Fa".parse::<Locale>().is_err());
    }

    #[test]
    fn persian_is_right_to_left() {
        assert_eq!(Locale::Fa.direction(), TextDirection::Rtl);
        assert_eq!(Locale::En.direction(), TextDirection::Ltr);
        assert_eq!(Locale::Fa.direction().to_string(), "rtl");
    }

    #[test]
    fn protected_areas_map_to_their_role() {
        assert_eq!(
            ProtectedArea::from_segment("admin").map(|a| a.required_role()),
            Some(Role::Admin)
        );
        assert_eq!(
            ProtectedArea::from_segment("doctor").map(|a| a.required_role()),
            Some(Role::Doctor)
        );
        assert_eq!(
            ProtectedArea::from_segment("client").map(|a| a.required_role()),
            Some(Role::Client)
        );
    }

    #[test]
    fn unknown_segments_are_not_protected() {
        assert_eq!(ProtectedArea::from_segment("guest"), None);
        assert_eq!(ProtectedArea::from_segment("Admin"), None);
        assert_eq!(ProtectedArea::from_segment(""), None);
    }

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&Role::Doctor).unwrap();
        assert_eq!(json, "\"doctor\"");
        let parsed: Role = serde_json::from_str("\"guest\"").unwrap();
        assert_eq!(parsed, Role::Guest);
        assert!(serde_json::from_str::<Role>("\"superuser\"").is_err());
    }
}
