//! services/site/src/config.rs
//!
//! Defines the site's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use chrono::Duration;
use healthbook_core::Locale;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::Level;

use crate::gatekeeper::GatekeeperSettings;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// Directory served under `/fonts`.
    pub fonts_dir: PathBuf,
    pub log_level: Level,
    pub auth_secret: String,
    /// Set when `APP_ENV=production`; turns on `Secure` cookies.
    pub production: bool,
    pub supported_locales: Vec<Locale>,
    pub default_locale: Locale,
    pub locale_cookie_name: String,
    pub session_cookie_name: String,
    pub session_ttl: Duration,
    /// Enables the role gate on top of locale routing.
    pub enforce_roles: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Server Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let fonts_dir = PathBuf::from(
            lookup("FONTS_DIR").unwrap_or_else(|| "public/fonts".to_string()),
        );

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let production = lookup("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        // --- Session Settings ---
        let auth_secret = lookup("AUTH_SECRET")
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingVar("AUTH_SECRET".to_string()))?;

        let session_cookie_name =
            lookup("SESSION_COOKIE_NAME").unwrap_or_else(|| "session-token".to_string());

        let ttl_str = lookup("SESSION_TTL_DAYS").unwrap_or_else(|| "30".to_string());
        let ttl_days = ttl_str
            .parse::<i64>()
            .ok()
            .filter(|d| (1..=36_500).contains(d))
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "SESSION_TTL_DAYS".to_string(),
                    format!("'{}' is not a number of days between 1 and 36500", ttl_str),
                )
            })?;

        let enforce_roles = match lookup("ENFORCE_ROLES") {
            Some(v) => parse_flag(&v)
                .ok_or_else(|| ConfigError::InvalidValue("ENFORCE_ROLES".to_string(), v))?,
            None => false,
        };

        // --- Locale Settings ---
        let supported_str = lookup("SUPPORTED_LOCALES").unwrap_or_else(|| "en,fa".to_string());
        let mut supported_locales = Vec::new();
        for tag in supported_str.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let locale = tag.parse::<Locale>().map_err(|e| {
                ConfigError::InvalidValue("SUPPORTED_LOCALES".to_string(), e.to_string())
            })?;
            if !supported_locales.contains(&locale) {
                supported_locales.push(locale);
            }
        }
        if supported_locales.is_empty() {
            return Err(ConfigError::InvalidValue(
                "SUPPORTED_LOCALES".to_string(),
                "at least one locale is required".to_string(),
            ));
        }

        let default_str = lookup("DEFAULT_LOCALE").unwrap_or_else(|| "en".to_string());
        let default_locale = default_str.parse::<Locale>().map_err(|e| {
            ConfigError::InvalidValue("DEFAULT_LOCALE".to_string(), e.to_string())
        })?;
        if !supported_locales.contains(&default_locale) {
            return Err(ConfigError::InvalidValue(
                "DEFAULT_LOCALE".to_string(),
                format!("'{}' is not in SUPPORTED_LOCALES", default_locale),
            ));
        }

        let locale_cookie_name =
            lookup("LOCALE_COOKIE_NAME").unwrap_or_else(|| "NEXT_LOCALE".to_string());

        Ok(Self {
            bind_address,
            fonts_dir,
            log_level,
            auth_secret,
            production,
            supported_locales,
            default_locale,
            locale_cookie_name,
            session_cookie_name,
            session_ttl: Duration::days(ttl_days),
            enforce_roles,
        })
    }

    /// The slice of configuration the gatekeeper is constructed with.
    pub fn gatekeeper_settings(&self) -> GatekeeperSettings {
        GatekeeperSettings {
            supported_locales: self.supported_locales.clone(),
            default_locale: self.default_locale,
            locale_cookie_name: self.locale_cookie_name.clone(),
            session_cookie_name: self.session_cookie_name.clone(),
            secure_cookies: self.production,
            enforce_roles: self.enforce_roles,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let config = Config::from_lookup(lookup_from(&[("AUTH_SECRET", "s3cret")])).unwrap();
        assert_eq!(config.bind_address.to_string(), "0.0.0.0:3000");
        assert_eq!(config.fonts_dir, PathBuf::from("public/fonts"));
        assert_eq!(config.supported_locales, vec![Locale::En, Locale::Fa]);
        assert_eq!(config.default_locale, Locale::En);
        assert_eq!(config.locale_cookie_name, "NEXT_LOCALE");
        assert_eq!(config.session_cookie_name, "session-token");
        assert_eq!(config.session_ttl, Duration::days(30));
        assert!(!config.production);
        assert!(!config.enforce_roles);
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar(ref v) if v == "AUTH_SECRET"));
    }

    #[test]
    fn production_and_role_gate_flags() {
        let config = Config::from_lookup(lookup_from(&[
            ("AUTH_SECRET", "s3cret"),
            ("APP_ENV", "production"),
            ("ENFORCE_ROLES", "true"),
        ]))
        .unwrap();
        assert!(config.production);
        assert!(config.enforce_roles);

        let settings = config.gatekeeper_settings();
        assert!(settings.secure_cookies);
        assert!(settings.enforce_roles);
    }

    #[test]
    fn default_locale_must_be_supported() {
        let err = Config::from_lookup(lookup_from(&[
            ("AUTH_SECRET", "s3cret"),
            ("SUPPORTED_LOCALES", "fa"),
            ("DEFAULT_LOCALE", "en"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v, _) if v == "DEFAULT_LOCALE"));
    }

    #[test]
    fn unknown_locale_tags_are_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("AUTH_SECRET", "s3cret"),
            ("SUPPORTED_LOCALES", "en,de"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v, _) if v == "SUPPORTED_LOCALES"));
    }

    #[test]
    fn invalid_flag_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[
            ("AUTH_SECRET", "s3cret"),
            ("ENFORCE_ROLES", "maybe"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref v, _) if v == "ENFORCE_ROLES"));
    }
}
