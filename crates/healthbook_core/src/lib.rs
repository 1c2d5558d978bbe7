pub mod domain;
pub mod ports;

pub use domain::{Locale, ProtectedArea, Role, SessionClaims, TextDirection, UnknownLocale, User};
pub use ports::{CredentialStore, PortError, PortResult, SessionService};
