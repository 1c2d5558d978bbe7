pub mod credentials;
pub mod session;

pub use credentials::MockCredentialStore;
pub use session::JwtSessionService;
