//! services/site/src/adapters/credentials.rs
//!
//! The demo credential store: four fixed accounts, one per role. Passwords
//! are kept only as argon2 hashes, computed when the store is built.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use async_trait::async_trait;
use healthbook_core::domain::{Role, User};
use healthbook_core::ports::{CredentialStore, PortError, PortResult};
use tracing::debug;

/// The opaque access token the demo backend hands to every user.
pub const MOCK_ACCESS_TOKEN: &str = "mock-jwt-token";

const DEMO_PASSWORD: &str = "password123";

const DEMO_USERS: [(u32, &str, &str, Role); 4] = [
    (1, "Admin User", "admin@example.com", Role::Admin),
    (2, "Doctor User", "doctor@example.com", Role::Doctor),
    (3, "Client User", "client@example.com", Role::Client),
    (4, "Guest User", "guest@example.com", Role::Guest),
];

struct StoredUser {
    user: User,
    password_hash: String,
}

/// An in-memory `CredentialStore` seeded with the demo accounts.
pub struct MockCredentialStore {
    users: Vec<StoredUser>,
}

impl MockCredentialStore {
    /// Builds the store, hashing each demo password with a fresh salt.
    pub fn new() -> PortResult<Self> {
        // Low-cost parameters: these accounts are demo fixtures.
        let params = Params::new(1024, 1, 1, None)
            .map_err(|e| PortError::Unexpected(format!("argon2 params: {e}")))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

        let mut users = Vec::with_capacity(DEMO_USERS.len());
        for (id, name, email, role) in DEMO_USERS {
            let salt = SaltString::generate(&mut OsRng);
            let password_hash = argon2
                .hash_password(DEMO_PASSWORD.as_bytes(), &salt)
                .map_err(|e| PortError::Unexpected(format!("failed to hash password: {e}")))?
                .to_string();
            users.push(StoredUser {
                user: User {
                    id,
                    name: name.to_string(),
                    email: email.to_string(),
                    role,
                },
                password_hash,
            });
        }
        Ok(Self { users })
    }
}

#[async_trait]
impl CredentialStore for MockCredentialStore {
    async fn verify_credentials(&self, email: &str, password: &str) -> PortResult<User> {
        let Some(stored) = self.users.iter().find(|u| u.user.email == email) else {
            debug!(%email, "login for unknown email");
            return Err(PortError::Unauthorized);
        };

        let parsed_hash = PasswordHash::new(&stored.password_hash)
            .map_err(|e| PortError::Unexpected(format!("failed to parse password hash: {e}")))?;

        // The hash string carries its own parameters.
        let valid = Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok();

        if !valid {
            debug!(%email, "login with wrong password");
            return Err(PortError::Unauthorized);
        }
        Ok(stored.user.clone())
    }

    fn access_token_for(&self, _user: &User) -> String {
        MOCK_ACCESS_TOKEN.to_string()
    }
}
