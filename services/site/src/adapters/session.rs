//! services/site/src/adapters/session.rs
//!
//! Signed session tokens (HS256 JWTs) implementing the `SessionService` port.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use healthbook_core::domain::{SessionClaims, User};
use healthbook_core::ports::{PortError, PortResult, SessionService};
use jsonwebtoken::{errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;
use uuid::Uuid;

pub struct JwtSessionService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl JwtSessionService {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    fn sign(&self, claims: &SessionClaims) -> PortResult<String> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| PortError::Unexpected(format!("JWT encode: {e}")))
    }
}

#[async_trait]
impl SessionService for JwtSessionService {
    fn issue(&self, user: &User, access_token: &str) -> PortResult<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            access_token: access_token.to_string(),
            iat: now,
            exp: now + self.ttl.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        };
        self.sign(&claims)
    }

    async fn verify(&self, token: &str) -> PortResult<Option<SessionClaims>> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        match jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(Some(data.claims)),
            Err(e) => match e.kind() {
                ErrorKind::Crypto(_) => Err(PortError::Unexpected(format!("JWT decode: {e}"))),
                _ => {
                    debug!(error = %e, "rejected session token");
                    Ok(None)
                }
            },
        }
    }
}
