// ABOUTME: Signed, time-bound access tokens
// ABOUTME: HS256 JWTs carrying the subject email and an expiry claim

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use drinkwise_core::DEFAULT_TOKEN_TTL_MINUTES;

use crate::error::AuthError;

/// Claims encoded into every access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and resolves bearer tokens. Stateless apart from the signing secret.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::Configuration(
                "token signing secret must not be empty".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        })
    }

    pub fn with_default_ttl(secret: &str) -> Result<Self, AuthError> {
        Self::new(secret, Duration::minutes(DEFAULT_TOKEN_TTL_MINUTES))
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject` using the configured lifetime
    pub fn issue_token(&self, subject: &str) -> Result<String, AuthError> {
        self.issue_token_with_ttl(subject, self.ttl)
    }

    pub fn issue_token_with_ttl(&self, subject: &str, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    /// Resolve a token to its subject. Bad signature, malformed input, a
    /// missing subject and expiry all collapse into `InvalidCredential`.
    pub fn resolve_token(&self, token: &str) -> Result<String, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!("Token rejected: {}", e);
            AuthError::InvalidCredential
        })?;

        if data.claims.sub.is_empty() {
            return Err(AuthError::InvalidCredential);
        }

        Ok(data.claims.sub)
    }
}
