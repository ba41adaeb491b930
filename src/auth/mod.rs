use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Issued tokens are valid for exactly this long; there is no refresh and
/// no revocation, possession of an unexpired token is the whole mechanism.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Claim set embedded in every bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token authenticates
    pub id: i64,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id: user_id,
            iat: now.timestamp(),
            exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing secret must not be empty")]
    EmptySecret,

    #[error("token generation failed: {0}")]
    Generation(String),

    // One variant for bad signature, malformed payload and expiry alike;
    // callers must not learn which one it was.
    #[error("invalid token")]
    Invalid,
}

/// Stateless issuer/verifier for HS256 bearer tokens.
///
/// Constructed once at startup from the configured secret and shared by
/// value; nothing about an issued token is persisted server-side.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Result<Self, TokenError> {
        if secret.is_empty() {
            return Err(TokenError::EmptySecret);
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Mint a token for a user whose password the caller has already verified.
    pub fn issue(&self, user_id: i64) -> Result<String, TokenError> {
        let claims = Claims::new(user_id);
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| TokenError::Generation(e.to_string()))
    }

    /// Verify signature and expiry, returning the claim set.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}
