use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};

use crate::services::auth::claims::Claims;
use crate::services::auth::error::TokenError;
use crate::services::auth::secret::Secret;

/// Algorithm used for every token this service mints.
pub const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Mints HS256 access tokens for a subject id.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
}

impl TokenIssuer {
    pub fn new(secret: &Secret) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Issue a token for `user_id`, valid for one hour from now.
    pub fn create_token(&self, user_id: u32) -> Result<String, TokenError> {
        self.create_token_at(user_id, Utc::now())
    }

    pub fn create_token_at(
        &self,
        user_id: u32,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        self.sign(&Claims::new(user_id, issued_at))
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, TokenError> {
        let mut header = Header::new(SIGNING_ALGORITHM);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("alg", &SIGNING_ALGORITHM)
            .finish_non_exhaustive()
    }
}
