use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use serde::Deserialize;

use crate::services::auth::claims::{Claims, WireClaims};
use crate::services::auth::error::TokenError;
use crate::services::auth::secret::Secret;

/// The only algorithms a token header may declare.
pub const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

#[derive(Debug, Deserialize)]
struct RawHeader {
    alg: String,
}

/// HMAC access-token verifier.
///
/// Runs the checks in a fixed order: structure, algorithm allow-list,
/// signature, expiry, and (for the subject accessors) `user_id` decoding.
/// Every call re-derives validity from the token, the secret and the clock.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenValidator")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl TokenValidator {
    pub fn new(secret: &Secret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = HMAC_ALGORITHMS.to_vec();
        // `exp` is required by `WireClaims` itself (which also accepts float
        // seconds) and compared against an explicit clock in `verify_at`.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<(), TokenError> {
        self.validate_token_at(token, Utc::now())
    }

    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<(), TokenError> {
        self.verify_at(token, now).map(|_| ())
    }

    pub fn extract_subject_id(&self, token: &str) -> Result<u32, TokenError> {
        self.extract_subject_id_at(token, Utc::now())
    }

    pub fn extract_subject_id_at(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<u32, TokenError> {
        self.verify_claims_at(token, now).map(|c| c.user_id)
    }

    /// Verify and convert claims into the typed record.
    ///
    /// This is the entry-point for middleware that needs more than the subject.
    pub fn verify_claims(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_claims_at(token, Utc::now())
    }

    pub fn verify_claims_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims, TokenError> {
        Claims::try_from(self.verify_at(token, now)?)
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<WireClaims, TokenError> {
        // 1) structure + 2) algorithm allow-list, before any key is touched
        declared_algorithm(token)?;

        // 3) signature
        let data = jsonwebtoken::decode::<WireClaims>(token, &self.decoding_key, &self.validation)
            .map_err(map_jwt_error)?;

        // 4) expiry (a token is still valid during its `exp` second)
        if now.timestamp() > data.claims.exp {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

/// Split the compact form and read `alg` from the header segment.
fn declared_algorithm(token: &str) -> Result<Algorithm, TokenError> {
    let mut segments = token.split('.');
    let (Some(header), Some(_claims), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(TokenError::Malformed(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(header)
        .map_err(|e| TokenError::Malformed(format!("header is not base64url: {}", e)))?;
    let header: RawHeader = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::Malformed(format!("header is not valid JSON: {}", e)))?;

    hmac_algorithm(&header.alg).ok_or(TokenError::UnsupportedAlgorithm(header.alg))
}

fn hmac_algorithm(alg: &str) -> Option<Algorithm> {
    match alg {
        "HS256" => Some(Algorithm::HS256),
        "HS384" => Some(Algorithm::HS384),
        "HS512" => Some(Algorithm::HS512),
        _ => None,
    }
}

fn map_jwt_error(e: jsonwebtoken::errors::Error) -> TokenError {
    match e.kind() {
        ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => TokenError::UnsupportedAlgorithm(e.to_string()),
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed(e.to_string()),
    }
}
